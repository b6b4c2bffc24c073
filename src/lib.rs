#![warn(clippy::pedantic, clippy::nursery, clippy::cargo)]
#![deny(clippy::use_self, rust_2018_idioms)]
#![allow(clippy::multiple_crate_versions, clippy::module_name_repetitions)]

use std::{
    sync::mpsc::Receiver,
    time::{Duration, Instant},
};

use chrono::Local;
use eframe::egui::{
    self, Button, CentralPanel, ComboBox, Context, Layout, RichText, ScrollArea, TextEdit,
    TopBottomPanel, Window,
};

use crate::{
    alarm_edit::AlarmDraft,
    communication::Message,
    manager::AlarmManager,
    settings::{FontSize, Settings, Theme},
    stopwatch::Stopwatch,
    timer::CountdownTimer,
    weather::WeatherReport,
};

pub mod alarm;
pub mod alarm_edit;
pub mod communication;
pub mod manager;
pub mod settings;
pub mod stopwatch;
pub mod store;
pub mod timer;
pub mod weather;
pub mod widgets;

/// how often the alarm due check runs
const ALARM_CHECK_INTERVAL: Duration = Duration::from_secs(30);
/// how often the weather poller phones home
pub const WEATHER_POLL_INTERVAL: Duration = Duration::from_secs(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Tab {
    #[default]
    Alarms,
    Stopwatch,
    Timer,
}

/// latest word from the weather poller
enum WeatherStatus {
    Loading,
    Ready(WeatherReport),
    Unavailable(String),
}

/// a dismissable popup window, the stand-in for desktop notifications
struct Notification {
    id: u64,
    title: String,
    body: String,
}

pub struct App {
    settings: Settings,
    alarms: AlarmManager,
    stopwatch: Stopwatch,
    timer: CountdownTimer,
    draft: AlarmDraft,
    timer_minutes: String,
    tab: Tab,
    in_settings: bool,
    weather_rx: Receiver<Message>,
    weather: WeatherStatus,
    notifications: Vec<Notification>,
    next_notification: u64,
    last_alarm_check: Option<Instant>,
}

impl App {
    #[must_use]
    pub fn new(settings: Settings, alarms: AlarmManager, weather_rx: Receiver<Message>) -> Self {
        Self {
            settings,
            alarms,
            stopwatch: Stopwatch::new(),
            timer: CountdownTimer::new(),
            draft: AlarmDraft::default(),
            timer_minutes: String::new(),
            tab: Tab::default(),
            in_settings: false,
            weather_rx,
            weather: WeatherStatus::Loading,
            notifications: Vec::new(),
            next_notification: 0,
            last_alarm_check: None,
        }
    }

    fn notify(&mut self, title: &str, body: String) {
        self.notifications.push(Notification {
            id: self.next_notification,
            title: title.to_string(),
            body,
        });
        self.next_notification += 1;
    }

    /// the per-frame bookkeeping that does not depend on what is on screen
    fn pump(&mut self) {
        while let Ok(message) = self.weather_rx.try_recv() {
            match message {
                Message::WeatherUpdated(report) => {
                    if weather::should_alert(&report.condition) {
                        self.notify("Weather", format!("heads up: {}", report.condition));
                    }
                    self.weather = WeatherStatus::Ready(report);
                }
                Message::WeatherUnavailable(reason) => {
                    // keep showing the last good report if there was one
                    if !matches!(self.weather, WeatherStatus::Ready(_)) {
                        self.weather = WeatherStatus::Unavailable(reason);
                    }
                }
            }
        }

        let now = Instant::now();
        let check_due = self
            .last_alarm_check
            .map_or(true, |last| now.duration_since(last) >= ALARM_CHECK_INTERVAL);
        if check_due {
            self.last_alarm_check = Some(now);
            for alarm in self.alarms.evaluate_tick(Local::now().time()) {
                self.notify("Alarm", alarm.message);
            }
        }

        if self.timer.poll_finished(now) {
            self.notify("Timer", "time's up".to_string());
        }
    }

    fn render_header(&mut self, ctx: &Context) {
        TopBottomPanel::top("clock_and_ctrl").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let theme_btn = ui.add(Button::new({
                    if self.settings.theme == Theme::Dark {
                        "🌞"
                    } else {
                        "🌙"
                    }
                }));
                if theme_btn.clicked() {
                    self.settings.theme = !self.settings.theme;
                    self.settings.save(&Settings::config_path());
                }
                ui.with_layout(Layout::right_to_left(egui::Align::Min), |ui| {
                    if ui.button("⚙").on_hover_text("settings").clicked() {
                        self.in_settings = true;
                    }
                    ui.centered_and_justified(|ui| {
                        ui.label(
                            RichText::new(
                                Local::now()
                                    .naive_local()
                                    .format(&self.settings.time_format)
                                    .to_string(),
                            )
                            .size(self.settings.font_size.points()),
                        );
                    });
                });
            });
        });
        TopBottomPanel::top("tabs").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.selectable_value(&mut self.tab, Tab::Alarms, "Alarms");
                ui.selectable_value(&mut self.tab, Tab::Stopwatch, "Stopwatch");
                ui.selectable_value(&mut self.tab, Tab::Timer, "Timer");
            });
        });
    }

    fn render_settings(&mut self, ctx: &Context) {
        let mut open = self.in_settings;
        let mut changed = false;
        Window::new("settings ⚙").open(&mut open).show(ctx, |ui| {
            ComboBox::from_label("font size")
                .selected_text(self.settings.font_size.label())
                .show_ui(ui, |ui| {
                    for size in FontSize::ALL {
                        changed |= ui
                            .selectable_value(&mut self.settings.font_size, size, size.label())
                            .changed();
                    }
                });
            changed |= ui
                .checkbox(
                    &mut self.settings.show_milliseconds,
                    "show milliseconds in stopwatch",
                )
                .changed();
        });
        self.in_settings = open;
        if changed {
            self.settings.save(&Settings::config_path());
        }
    }

    fn render_alarms(&mut self, ui: &mut egui::Ui) {
        ui.label(match &self.weather {
            WeatherStatus::Loading => "Weather: loading...".to_string(),
            WeatherStatus::Ready(report) => {
                format!("Weather: {}, {:.1}°C", report.condition, report.temp_c)
            }
            WeatherStatus::Unavailable(reason) => format!("Weather: unavailable ({reason})"),
        });
        ui.separator();

        self.draft.render(ui, &mut self.alarms);
        ui.separator();

        let mut remove = None;
        ScrollArea::vertical().show(ui, |ui| {
            for alarm in self.alarms.upcoming() {
                ui.horizontal(|ui| {
                    if ui.button("x").on_hover_text("delete alarm").clicked() {
                        remove = Some(alarm.id);
                    }
                    let daily = if alarm.recurring { " (daily)" } else { "" };
                    ui.label(format!(
                        "{} - {}{daily}",
                        alarm.time.format("%I:%M %p"),
                        alarm.message
                    ));
                });
            }
        });
        if let Some(id) = remove {
            self.alarms.remove(id);
        }
    }

    fn render_stopwatch(&mut self, ui: &mut egui::Ui) {
        let now = Instant::now();
        let readout = stopwatch::format_elapsed(
            self.stopwatch.elapsed(now),
            self.settings.show_milliseconds,
        );
        ui.label(RichText::new(readout).size(self.settings.font_size.points()));
        ui.horizontal(|ui| {
            if ui.button("start").clicked() {
                self.stopwatch.start(now);
            }
            if ui.button("stop").clicked() {
                self.stopwatch.stop(now);
            }
            if ui.button("reset").clicked() {
                self.stopwatch.reset();
            }
        });
    }

    fn render_timer(&mut self, ui: &mut egui::Ui) {
        let now = Instant::now();
        let readout = timer::format_remaining(self.timer.remaining(now));
        ui.label(RichText::new(readout).size(self.settings.font_size.points()));
        ui.add(TextEdit::singleline(&mut self.timer_minutes).hint_text("minutes"));
        ui.horizontal(|ui| {
            if ui.button("start timer").clicked() {
                match self.timer_minutes.trim().parse::<u64>() {
                    Ok(minutes) => self.timer.start(Duration::from_secs(minutes * 60), now),
                    Err(_) => log::warn!("not a minute count: {:?}", self.timer_minutes),
                }
            }
            if ui.button("stop").clicked() {
                self.timer.stop(now);
            }
            if ui.button("reset").clicked() {
                self.timer.reset();
            }
        });
    }

    fn render_notifications(&mut self, ctx: &Context) {
        let mut dismissed = None;
        for notification in &self.notifications {
            Window::new(format!("🔔 {}", notification.title))
                .id(egui::Id::new(notification.id))
                .auto_sized()
                .show(ctx, |ui| {
                    ui.label(&notification.body);
                    if ui.button("dismiss").clicked() {
                        dismissed = Some(notification.id);
                    }
                });
        }
        if let Some(id) = dismissed {
            self.notifications.retain(|n| n.id != id);
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.pump();

        ctx.set_visuals(self.settings.theme.into());
        self.render_header(ctx);
        if self.in_settings {
            self.render_settings(ctx);
        }
        CentralPanel::default().show(ctx, |ui| match self.tab {
            Tab::Alarms => self.render_alarms(ui),
            Tab::Stopwatch => self.render_stopwatch(ui),
            Tab::Timer => self.render_timer(ui),
        });
        self.render_notifications(ctx);

        // keep the clock and stopwatch moving even while nothing is happening
        ctx.request_repaint_after(Duration::from_millis(100));
    }
}
