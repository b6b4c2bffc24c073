use eframe::egui::{Color32, TextEdit, Ui};

use crate::{manager::AlarmManager, widgets::Dial};

/// an alarm being put together in the alarms tab
#[derive(Debug, Default)]
pub struct AlarmDraft {
    pub hour: u32,
    pub minute: u32,
    pub message: String,
    pub recurring: bool,
    error: Option<String>,
}

impl AlarmDraft {
    /// the add form, hands the finished alarm straight to the manager
    pub(crate) fn render(&mut self, ui: &mut Ui, alarms: &mut AlarmManager) {
        ui.horizontal(|ui| {
            ui.vertical(|ui| {
                ui.label("hour");
                ui.add(Dial::new(&mut self.hour, 23));
            });
            ui.vertical(|ui| {
                ui.label("minute");
                ui.add(Dial::new(&mut self.minute, 59));
            });
        });
        ui.add(TextEdit::singleline(&mut self.message).hint_text("message"));
        ui.checkbox(&mut self.recurring, "repeat daily");

        if ui.button("add alarm").clicked() {
            let message = self.message.trim().to_string();
            match alarms.add(self.hour, self.minute, message, self.recurring) {
                Ok(()) => *self = Self::default(),
                Err(err) => self.error = Some(err.to_string()),
            }
        }
        if let Some(error) = &self.error {
            ui.colored_label(Color32::RED, error);
        }
    }
}
