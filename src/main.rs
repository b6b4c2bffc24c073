use std::{error::Error, sync::mpsc};

use chime_clock::{
    manager::AlarmManager,
    settings::Settings,
    store::AlarmStore,
    weather::{self, WeatherChecker},
    App, WEATHER_POLL_INTERVAL,
};
use clap::{Parser, Subcommand};
use eframe::{egui::ViewportBuilder, run_native};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[clap(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// write a fresh settings file
    Init {
        #[clap(long, short)]
        force: bool,
    },
    /// create an alarm without opening the window
    Add {
        hour: u32,
        minute: u32,
        message: String,
        #[clap(long, short)]
        daily: bool,
    },
    /// print every alarm, earliest time of day first
    List,
}

fn main() -> Result<(), Box<dyn Error>> {
    simple_file_logger::init_logger!("chime_clock").expect("couldn't initialize logger");

    let args = Args::parse();
    match args.command {
        Some(Command::Init { force }) => {
            if force || !Settings::is_present() {
                Settings::default().save(&Settings::config_path());
            }
            return Ok(());
        }
        Some(Command::Add {
            hour,
            minute,
            message,
            daily,
        }) => {
            let mut alarms = AlarmManager::new(AlarmStore::new(Settings::alarms_path()));
            alarms.add(hour, minute, message, daily)?;
            return Ok(());
        }
        Some(Command::List) => {
            let alarms = AlarmManager::new(AlarmStore::new(Settings::alarms_path()));
            for alarm in alarms.upcoming() {
                let daily = if alarm.recurring { " (daily)" } else { "" };
                println!("{} - {}{daily}", alarm.time.format("%I:%M %p"), alarm.message);
            }
            return Ok(());
        }
        None => {}
    }

    let settings = Settings::load(&Settings::config_path());
    let alarms = AlarmManager::new(AlarmStore::new(Settings::alarms_path()));

    let (tx, rx) = mpsc::channel();
    if let Some(config) = settings.weather.clone() {
        weather::spawn_poller(WeatherChecker::new(config), WEATHER_POLL_INTERVAL, tx);
    }

    let native_options = eframe::NativeOptions {
        viewport: ViewportBuilder::default().with_inner_size([400.0, 500.0]),
        ..Default::default()
    };
    run_native(
        "Chime Clock",
        native_options,
        Box::new(|_| Ok(Box::new(App::new(settings, alarms, rx)))),
    )
    .map_err(Into::into)
}
