use std::{
    io,
    ops::Not,
    path::{Path, PathBuf},
};

use eframe::egui;
use serde::{Deserialize, Serialize};

use crate::weather::WeatherConfig;

#[derive(Debug, Serialize, Deserialize, Default, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Not for Theme {
    type Output = Self;

    fn not(self) -> Self::Output {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }
}

impl From<Theme> for egui::Visuals {
    fn from(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self::dark(),
            Theme::Light => Self::light(),
        }
    }
}

/// label size for the big clock, stopwatch and timer readouts
#[derive(Debug, Serialize, Deserialize, Default, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FontSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl FontSize {
    pub const ALL: [Self; 3] = [Self::Small, Self::Medium, Self::Large];

    #[must_use]
    pub const fn points(self) -> f32 {
        match self {
            Self::Small => 16.0,
            Self::Medium => 24.0,
            Self::Large => 32.0,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Settings {
    #[serde(default)]
    pub font_size: FontSize,
    #[serde(default)]
    pub show_milliseconds: bool,
    #[serde(default)]
    pub theme: Theme,
    #[serde(default = "default_time_format")]
    pub time_format: String,
    /// openweathermap access, the weather check stays off without it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather: Option<WeatherConfig>,
}

fn default_time_format() -> String {
    "%I:%M:%S %p".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            font_size: FontSize::default(),
            show_milliseconds: false,
            theme: Theme::default(),
            time_format: default_time_format(),
            weather: None,
        }
    }
}

impl Settings {
    /// read the settings file, falling back to the defaults if it is missing
    /// or broken
    #[must_use]
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(settings) => settings,
                Err(err) => {
                    log::warn!(
                        "settings file {} is malformed, using defaults: {err}",
                        path.display()
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == io::ErrorKind::NotFound => Self::default(),
            Err(err) => {
                log::warn!(
                    "couldn't read settings file {}, using defaults: {err}",
                    path.display()
                );
                Self::default()
            }
        }
    }

    /// write the settings file, failures are logged and dropped
    pub fn save(&self, path: &Path) {
        let contents = match toml::to_string(self) {
            Ok(contents) => contents,
            Err(err) => {
                log::error!("couldn't encode settings: {err}");
                return;
            }
        };
        let written = path
            .parent()
            .map_or(Ok(()), std::fs::create_dir_all)
            .and_then(|()| std::fs::write(path, contents));
        if let Err(err) = written {
            log::error!("couldn't write settings file {}: {err}", path.display());
        }
    }

    #[must_use]
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("settings.toml")
    }

    /// where the alarm collection lives
    #[must_use]
    pub fn alarms_path() -> PathBuf {
        Self::config_dir().join("alarms.json")
    }

    fn config_dir() -> PathBuf {
        directories::ProjectDirs::from("", "", "chime_clock")
            .expect("couldn't get config path")
            .config_dir()
            .to_path_buf()
    }

    #[must_use]
    pub fn is_present() -> bool {
        Self::config_path().exists()
    }
}
