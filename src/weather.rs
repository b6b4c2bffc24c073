use std::{io, sync::mpsc::Sender, thread, time::Duration};

use serde::{Deserialize, Serialize};

use crate::communication::Message;

const ENDPOINT: &str = "http://api.openweathermap.org/data/2.5/weather";

/// condition groups worth a heads-up before heading out
const ALERT_CONDITIONS: [&str; 3] = ["Rain", "Snow", "Thunderstorm"];

#[must_use]
pub fn should_alert(condition: &str) -> bool {
    ALERT_CONDITIONS.contains(&condition)
}

/// openweathermap access, lives in the settings file
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct WeatherConfig {
    pub api_key: String,
    pub city: String,
}

/// current conditions for the configured city
#[derive(Debug, Clone)]
pub struct WeatherReport {
    /// condition group like "Clear" or "Rain"
    pub condition: String,
    pub temp_c: f64,
}

#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("weather request failed: {0}")]
    Request(#[source] Box<ureq::Error>),
    #[error("couldn't decode weather response: {0}")]
    Decode(#[source] io::Error),
    #[error("weather response has no conditions")]
    Empty,
}

impl From<ureq::Error> for WeatherError {
    fn from(err: ureq::Error) -> Self {
        Self::Request(Box::new(err))
    }
}

impl From<io::Error> for WeatherError {
    fn from(err: io::Error) -> Self {
        Self::Decode(err)
    }
}

// just the parts of the response we look at
#[derive(Debug, Deserialize)]
struct ApiResponse {
    weather: Vec<ApiCondition>,
    main: ApiMain,
}

#[derive(Debug, Deserialize)]
struct ApiCondition {
    main: String,
}

#[derive(Debug, Deserialize)]
struct ApiMain {
    temp: f64,
}

fn report_from(response: ApiResponse) -> Result<WeatherReport, WeatherError> {
    let condition = response
        .weather
        .into_iter()
        .next()
        .ok_or(WeatherError::Empty)?;
    Ok(WeatherReport {
        condition: condition.main,
        temp_c: response.main.temp,
    })
}

pub struct WeatherChecker {
    config: WeatherConfig,
    agent: ureq::Agent,
}

impl WeatherChecker {
    #[must_use]
    pub fn new(config: WeatherConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(10))
            .build();
        Self { config, agent }
    }

    /// one current-conditions lookup
    pub fn fetch(&self) -> Result<WeatherReport, WeatherError> {
        let response: ApiResponse = self
            .agent
            .get(ENDPOINT)
            .query("q", &self.config.city)
            .query("appid", &self.config.api_key)
            .query("units", "metric")
            .call()?
            .into_json()?;
        report_from(response)
    }
}

/// fetch on a background thread every `interval` and report over `sender`
///
/// lookup failures are logged and reported as a message, never fatal, and
/// the thread winds down once the receiving side goes away
pub fn spawn_poller(
    checker: WeatherChecker,
    interval: Duration,
    sender: Sender<Message>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || loop {
        let message = match checker.fetch() {
            Ok(report) => Message::WeatherUpdated(report),
            Err(err) => {
                log::warn!("{err}");
                Message::WeatherUnavailable(err.to_string())
            }
        };
        if sender.send(message).is_err() {
            break;
        }
        thread::sleep(interval);
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn alerts_on_severe_conditions() {
        assert!(should_alert("Rain"));
        assert!(should_alert("Snow"));
        assert!(should_alert("Thunderstorm"));
    }

    #[test]
    fn stays_quiet_on_mild_conditions() {
        assert!(!should_alert("Clear"));
        assert!(!should_alert("Clouds"));
        assert!(!should_alert("Drizzle"));
        assert!(!should_alert(""));
    }

    #[test]
    fn decodes_current_conditions() {
        let body = r#"{
            "weather": [{"id": 500, "main": "Rain", "description": "light rain"}],
            "main": {"temp": 11.4, "feels_like": 10.8, "humidity": 81}
        }"#;
        let response: ApiResponse = serde_json::from_str(body).unwrap();
        let report = report_from(response).unwrap();
        assert_eq!(report.condition, "Rain");
        assert!((report.temp_c - 11.4).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_conditions_are_an_error() {
        let body = r#"{"weather": [], "main": {"temp": 0.0}}"#;
        let response: ApiResponse = serde_json::from_str(body).unwrap();
        assert!(matches!(
            report_from(response).unwrap_err(),
            WeatherError::Empty
        ));
    }
}
