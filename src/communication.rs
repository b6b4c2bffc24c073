use crate::weather::WeatherReport;

/// what the background weather thread sends back to the gui thread
#[derive(Debug, Clone)]
pub enum Message {
    WeatherUpdated(WeatherReport),
    /// the lookup failed, the reason is shown until a lookup succeeds
    WeatherUnavailable(String),
}
