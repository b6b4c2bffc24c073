use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

// ids are per process and never written to disk, they only exist so that two
// alarms with the same time and message can still be told apart
fn next_id() -> u64 {
    NEXT_ID.fetch_add(1, Ordering::Relaxed)
}

/// the hour or minute given for an alarm was out of range
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid alarm time {hour}:{minute:02}, hour must be 0-23 and minute 0-59")]
pub struct InvalidTime {
    pub hour: u32,
    pub minute: u32,
}

/// one scheduled alarm
///
/// goes off every day at `time` if it is recurring, otherwise once and then
/// it is removed from the collection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "AlarmRecord", into = "AlarmRecord")]
pub struct Alarm {
    pub time: NaiveTime,
    pub message: String,
    pub recurring: bool,
    /// cleared at midnight and never saved, so every restart starts false
    pub triggered_today: bool,
    pub id: u64,
}

impl Alarm {
    /// fails if hour is not 0-23 or minute is not 0-59
    pub fn new(
        hour: u32,
        minute: u32,
        message: impl Into<String>,
        recurring: bool,
    ) -> Result<Self, InvalidTime> {
        let time = NaiveTime::from_hms_opt(hour, minute, 0).ok_or(InvalidTime { hour, minute })?;
        Ok(Self {
            time,
            message: message.into(),
            recurring,
            triggered_today: false,
            id: next_id(),
        })
    }

    #[must_use]
    pub fn hour(&self) -> u32 {
        self.time.hour()
    }

    #[must_use]
    pub fn minute(&self) -> u32 {
        self.time.minute()
    }

    /// true when the alarm should go off at `now`, meaning the hour and
    /// minute match and it has not already fired today
    #[must_use]
    pub fn is_due(&self, now: NaiveTime) -> bool {
        self.time.hour() == now.hour()
            && self.time.minute() == now.minute()
            && !self.triggered_today
    }
}

/// what actually ends up in the alarm file
#[derive(Debug, Clone, Serialize, Deserialize)]
struct AlarmRecord {
    hour: u32,
    minute: u32,
    #[serde(default)]
    message: String,
    #[serde(default)]
    recurring: bool,
}

impl TryFrom<AlarmRecord> for Alarm {
    type Error = InvalidTime;

    fn try_from(record: AlarmRecord) -> Result<Self, Self::Error> {
        Self::new(record.hour, record.minute, record.message, record.recurring)
    }
}

impl From<Alarm> for AlarmRecord {
    fn from(alarm: Alarm) -> Self {
        Self {
            hour: alarm.time.hour(),
            minute: alarm.time.minute(),
            message: alarm.message,
            recurring: alarm.recurring,
        }
    }
}
