use chrono::{NaiveTime, Timelike};

use crate::{
    alarm::{Alarm, InvalidTime},
    store::AlarmStore,
};

/// owns every alarm and decides when they go off
///
/// all mutation goes through here so the store can be rewritten after each
/// change
#[derive(Debug)]
pub struct AlarmManager {
    store: AlarmStore,
    alarms: Vec<Alarm>,
}

impl AlarmManager {
    /// loads whatever the store has, a missing or broken file means starting
    /// empty
    #[must_use]
    pub fn new(store: AlarmStore) -> Self {
        let alarms = store.load();
        Self { store, alarms }
    }

    /// create and keep a new alarm, then write the collection back out
    ///
    /// the alarm stays in memory even if the write fails, the next save picks
    /// it up
    pub fn add(
        &mut self,
        hour: u32,
        minute: u32,
        message: impl Into<String>,
        recurring: bool,
    ) -> Result<(), InvalidTime> {
        let alarm = Alarm::new(hour, minute, message, recurring)?;
        self.alarms.push(alarm);
        self.store.save(&self.alarms);
        Ok(())
    }

    /// drop the alarm with the given id if it is still around
    pub fn remove(&mut self, id: u64) {
        let before = self.alarms.len();
        self.alarms.retain(|alarm| alarm.id != id);
        if self.alarms.len() != before {
            self.store.save(&self.alarms);
        }
    }

    /// every alarm ordered by time of day, ties keep their insertion order
    #[must_use]
    pub fn upcoming(&self) -> Vec<&Alarm> {
        let mut alarms: Vec<&Alarm> = self.alarms.iter().collect();
        alarms.sort_by_key(|alarm| (alarm.hour(), alarm.minute()));
        alarms
    }

    /// the collection in insertion order
    #[must_use]
    pub fn alarms(&self) -> &[Alarm] {
        &self.alarms
    }

    /// the periodic due check, call it at least once per minute
    ///
    /// marks and returns every alarm matching `now`'s hour and minute that
    /// has not gone off yet today, clears all fired-flags when `now` is
    /// midnight, drops one-shot alarms that just fired, and saves if
    /// anything fired
    ///
    /// calling again within the same minute returns nothing new, except at
    /// 00:00: the midnight reset runs in the same tick as the due check, so
    /// a recurring alarm set for 00:00 has its flag cleared right after
    /// firing and a second call within that minute fires it again
    pub fn evaluate_tick(&mut self, now: NaiveTime) -> Vec<Alarm> {
        let mut due = Vec::new();
        for alarm in &mut self.alarms {
            if alarm.is_due(now) {
                alarm.triggered_today = true;
                due.push(alarm.clone());
            }
        }

        if now.hour() == 0 && now.minute() == 0 {
            for alarm in &mut self.alarms {
                alarm.triggered_today = false;
            }
        }

        let spent: Vec<u64> = due
            .iter()
            .filter(|alarm| !alarm.recurring)
            .map(|alarm| alarm.id)
            .collect();
        self.alarms.retain(|alarm| !spent.contains(&alarm.id));

        if !due.is_empty() {
            log::info!("{} alarm(s) due at {now}", due.len());
            self.store.save(&self.alarms);
        }
        due
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn at(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    fn manager_in(dir: &tempfile::TempDir) -> AlarmManager {
        AlarmManager::new(AlarmStore::new(dir.path().join("alarms.json")))
    }

    #[test]
    fn recurring_alarm_fires_and_stays() {
        let dir = tempfile::tempdir().unwrap();
        let mut manager = manager_in(&dir);
        manager.add(7, 30, "wake", true).unwrap();

        let due = manager.evaluate_tick(at(7, 30));
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].message, "wake");

        assert_eq!(manager.alarms().len(), 1);
        assert!(manager.alarms()[0].triggered_today);
        assert!(manager.evaluate_tick(at(7, 31)).is_empty());
    }

    #[test]
    fn second_tick_in_the_same_minute_fires_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut manager = manager_in(&dir);
        manager.add(7, 30, "wake", true).unwrap();

        assert_eq!(manager.evaluate_tick(at(7, 30)).len(), 1);
        assert!(manager.evaluate_tick(at(7, 30)).is_empty());
    }

    #[test]
    fn one_shot_alarm_is_removed_after_firing() {
        let dir = tempfile::tempdir().unwrap();
        let mut manager = manager_in(&dir);
        manager.add(9, 0, "meeting", false).unwrap();

        let due = manager.evaluate_tick(at(9, 0));
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].message, "meeting");
        assert!(manager.alarms().is_empty());
        assert!(manager.evaluate_tick(at(9, 0)).is_empty());
    }

    #[test]
    fn nothing_fires_at_other_times() {
        let dir = tempfile::tempdir().unwrap();
        let mut manager = manager_in(&dir);
        manager.add(9, 0, "meeting", false).unwrap();

        assert!(manager.evaluate_tick(at(8, 59)).is_empty());
        assert!(manager.evaluate_tick(at(9, 1)).is_empty());
        assert!(manager.evaluate_tick(at(21, 0)).is_empty());
        assert_eq!(manager.alarms().len(), 1);
    }

    #[test]
    fn upcoming_sorts_by_time_of_day() {
        let dir = tempfile::tempdir().unwrap();
        let mut manager = manager_in(&dir);
        manager.add(14, 0, "a", false).unwrap();
        manager.add(6, 0, "b", false).unwrap();

        let upcoming = manager.upcoming();
        assert_eq!(upcoming[0].message, "b");
        assert_eq!(upcoming[1].message, "a");
        // the stored order is untouched
        assert_eq!(manager.alarms()[0].message, "a");
    }

    #[test]
    fn upcoming_keeps_insertion_order_for_ties() {
        let dir = tempfile::tempdir().unwrap();
        let mut manager = manager_in(&dir);
        manager.add(6, 0, "first", false).unwrap();
        manager.add(6, 0, "second", false).unwrap();

        let upcoming = manager.upcoming();
        assert_eq!(upcoming[0].message, "first");
        assert_eq!(upcoming[1].message, "second");
    }

    #[test]
    fn duplicate_one_shots_both_fire_and_both_go() {
        let dir = tempfile::tempdir().unwrap();
        let mut manager = manager_in(&dir);
        manager.add(8, 0, "pills", false).unwrap();
        manager.add(8, 0, "pills", false).unwrap();

        assert_eq!(manager.evaluate_tick(at(8, 0)).len(), 2);
        assert!(manager.alarms().is_empty());
    }

    #[test]
    fn midnight_tick_clears_flags_after_firing() {
        let dir = tempfile::tempdir().unwrap();
        let mut manager = manager_in(&dir);
        manager.add(0, 0, "new day", true).unwrap();
        manager.add(7, 30, "wake", true).unwrap();
        assert_eq!(manager.evaluate_tick(at(7, 30)).len(), 1);

        let due = manager.evaluate_tick(at(0, 0));
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].message, "new day");
        // every flag was reset in the same tick, including the one that just
        // fired, which is why the midnight alarm can ring again within this
        // minute
        assert!(manager.alarms().iter().all(|a| !a.triggered_today));
    }

    #[test]
    fn removes_only_the_given_id() {
        let dir = tempfile::tempdir().unwrap();
        let mut manager = manager_in(&dir);
        manager.add(8, 0, "pills", true).unwrap();
        manager.add(8, 0, "pills", true).unwrap();

        let keep = manager.alarms()[1].id;
        let gone = manager.alarms()[0].id;
        manager.remove(gone);
        assert_eq!(manager.alarms().len(), 1);
        assert_eq!(manager.alarms()[0].id, keep);
    }

    #[test]
    fn invalid_time_is_rejected_and_nothing_changes() {
        let dir = tempfile::tempdir().unwrap();
        let mut manager = manager_in(&dir);
        assert!(manager.add(24, 0, "never", false).is_err());
        assert!(manager.alarms().is_empty());
        assert!(manager_in(&dir).alarms().is_empty());
    }

    #[test]
    fn mutations_are_persisted() {
        let dir = tempfile::tempdir().unwrap();
        let mut manager = manager_in(&dir);
        manager.add(9, 0, "meeting", false).unwrap();
        assert_eq!(manager_in(&dir).alarms().len(), 1);

        manager.evaluate_tick(at(9, 0));
        // the one-shot's removal was written out too
        assert!(manager_in(&dir).alarms().is_empty());
    }

    #[test]
    fn restart_resets_triggered_flags() {
        let dir = tempfile::tempdir().unwrap();
        let mut manager = manager_in(&dir);
        manager.add(7, 30, "wake", true).unwrap();
        manager.evaluate_tick(at(7, 30));
        assert!(manager.alarms()[0].triggered_today);

        let reloaded = manager_in(&dir);
        assert_eq!(reloaded.alarms().len(), 1);
        assert!(!reloaded.alarms()[0].triggered_today);
    }
}
