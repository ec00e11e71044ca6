use chrono::{DateTime, Local, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Timelike};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ComposerPhase {
    #[default]
    Idle,
    PickingDate,
    /// The date was confirmed and its dialog closed; the time dialog is not up yet.
    DateDismissed,
    PickingTime,
}

/// Two-step date then time composition into one local timestamp.
///
/// Nothing here checks that the result lies in the future; that happens when
/// the task is added.
#[derive(Debug, Clone, Default)]
pub struct DateTimeComposer {
    composed: Option<DateTime<Local>>,
    phase: ComposerPhase,
}

impl DateTimeComposer {
    pub fn phase(&self) -> ComposerPhase {
        self.phase
    }

    /// The composed timestamp, or `now` if nothing has been composed yet.
    pub fn value(&self, now: DateTime<Local>) -> DateTime<Local> {
        self.composed.unwrap_or(now)
    }

    pub fn has_value(&self) -> bool {
        self.composed.is_some()
    }

    /// Open the date step. Returns the seed the date picker should show.
    pub fn begin_date(&mut self, now: DateTime<Local>) -> DateTime<Local> {
        self.phase = ComposerPhase::PickingDate;
        self.value(now)
    }

    /// Apply the picked day, keeping the time of day of the current value.
    pub fn confirm_date(&mut self, date: NaiveDate, now: DateTime<Local>) {
        if self.phase != ComposerPhase::PickingDate {
            log::debug!("Ignoring date confirmation in phase {:?}", self.phase);
            return;
        }
        let current = self.value(now);
        let merged = date.and_time(current.time());
        self.apply(merged);
        self.phase = ComposerPhase::DateDismissed;
    }

    /// The date dialog is gone. Returns the seed for the time picker, if the
    /// time step should open now.
    pub fn date_dismissed(&mut self, now: DateTime<Local>) -> Option<DateTime<Local>> {
        if self.phase != ComposerPhase::DateDismissed {
            return None;
        }
        self.phase = ComposerPhase::PickingTime;
        Some(self.value(now))
    }

    /// Apply hour and minute to the composed day. Seconds are dropped.
    pub fn confirm_time(&mut self, time: NaiveTime, now: DateTime<Local>) {
        if self.phase != ComposerPhase::PickingTime {
            log::debug!("Ignoring time confirmation in phase {:?}", self.phase);
            return;
        }
        let current = self.value(now);
        if let Some(time) = NaiveTime::from_hms_opt(time.hour(), time.minute(), 0) {
            self.apply(current.date_naive().and_time(time));
        }
        self.phase = ComposerPhase::Idle;
    }

    /// Abandon the current step. The composed value stays as it was.
    pub fn cancel(&mut self) {
        self.phase = ComposerPhase::Idle;
    }

    /// Forget the composition entirely, e.g. after the task was saved.
    pub fn reset(&mut self) {
        self.composed = None;
        self.phase = ComposerPhase::Idle;
    }

    fn apply(&mut self, naive: NaiveDateTime) {
        match Local.from_local_datetime(&naive) {
            LocalResult::Single(dt) => self.composed = Some(dt),
            LocalResult::Ambiguous(earliest, _) => self.composed = Some(earliest),
            LocalResult::None => {
                log::warn!(
                    "Local time {} does not exist on {}, keeping previous value",
                    naive.time(),
                    naive.date().format("%Y-%m-%d")
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 5, 10, 14, 25, 42).single().unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn defaults_to_now() {
        let composer = DateTimeComposer::default();
        assert_eq!(composer.value(now()), now());
        assert!(!composer.has_value());
        assert_eq!(composer.phase(), ComposerPhase::Idle);
    }

    #[test]
    fn date_then_time_composes_one_timestamp() {
        let mut composer = DateTimeComposer::default();
        assert_eq!(composer.begin_date(now()), now());

        composer.confirm_date(date(2026, 6, 1), now());
        assert_eq!(composer.phase(), ComposerPhase::DateDismissed);
        // Time of day is carried over from the seed until the time step runs.
        assert_eq!(composer.value(now()).naive_local(), date(2026, 6, 1).and_hms_opt(14, 25, 42).unwrap());

        let seed = composer.date_dismissed(now()).unwrap();
        assert_eq!(seed.date_naive(), date(2026, 6, 1));
        assert_eq!(composer.phase(), ComposerPhase::PickingTime);

        composer.confirm_time(NaiveTime::from_hms_opt(9, 5, 33).unwrap(), now());
        assert_eq!(composer.phase(), ComposerPhase::Idle);
        assert_eq!(composer.value(now()).naive_local(), date(2026, 6, 1).and_time(time(9, 5)));
    }

    #[test]
    fn time_step_waits_for_dismissal() {
        let mut composer = DateTimeComposer::default();
        composer.begin_date(now());
        assert_eq!(composer.date_dismissed(now()), None);

        composer.confirm_date(date(2026, 6, 2), now());
        composer.confirm_time(time(8, 0), now());
        // Still waiting for the date dialog to go away.
        assert_eq!(composer.phase(), ComposerPhase::DateDismissed);
        assert_eq!(composer.value(now()).date_naive(), date(2026, 6, 2));
        assert_eq!(composer.value(now()).hour(), 14);
    }

    #[test]
    fn cancel_keeps_previous_composition() {
        let mut composer = DateTimeComposer::default();
        composer.begin_date(now());
        composer.confirm_date(date(2026, 7, 4), now());
        composer.date_dismissed(now());
        composer.confirm_time(time(20, 0), now());
        let composed = composer.value(now());

        composer.begin_date(now());
        composer.cancel();
        assert_eq!(composer.value(now()), composed);

        composer.begin_date(now());
        composer.confirm_date(date(2026, 7, 5), now());
        composer.date_dismissed(now());
        composer.cancel();
        // The date step had already been applied before the time step was cancelled.
        assert_eq!(composer.value(now()).date_naive(), date(2026, 7, 5));
        assert_eq!(composer.value(now()).hour(), 20);
    }

    #[test]
    fn cancel_without_composition_stays_now() {
        let mut composer = DateTimeComposer::default();
        composer.begin_date(now());
        composer.cancel();
        assert!(!composer.has_value());
        assert_eq!(composer.value(now()), now());
    }

    #[test]
    fn past_values_are_allowed() {
        let mut composer = DateTimeComposer::default();
        composer.begin_date(now());
        composer.confirm_date(date(2020, 1, 1), now());
        assert!(composer.value(now()) < now());
    }

    #[test]
    fn reset_clears() {
        let mut composer = DateTimeComposer::default();
        composer.begin_date(now());
        composer.confirm_date(date(2026, 8, 8), now());
        composer.reset();
        assert!(!composer.has_value());
        assert_eq!(composer.phase(), ComposerPhase::Idle);
    }
}
