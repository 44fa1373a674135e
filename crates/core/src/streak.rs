//! Login streak: consecutive calendar days with at least one visit.

use chrono::NaiveDate;

use crate::model::ProgressRecord;
use crate::time::Clock;

/// How a visit affected the login streak.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreakOutcome {
    /// Already visited today; nothing changed.
    SameDay,
    /// Last visit was yesterday; streak extended by one.
    Continued,
    /// Gap of more than a day, clock moved backwards, or no usable last
    /// visit; streak restarted at one.
    Reset,
}

impl StreakOutcome {
    /// True when the record was modified and needs persisting.
    #[must_use]
    pub fn changed(self) -> bool {
        !matches!(self, Self::SameDay)
    }
}

/// Classifies a visit on `today` given the day of the previous visit.
#[must_use]
pub fn evaluate(last_day: Option<NaiveDate>, today: NaiveDate) -> StreakOutcome {
    match last_day {
        Some(last) if last == today => StreakOutcome::SameDay,
        Some(last) if last.succ_opt() == Some(today) => StreakOutcome::Continued,
        _ => StreakOutcome::Reset,
    }
}

/// Registers a visit at the clock's current time.
///
/// On any outcome other than `SameDay`, `last_visit` moves to now and today
/// is added to the visit log unless it is already there.
pub fn apply_visit(record: &mut ProgressRecord, clock: &Clock) -> StreakOutcome {
    let now = clock.now();
    let today = clock.calendar_day(now);
    let last_day = record.last_visit.map(|at| clock.calendar_day(at));

    let outcome = evaluate(last_day, today);
    match outcome {
        StreakOutcome::SameDay => return outcome,
        StreakOutcome::Continued => {
            record.login_streak = record.login_streak.saturating_add(1);
        }
        StreakOutcome::Reset => record.login_streak = 1,
    }

    record.last_visit = Some(now);
    if !record.visit_dates.contains(&today) {
        record.visit_dates.push(today);
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ProgressDocument;
    use crate::time::{fixed_clock, fixed_now};
    use chrono::Duration;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn evaluate_classifies_gaps() {
        let today = day(2024, 3, 1);
        assert_eq!(evaluate(Some(today), today), StreakOutcome::SameDay);
        // across a month boundary in a leap year
        assert_eq!(
            evaluate(Some(day(2024, 2, 29)), today),
            StreakOutcome::Continued
        );
        assert_eq!(
            evaluate(Some(day(2024, 2, 28)), today),
            StreakOutcome::Reset
        );
        assert_eq!(
            evaluate(Some(day(2024, 3, 2)), today),
            StreakOutcome::Reset
        );
        assert_eq!(evaluate(None, today), StreakOutcome::Reset);
    }

    #[test]
    fn same_day_visit_changes_nothing() {
        let mut clock = fixed_clock();
        let mut record = ProgressRecord::initial(&clock);
        let before = record.clone();

        clock.advance(Duration::hours(1));
        let outcome = apply_visit(&mut record, &clock);

        assert_eq!(outcome, StreakOutcome::SameDay);
        assert!(!outcome.changed());
        assert_eq!(record, before);
    }

    #[test]
    fn next_day_visit_extends_streak() {
        let mut clock = fixed_clock();
        let mut record = ProgressRecord::initial(&clock);

        clock.advance(Duration::days(1));
        assert_eq!(apply_visit(&mut record, &clock), StreakOutcome::Continued);
        clock.advance(Duration::days(1));
        assert_eq!(apply_visit(&mut record, &clock), StreakOutcome::Continued);

        assert_eq!(record.login_streak(), 3);
        assert_eq!(record.visit_dates().len(), 3);
        assert_eq!(record.last_visit(), Some(clock.now()));
    }

    #[test]
    fn next_calendar_day_counts_even_within_24_hours() {
        // fixed_now() is 22:13 UTC; two hours later is already the next day.
        let mut clock = fixed_clock();
        let mut record = ProgressRecord::initial(&clock);
        clock.advance(Duration::hours(2));
        assert_eq!(apply_visit(&mut record, &clock), StreakOutcome::Continued);
        assert_eq!(record.login_streak(), 2);
    }

    #[test]
    fn skipped_day_resets_streak() {
        let mut clock = fixed_clock();
        let mut record = ProgressRecord::initial(&clock);
        clock.advance(Duration::days(1));
        apply_visit(&mut record, &clock);

        clock.advance(Duration::days(2));
        assert_eq!(apply_visit(&mut record, &clock), StreakOutcome::Reset);
        assert_eq!(record.login_streak(), 1);
        assert_eq!(record.visit_dates().last(), Some(&clock.today()));
    }

    #[test]
    fn clock_moving_backwards_resets_streak() {
        let clock = fixed_clock();
        let mut record = ProgressRecord::initial(&clock);
        record.login_streak = 4;

        let earlier = Clock::fixed(fixed_now() - Duration::days(1));
        assert_eq!(apply_visit(&mut record, &earlier), StreakOutcome::Reset);
        assert_eq!(record.login_streak(), 1);
    }

    #[test]
    fn revisiting_a_logged_day_keeps_visit_days_distinct() {
        let mut clock = fixed_clock();
        let mut record = ProgressRecord::initial(&clock);
        let first_day = clock.today();
        clock.advance(Duration::days(1));
        apply_visit(&mut record, &clock);

        let back = Clock::fixed(fixed_now());
        assert_eq!(apply_visit(&mut record, &back), StreakOutcome::Reset);

        assert_eq!(record.login_streak(), 1);
        assert_eq!(record.visit_dates(), &[first_day, clock.today()]);
        assert_eq!(record.last_visit(), Some(fixed_now()));
    }

    #[test]
    fn missing_last_visit_resets_streak() {
        let clock = fixed_clock();
        let mut document = ProgressDocument::from(&ProgressRecord::initial(&clock));
        document.login_streak = 6;
        document.last_visit = Some("garbage".into());
        let mut record = document.recover().unwrap();

        assert_eq!(apply_visit(&mut record, &clock), StreakOutcome::Reset);
        assert_eq!(record.login_streak(), 1);
        assert_eq!(record.last_visit(), Some(fixed_now()));
    }
}
