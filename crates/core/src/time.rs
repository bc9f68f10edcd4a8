use chrono::{DateTime, Duration, Local, NaiveDate, TimeZone, Utc};

use crate::model::MonthId;

/// A simple clock abstraction for deterministic time in services and tests.
#[derive(Debug, Clone, Copy, Default)]
pub enum Clock {
    #[default]
    Default,
    Fixed(DateTime<Utc>),
}

impl Clock {
    /// Returns a clock that uses the current system time.
    #[must_use]
    pub fn default_clock() -> Self {
        Self::Default
    }

    /// Returns a clock fixed at the given timestamp.
    #[must_use]
    pub fn fixed(at: DateTime<Utc>) -> Self {
        Self::Fixed(at)
    }

    /// Returns the current time according to the clock.
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::Default => Utc::now(),
            Clock::Fixed(t) => *t,
        }
    }

    /// Returns the current calendar date.
    ///
    /// For the default clock this is the local calendar date, since all
    /// tracking is anchored to the user's wall calendar. A fixed clock
    /// reports the date of its fixed instant.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        match self {
            Clock::Default => Local::now().date_naive(),
            Clock::Fixed(t) => t.date_naive(),
        }
    }

    /// Returns the current calendar month.
    #[must_use]
    pub fn current_month(&self) -> MonthId {
        MonthId::from_date(self.today())
    }

    /// If this is a fixed clock, advance it by the given duration.
    ///
    /// Has no effect on `Clock::Default`.
    pub fn advance(&mut self, delta: Duration) {
        if let Clock::Fixed(t) = self {
            *t += delta;
        }
    }

    /// Returns true if this clock represents real time.
    #[must_use]
    pub fn is_default(&self) -> bool {
        matches!(self, Clock::Default)
    }

    /// Returns true if this clock is fixed.
    #[must_use]
    pub fn is_fixed(&self) -> bool {
        matches!(self, Clock::Fixed(_))
    }
}

/// Deterministic timestamp for tests and examples (2023-11-14T22:13:20Z).
pub const FIXED_TEST_TIMESTAMP: i64 = 1_700_000_000;

/// Returns a deterministic `DateTime<Utc>` for tests and doc examples.
///
/// # Panics
///
/// Panics if the fixed timestamp cannot be represented.
#[must_use]
pub fn fixed_now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(FIXED_TEST_TIMESTAMP, 0)
        .expect("fixed timestamp should be valid")
}

/// Returns a `Clock` fixed at the deterministic test timestamp.
#[must_use]
pub fn fixed_clock() -> Clock {
    Clock::fixed(fixed_now())
}

/// Returns a `Clock` fixed at midnight UTC of the given calendar date.
///
/// Convenient for archival-boundary tests that only care about the date.
#[must_use]
pub fn clock_at(date: NaiveDate) -> Clock {
    let at = Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0).expect("midnight is valid"));
    Clock::fixed(at)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_reports_fixed_instant() {
        let clock = fixed_clock();
        assert!(clock.is_fixed());
        assert_eq!(clock.now(), fixed_now());
        assert_eq!(clock.today(), fixed_now().date_naive());
    }

    #[test]
    fn advance_moves_fixed_clock() {
        let mut clock = fixed_clock();
        clock.advance(Duration::days(1));
        assert_eq!(clock.now(), fixed_now() + Duration::days(1));
    }

    #[test]
    fn current_month_matches_today() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let clock = clock_at(date);
        assert_eq!(clock.current_month(), MonthId::from_date(date));
    }
}
