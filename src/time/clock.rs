use chrono::{DateTime, NaiveDate, TimeZone, Utc};

/// Clock abstracts access to the current timestamp so callers can pass an
/// explicit anchor into the engine and stay deterministic in tests.
pub trait Clock: Send + Sync {
    /// Returns the current UTC timestamp.
    fn now(&self) -> DateTime<Utc>;

    /// Returns the current local date in `tz`.
    fn today_in<Tz: TimeZone>(&self, tz: &Tz) -> NaiveDate
    where
        Self: Sized,
    {
        self.now().with_timezone(tz).date_naive()
    }
}

/// Real-time clock backed by the system UTC time source.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock frozen at a fixed instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    #[test]
    fn fixed_clock_reports_local_date() {
        let clock = FixedClock(Utc.with_ymd_and_hms(2025, 3, 5, 23, 30, 0).unwrap());
        let athens = FixedOffset::east_opt(2 * 3600).unwrap();
        assert_eq!(
            clock.today_in(&athens),
            NaiveDate::from_ymd_opt(2025, 3, 6).unwrap()
        );
        assert_eq!(
            clock.today_in(&Utc),
            NaiveDate::from_ymd_opt(2025, 3, 5).unwrap()
        );
    }
}
