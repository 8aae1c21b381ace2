use chrono::{DateTime, NaiveDate, Utc};

/// Source of "now" for session start times and history dates
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Wall-clock time
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Pretends today is `date` while keeping the real time of day
///
/// Backs the `--override-date` flag.
pub struct OverrideDateClock {
    date: NaiveDate,
}

impl OverrideDateClock {
    pub fn new(date: NaiveDate) -> Self {
        Self { date }
    }
}

impl Clock for OverrideDateClock {
    fn now(&self) -> DateTime<Utc> {
        self.date.and_time(Utc::now().time()).and_utc()
    }
}

/// Always returns the same instant
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
