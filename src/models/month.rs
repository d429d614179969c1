//! Calendar month used as the budgeting period
//!
//! Every category ledger row belongs to exactly one `YearMonth`, and goal
//! amortization counts whole calendar months between two of them.

use chrono::{Datelike, Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A calendar month (e.g., "2025-01")
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct YearMonth {
    /// Always the first day of the month
    first: NaiveDate,
}

impl YearMonth {
    /// Create a month, returning `None` for an invalid month number or a year
    /// outside the supported calendar range
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|first| Self { first })
    }

    /// The month containing `date`
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            first: date - Duration::days(i64::from(date.day0())),
        }
    }

    /// The current month according to the local clock
    pub fn current() -> Self {
        Self::from_date(chrono::Local::now().date_naive())
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    pub fn month(&self) -> u32 {
        self.first.month()
    }

    /// First day of the month
    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    /// Last day of the month (inclusive)
    pub fn last_day(&self) -> NaiveDate {
        // only the last supported month has no successor; it ends on NaiveDate::MAX
        self.first
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(NaiveDate::MAX)
    }

    /// Number of days in this month
    pub fn days_in_month(&self) -> u32 {
        self.last_day().day()
    }

    /// Check if a date falls within this month
    pub fn contains(&self, date: NaiveDate) -> bool {
        Self::from_date(date) == *self
    }

    /// The following month (saturates at the end of the supported calendar)
    pub fn next(&self) -> Self {
        let (year, month) = if self.month() == 12 {
            (self.year() + 1, 1)
        } else {
            (self.year(), self.month() + 1)
        };
        Self::new(year, month).unwrap_or(*self)
    }

    /// The preceding month (saturates at the start of the supported calendar)
    pub fn prev(&self) -> Self {
        let (year, month) = if self.month() == 1 {
            (self.year() - 1, 12)
        } else {
            (self.year(), self.month() - 1)
        };
        Self::new(year, month).unwrap_or(*self)
    }

    /// Signed number of whole calendar months from `self` to `other`
    ///
    /// Days are ignored: 2025-01 to 2025-02 is 1 regardless of which day of
    /// February is meant.
    pub fn months_until(&self, other: YearMonth) -> i64 {
        let years = i64::from(other.year()) - i64::from(self.year());
        let months = i64::from(other.month()) - i64::from(self.month());
        years * 12 + months
    }

    /// Parse a month string ("2025-01")
    pub fn parse(s: &str) -> Result<Self, MonthParseError> {
        let s = s.trim();
        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| MonthParseError::InvalidFormat(s.to_string()))?;

        let year: i32 = year
            .parse()
            .map_err(|_| MonthParseError::InvalidFormat(s.to_string()))?;
        let month: u32 = month
            .parse()
            .map_err(|_| MonthParseError::InvalidFormat(s.to_string()))?;

        if !(1..=12).contains(&month) {
            return Err(MonthParseError::InvalidMonth(month));
        }

        Self::new(year, month).ok_or_else(|| MonthParseError::InvalidFormat(s.to_string()))
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl From<YearMonth> for String {
    fn from(month: YearMonth) -> Self {
        month.to_string()
    }
}

impl TryFrom<String> for YearMonth {
    type Error = MonthParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

/// Error type for month parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonthParseError {
    InvalidFormat(String),
    InvalidMonth(u32),
}

impl fmt::Display for MonthParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthParseError::InvalidFormat(s) => write!(f, "Invalid month format: {}", s),
            MonthParseError::InvalidMonth(m) => write!(f, "Invalid month: {}", m),
        }
    }
}

impl std::error::Error for MonthParseError {}

impl From<MonthParseError> for crate::error::EnvelopeError {
    fn from(err: MonthParseError) -> Self {
        Self::Validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ym(year: i32, month: u32) -> YearMonth {
        YearMonth::new(year, month).unwrap()
    }

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_bounds() {
        let jan = ym(2025, 1);
        assert_eq!(jan.first_day(), date(2025, 1, 1));
        assert_eq!(jan.last_day(), date(2025, 1, 31));
        assert_eq!(ym(2024, 2).last_day(), date(2024, 2, 29));
        assert_eq!(ym(2025, 2).last_day(), date(2025, 2, 28));
        assert_eq!(ym(2025, 4).days_in_month(), 30);
    }

    #[test]
    fn test_month_length_follows_gregorian_calendar() {
        assert_eq!(ym(1900, 2).days_in_month(), 28);
        assert_eq!(ym(2000, 2).days_in_month(), 29);
        assert_eq!(ym(2100, 2).last_day(), date(2100, 2, 28));
        assert_eq!(ym(2026, 12).last_day(), date(2026, 12, 31));

        let last = YearMonth::from_date(NaiveDate::MAX);
        assert_eq!(last.last_day(), NaiveDate::MAX);
        assert_eq!(last.days_in_month(), 31);
    }

    #[test]
    fn test_invalid_month() {
        assert!(YearMonth::new(2025, 0).is_none());
        assert!(YearMonth::new(2025, 13).is_none());
    }

    #[test]
    fn test_from_date() {
        assert_eq!(YearMonth::from_date(date(2026, 10, 18)), ym(2026, 10));
        assert_eq!(YearMonth::from_date(date(2026, 10, 31)), ym(2026, 10));
        assert!(ym(2026, 10).contains(date(2026, 10, 1)));
        assert!(!ym(2026, 10).contains(date(2026, 11, 1)));
    }

    #[test]
    fn test_navigation() {
        assert_eq!(ym(2025, 1).next(), ym(2025, 2));
        assert_eq!(ym(2024, 12).next(), ym(2025, 1));
        assert_eq!(ym(2025, 1).prev(), ym(2024, 12));
        assert_eq!(ym(2025, 6).prev(), ym(2025, 5));
    }

    #[test]
    fn test_months_until() {
        let oct = ym(2026, 10);
        assert_eq!(oct.months_until(oct), 0);
        assert_eq!(oct.months_until(ym(2026, 11)), 1);
        assert_eq!(oct.months_until(ym(2027, 1)), 3);
        assert_eq!(oct.months_until(ym(2026, 8)), -2);
        assert_eq!(oct.months_until(ym(2028, 10)), 24);
    }

    #[test]
    fn test_parse() {
        assert_eq!(YearMonth::parse("2025-01").unwrap(), ym(2025, 1));
        assert_eq!(
            YearMonth::parse("2025-13"),
            Err(MonthParseError::InvalidMonth(13))
        );
        assert!(matches!(
            YearMonth::parse("January"),
            Err(MonthParseError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_display_and_ordering() {
        assert_eq!(format!("{}", ym(2025, 1)), "2025-01");
        assert!(ym(2024, 12) < ym(2025, 1));
    }

    #[test]
    fn test_serialization() {
        let month = ym(2025, 3);
        let json = serde_json::to_string(&month).unwrap();
        assert_eq!(json, "\"2025-03\"");
        let deserialized: YearMonth = serde_json::from_str(&json).unwrap();
        assert_eq!(month, deserialized);
        assert!(serde_json::from_str::<YearMonth>("\"2025-00\"").is_err());
    }
}
