//! Money type for representing currency amounts
//!
//! Internally stores amounts in cents (i64) to avoid floating-point drift
//! across repeated assignment edits. Rounding only happens where an amount is
//! divided (goal amortization) or turned into a display fraction.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::num::IntErrorKind;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use super::currency::Currency;
use crate::error::{EnvelopeError, EnvelopeResult};

/// A monetary amount stored as cents together with its currency
///
/// Ordering is by amount, then by currency so that it agrees with equality.
/// Amounts in different currencies are not comparable in any useful sense;
/// callers keep a budget in a single currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Money {
    cents: i64,
    #[serde(default)]
    currency: Currency,
}

impl Money {
    /// Create an amount from cents in the default currency
    ///
    /// # Examples
    /// ```
    /// use envelope_engine::models::Money;
    /// let amount = Money::from_cents(1050); // $10.50
    /// assert_eq!(amount.cents(), 1050);
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self {
            cents,
            currency: Currency::Usd,
        }
    }

    /// Create an amount from cents in a specific currency
    pub const fn new(cents: i64, currency: Currency) -> Self {
        Self { cents, currency }
    }

    /// Create an amount from whole units and cents
    ///
    /// A negative `major` carries its sign to `minor`, so `(-5, 50)` is -5.50.
    pub const fn from_major_minor(major: i64, minor: i64, currency: Currency) -> Self {
        let minor = if major < 0 { -minor.abs() } else { minor };
        Self::new(major * 100 + minor, currency)
    }

    /// A zero amount in the given currency
    pub const fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Get the amount in cents
    pub const fn cents(&self) -> i64 {
        self.cents
    }

    /// Get the currency tag
    pub const fn currency(&self) -> Currency {
        self.currency
    }

    /// Whole units (truncated toward zero)
    pub const fn major(&self) -> i64 {
        self.cents / 100
    }

    /// The cents portion (0-99)
    pub const fn minor(&self) -> i64 {
        (self.cents % 100).abs()
    }

    pub const fn is_zero(&self) -> bool {
        self.cents == 0
    }

    pub const fn is_positive(&self) -> bool {
        self.cents > 0
    }

    pub const fn is_negative(&self) -> bool {
        self.cents < 0
    }

    pub const fn abs(&self) -> Self {
        Self::new(self.cents.abs(), self.currency)
    }

    /// Sign of the amount relative to zero
    pub fn signum(&self) -> Ordering {
        self.cents.cmp(&0)
    }

    /// The larger of two amounts
    pub fn max(self, other: Self) -> Self {
        if other.cents > self.cents {
            other
        } else {
            self
        }
    }

    /// The smaller of two amounts
    pub fn min(self, other: Self) -> Self {
        if other.cents < self.cents {
            other
        } else {
            self
        }
    }

    /// Add, failing if the currencies differ
    pub fn checked_add(self, other: Self) -> EnvelopeResult<Self> {
        self.ensure_same_currency(other)?;
        Ok(Self::new(self.cents + other.cents, self.currency))
    }

    /// Subtract, failing if the currencies differ
    pub fn checked_sub(self, other: Self) -> EnvelopeResult<Self> {
        self.ensure_same_currency(other)?;
        Ok(Self::new(self.cents - other.cents, self.currency))
    }

    fn ensure_same_currency(&self, other: Self) -> EnvelopeResult<()> {
        if self.currency == other.currency {
            Ok(())
        } else {
            Err(EnvelopeError::CurrencyMismatch {
                expected: self.currency,
                found: other.currency,
            })
        }
    }

    /// Divide into `parts` equal shares, rounded half away from zero to the cent
    ///
    /// `parts == 0` returns the amount unchanged.
    pub fn div_rounded(self, parts: u32) -> Self {
        if parts == 0 {
            return self;
        }
        let divisor = i64::from(parts);
        let mut quotient = self.cents / divisor;
        let remainder = self.cents % divisor;
        if remainder.abs() * 2 >= divisor {
            quotient += self.cents.signum();
        }
        Self::new(quotient, self.currency)
    }

    /// This amount as a fraction of `whole`, clamped to `[0, 1]`
    ///
    /// Returns 0.0 when `whole` is zero or negative.
    pub fn ratio_of(&self, whole: Money) -> f64 {
        if whole.cents <= 0 {
            return 0.0;
        }
        (self.cents as f64 / whole.cents as f64).clamp(0.0, 1.0)
    }

    /// Parse a money amount in the given currency
    ///
    /// Accepts formats: "10.50", "-10.50", "$10.50", "10", "10.5"
    pub fn parse(s: &str, currency: Currency) -> Result<Self, MoneyParseError> {
        let s = s.trim();

        let (negative, s) = if let Some(stripped) = s.strip_prefix('-') {
            (true, stripped)
        } else {
            (false, s)
        };

        let s = s
            .strip_prefix(currency.symbol().trim_end())
            .unwrap_or(s)
            .trim_start();

        let invalid = || MoneyParseError::InvalidFormat(s.to_string());
        let too_large = || MoneyParseError::TooLarge(s.to_string());
        let parse_whole = |whole: &str| {
            whole.parse::<i64>().map_err(|e| match e.kind() {
                IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => too_large(),
                _ => invalid(),
            })
        };

        let cents = if let Some((whole, fraction)) = s.split_once('.') {
            if whole.is_empty() && fraction.is_empty() {
                return Err(invalid());
            }
            let whole = if whole.is_empty() {
                0
            } else {
                parse_whole(whole)?
            };

            let fraction_cents: i64 = match fraction.len() {
                0 => 0,
                1 => fraction.parse::<i64>().map_err(|_| invalid())? * 10,
                2 => fraction.parse().map_err(|_| invalid())?,
                _ => return Err(MoneyParseError::TooPrecise(s.to_string())),
            };
            if whole < 0 || fraction.starts_with(['+', '-']) {
                return Err(invalid());
            }

            whole
                .checked_mul(100)
                .and_then(|c| c.checked_add(fraction_cents))
                .ok_or_else(too_large)?
        } else {
            let whole = parse_whole(s)?;
            if whole < 0 {
                return Err(invalid());
            }
            whole.checked_mul(100).ok_or_else(too_large)?
        };

        Ok(Self::new(if negative { -cents } else { cents }, currency))
    }

    /// Format without the currency symbol ("-10.50")
    pub fn format_plain(&self) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        format!("{}{}.{:02}", sign, self.major().abs(), self.minor())
    }
}

impl PartialOrd for Money {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Money {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cents
            .cmp(&other.cents)
            .then(self.currency.cmp(&other.currency))
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero(Currency::default())
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = self.currency.symbol();
        if self.is_negative() {
            write!(f, "-{}{}.{:02}", symbol, self.major().abs(), self.minor())
        } else {
            write!(f, "{}{}.{:02}", symbol, self.major(), self.minor())
        }
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        debug_assert_eq!(self.currency, other.currency, "adding mixed currencies");
        Self::new(self.cents + other.cents, self.currency)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        debug_assert_eq!(self.currency, other.currency, "subtracting mixed currencies");
        Self::new(self.cents - other.cents, self.currency)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.cents, self.currency)
    }
}

impl std::iter::Sum for Money {
    /// Sums in the currency of the first item; an empty iterator yields a
    /// zero in the default currency.
    fn sum<I: Iterator<Item = Self>>(mut iter: I) -> Self {
        match iter.next() {
            Some(first) => iter.fold(first, |acc, m| acc + m),
            None => Money::default(),
        }
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
    TooPrecise(String),
    TooLarge(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
            MoneyParseError::TooPrecise(s) => {
                write!(f, "Money amount has more than two decimals: {}", s)
            }
            MoneyParseError::TooLarge(s) => write!(f, "Money amount is too large: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}

impl From<MoneyParseError> for EnvelopeError {
    fn from(err: MoneyParseError) -> Self {
        Self::Validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let m = Money::from_cents(1050);
        assert_eq!(m.cents(), 1050);
        assert_eq!(m.major(), 10);
        assert_eq!(m.minor(), 50);
        assert_eq!(m.currency(), Currency::Usd);
    }

    #[test]
    fn test_from_major_minor() {
        let m = Money::from_major_minor(2034, 82, Currency::Eur);
        assert_eq!(m.cents(), 203482);
        assert_eq!(m.currency(), Currency::Eur);

        assert_eq!(Money::from_major_minor(-5, 50, Currency::Usd).cents(), -550);
        assert_eq!(Money::from_major_minor(0, -25, Currency::Usd).cents(), -25);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1050)), "$10.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
        assert_eq!(format!("{}", Money::from_cents(-1050)), "-$10.50");
        assert_eq!(format!("{}", Money::from_cents(5)), "$0.05");
        assert_eq!(format!("{}", Money::new(-5, Currency::Eur)), "-€0.05");
        assert_eq!(Money::from_cents(-1050).format_plain(), "-10.50");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((-a).cents(), -1000);
    }

    #[test]
    fn test_repeated_edits_do_not_drift() {
        // 0.10 added a thousand times is exactly 100.00
        let mut total = Money::zero(Currency::Usd);
        for _ in 0..1000 {
            total += Money::from_cents(10);
        }
        assert_eq!(total, Money::from_cents(10000));

        for _ in 0..1000 {
            total -= Money::from_cents(10);
        }
        assert!(total.is_zero());
    }

    #[test]
    fn test_checked_arithmetic_rejects_mixed_currencies() {
        let usd = Money::new(100, Currency::Usd);
        let eur = Money::new(100, Currency::Eur);

        assert!(matches!(
            usd.checked_add(eur),
            Err(EnvelopeError::CurrencyMismatch { .. })
        ));
        assert!(usd.checked_sub(eur).is_err());
        assert_eq!(usd.checked_add(usd).unwrap().cents(), 200);
    }

    #[test]
    fn test_div_rounded() {
        assert_eq!(Money::from_cents(40000).div_rounded(2).cents(), 20000);
        // 1000.00 / 3 = 333.333... -> 333.33
        assert_eq!(Money::from_cents(100000).div_rounded(3).cents(), 33333);
        // 0.05 / 2 = 0.025 -> 0.03 (half away from zero)
        assert_eq!(Money::from_cents(5).div_rounded(2).cents(), 3);
        assert_eq!(Money::from_cents(-5).div_rounded(2).cents(), -3);
        // 2.00 / 3 = 0.666... -> 0.67
        assert_eq!(Money::from_cents(200).div_rounded(3).cents(), 67);
        assert_eq!(Money::from_cents(700).div_rounded(0).cents(), 700);
    }

    #[test]
    fn test_ratio_of() {
        let whole = Money::from_cents(400);
        assert_eq!(Money::from_cents(100).ratio_of(whole), 0.25);
        assert_eq!(Money::from_cents(800).ratio_of(whole), 1.0);
        assert_eq!(Money::from_cents(-100).ratio_of(whole), 0.0);
        assert_eq!(Money::from_cents(100).ratio_of(Money::from_cents(0)), 0.0);
    }

    #[test]
    fn test_parse() {
        let usd = Currency::Usd;
        assert_eq!(Money::parse("10.50", usd).unwrap().cents(), 1050);
        assert_eq!(Money::parse("$10.50", usd).unwrap().cents(), 1050);
        assert_eq!(Money::parse("-10.50", usd).unwrap().cents(), -1050);
        assert_eq!(Money::parse("-$10.50", usd).unwrap().cents(), -1050);
        assert_eq!(Money::parse("10", usd).unwrap().cents(), 1000);
        assert_eq!(Money::parse("10.5", usd).unwrap().cents(), 1050);
        assert_eq!(Money::parse("0.05", usd).unwrap().cents(), 5);
        assert_eq!(Money::parse(".75", usd).unwrap().cents(), 75);
        assert_eq!(Money::parse("€3.20", Currency::Eur).unwrap().cents(), 320);
    }

    #[test]
    fn test_parse_errors() {
        let usd = Currency::Usd;
        assert!(matches!(
            Money::parse("abc", usd),
            Err(MoneyParseError::InvalidFormat(_))
        ));
        assert!(matches!(
            Money::parse("1.234", usd),
            Err(MoneyParseError::TooPrecise(_))
        ));
        assert!(Money::parse("--5", usd).is_err());
        assert!(Money::parse(".", usd).is_err());
    }

    #[test]
    fn test_parse_rejects_amounts_that_overflow_cents() {
        let usd = Currency::Usd;
        assert!(matches!(
            Money::parse("99999999999999999", usd),
            Err(MoneyParseError::TooLarge(_))
        ));
        assert!(matches!(
            Money::parse("-99999999999999999.99", usd),
            Err(MoneyParseError::TooLarge(_))
        ));
        // i64::MAX cents is 92233720368547758.07
        assert_eq!(
            Money::parse("92233720368547758.07", usd).unwrap().cents(),
            i64::MAX
        );
        assert!(Money::parse("92233720368547758.08", usd).is_err());
        assert!(matches!(
            Money::parse("99999999999999999999999", usd),
            Err(MoneyParseError::TooLarge(_))
        ));
    }

    #[test]
    fn test_comparison() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);
        let c = Money::from_cents(1000);

        assert!(a > b);
        assert!(b < a);
        assert_eq!(a, c);
        assert_eq!(a.max(b), a);
        assert_eq!(a.min(b), b);
        assert_eq!(b.signum(), Ordering::Greater);
        assert_eq!((-b).signum(), Ordering::Less);
    }

    #[test]
    fn test_ordering_agrees_with_equality() {
        let usd = Money::new(100, Currency::Usd);
        let eur = Money::new(100, Currency::Eur);

        assert_ne!(usd, eur);
        assert_ne!(usd.cmp(&eur), Ordering::Equal);
        assert_eq!(usd.cmp(&Money::new(100, Currency::Usd)), Ordering::Equal);
        // amount still decides first
        assert!(Money::new(50, Currency::Eur) < usd);

        let mut amounts = vec![usd, eur, usd];
        amounts.sort();
        amounts.dedup();
        assert_eq!(amounts.len(), 2);
    }

    #[test]
    fn test_sum() {
        let amounts = vec![
            Money::new(100, Currency::Gbp),
            Money::new(200, Currency::Gbp),
            Money::new(300, Currency::Gbp),
        ];
        let total: Money = amounts.into_iter().sum();
        assert_eq!(total, Money::new(600, Currency::Gbp));

        let empty: Money = Vec::<Money>::new().into_iter().sum();
        assert!(empty.is_zero());
    }

    #[test]
    fn test_serialization() {
        let m = Money::new(1050, Currency::Eur);
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, r#"{"cents":1050,"currency":"EUR"}"#);

        let deserialized: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(m, deserialized);

        let defaulted: Money = serde_json::from_str(r#"{"cents":25}"#).unwrap();
        assert_eq!(defaulted, Money::from_cents(25));
    }
}
