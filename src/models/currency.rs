//! Currency tags for money amounts
//!
//! The engine never converts between currencies; the tag only guards against
//! mixing amounts from different budgets and drives display.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A two-decimal currency supported by the engine
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Usd,
    Eur,
    Gbp,
    Chf,
    Cad,
    Aud,
}

impl Currency {
    /// All supported currencies
    pub const ALL: [Currency; 6] = [
        Self::Usd,
        Self::Eur,
        Self::Gbp,
        Self::Chf,
        Self::Cad,
        Self::Aud,
    ];

    /// ISO 4217 code
    pub fn code(&self) -> &'static str {
        match self {
            Self::Usd => "USD",
            Self::Eur => "EUR",
            Self::Gbp => "GBP",
            Self::Chf => "CHF",
            Self::Cad => "CAD",
            Self::Aud => "AUD",
        }
    }

    /// Symbol used when formatting amounts
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Usd => "$",
            Self::Eur => "€",
            Self::Gbp => "£",
            Self::Chf => "CHF ",
            Self::Cad => "CA$",
            Self::Aud => "A$",
        }
    }

    /// Parse a currency from its ISO code (case-insensitive) or its symbol
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL.into_iter().find(|c| {
            c.code().eq_ignore_ascii_case(s) || c.symbol().trim_end() == s
        })
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
