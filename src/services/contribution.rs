//! Target contribution calculator
//!
//! Works out how much still has to be assigned this month for a category to
//! stay on pace with its goal. Savings goals are amortized over whole
//! calendar months; spending targets are a flat monthly need.

use chrono::NaiveDate;

use crate::models::{Category, Money, TargetType, YearMonth};

/// Money still to assign this month, or `None` when the category has no goal
pub type TargetContribution = Option<Money>;

/// Compute the contribution needed for `category` this month
///
/// `today` is injected so results are deterministic.
pub fn target_contribution(
    category: &Category,
    available: Money,
    today: NaiveDate,
) -> TargetContribution {
    match category.target_type {
        TargetType::None => None,
        TargetType::NeededForSpending => category.target_amount,
        TargetType::SavingsBalance => {
            let amount = category.target_amount?;
            let date = category.target_date?;
            Some(savings_contribution(amount, date, available, today))
        }
    }
}

/// Monthly amount needed to grow `available` to `target` by `target_date`
pub fn savings_contribution(
    target: Money,
    target_date: NaiveDate,
    available: Money,
    today: NaiveDate,
) -> Money {
    let zero = Money::zero(target.currency());

    if target_date < today {
        return zero;
    }

    let remaining = target - available;
    if !remaining.is_positive() {
        return zero;
    }

    let span = months_span(today, target_date);
    if span <= 1 {
        return remaining;
    }

    // span is bounded by the calendar range, far below u32::MAX
    remaining.div_rounded(u32::try_from(span).unwrap_or(u32::MAX))
}

/// Calendar months from the month of `today` through the month of `target`,
/// both inclusive (same month is 1, next month is 2)
pub fn months_span(today: NaiveDate, target: NaiveDate) -> i64 {
    YearMonth::from_date(today).months_until(YearMonth::from_date(target)) + 1
}
