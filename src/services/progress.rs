//! Category progress calculator
//!
//! Turns a category's target, assigned, and available amounts into a
//! two-bar progress descriptor plus a hint explaining the state.
//!
//! Calculation happens in two steps. [`ProgressCase::classify`] maps the
//! three amounts to exactly one case by matching on how `assigned` compares
//! to the target and how `available` compares to zero and to `assigned`.
//! [`Progress::for_case`] then renders that case.
//!
//! Bars are left-anchored fractions of a track. The solid bar (`bar1`) is
//! drawn over its lite underlay (`bar1_lite`): the lite part shows what was
//! assigned, the solid part what is still available. The secondary track
//! (`bar2`, `bar2_lite`) only appears once the target is funded, either to
//! show surplus assigned beyond the target or overspending beyond the
//! funded amount. Remaining money fills the target portion before the
//! surplus portion.

use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

use crate::models::Money;

/// Palette used by progress bars
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum ProgressColor {
    Grey,
    Green,
    GreenLite,
    Yellow,
    YellowLite,
    Red,
    Primary,
    PrimaryLite,
    #[default]
    Unknown,
}

/// One bar segment: a fraction of the track and its color
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProgressBar {
    pub fraction: f64,
    pub color: ProgressColor,
}

impl ProgressBar {
    pub const fn new(fraction: f64, color: ProgressColor) -> Self {
        Self { fraction, color }
    }

    /// An empty grey segment
    pub const fn empty() -> Self {
        Self::new(0.0, ProgressColor::Grey)
    }

    pub const fn full(color: ProgressColor) -> Self {
        Self::new(1.0, color)
    }
}

/// Why a category is in its current state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum UserHint {
    #[default]
    NoHint,
    AllSpent,
    FullyFunded,
    AssignMoreOrRemoveSpending(Money),
    ExtraMoney(Money),
    MoreNeedForBudgetTarget(Money),
    Spent(Money),
    SpentMoreThanAvailable(Money),
}

impl UserHint {
    /// The amount carried by the hint, if any
    pub fn amount(&self) -> Option<Money> {
        match self {
            Self::NoHint | Self::AllSpent | Self::FullyFunded => None,
            Self::AssignMoreOrRemoveSpending(m)
            | Self::ExtraMoney(m)
            | Self::MoreNeedForBudgetTarget(m)
            | Self::Spent(m)
            | Self::SpentMoreThanAvailable(m) => Some(*m),
        }
    }
}

impl fmt::Display for UserHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoHint => Ok(()),
            Self::AllSpent => write!(f, "All money spent"),
            Self::FullyFunded => write!(f, "Fully funded"),
            Self::AssignMoreOrRemoveSpending(m) => {
                write!(f, "Overspent by {}, assign more or remove spending", m)
            }
            Self::ExtraMoney(m) => write!(f, "{} more than the target", m),
            Self::MoreNeedForBudgetTarget(m) => write!(f, "{} more needed for the target", m),
            Self::Spent(m) => write!(f, "Spent {}", m),
            Self::SpentMoreThanAvailable(m) => write!(f, "Spent {} more than available", m),
        }
    }
}

/// How much of the assigned money has been spent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpendingState {
    /// Available is negative
    Overspent,
    /// Available is exactly zero
    AllSpent,
    /// Available is positive but below assigned
    PartlySpent,
    /// Available is at least what was assigned
    Untouched,
}

impl SpendingState {
    pub fn classify(assigned: Money, available: Money) -> Self {
        match (available.signum(), available.cmp(&assigned)) {
            (Ordering::Less, _) => Self::Overspent,
            (Ordering::Equal, _) => Self::AllSpent,
            (Ordering::Greater, Ordering::Less) => Self::PartlySpent,
            (Ordering::Greater, _) => Self::Untouched,
        }
    }
}

/// The branch of the progress decision tree a category falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProgressCase {
    /// No target, nothing assigned, nothing overspent
    Empty,
    /// No target, nothing assigned, but money was spent
    UnassignedOverspent,
    /// No target, some money assigned
    NoTarget(SpendingState),
    /// Target set, nothing assigned and nothing available
    Unfunded,
    /// Target set, assigned below it
    Underfunded(SpendingState),
    /// Target set, assigned exactly matches it
    Funded(SpendingState),
    /// Target set, assigned beyond it
    Overfunded(SpendingState),
}

impl ProgressCase {
    /// Pick the case for a set of amounts
    ///
    /// A target of zero or below counts as "no target".
    pub fn classify(budget_target: Money, assigned: Money, available: Money) -> Self {
        if !budget_target.is_positive() {
            return match (assigned.signum(), available.signum()) {
                (Ordering::Greater, _) => {
                    Self::NoTarget(SpendingState::classify(assigned, available))
                }
                (Ordering::Equal, Ordering::Less) => Self::UnassignedOverspent,
                _ => Self::Empty,
            };
        }

        let spending = SpendingState::classify(assigned, available);
        match (
            assigned.cmp(&budget_target),
            available.signum(),
            available.cmp(&assigned),
        ) {
            (Ordering::Less, Ordering::Equal, Ordering::Equal | Ordering::Greater) => {
                Self::Unfunded
            }
            (Ordering::Less, _, _) => Self::Underfunded(spending),
            (Ordering::Equal, _, _) => Self::Funded(spending),
            (Ordering::Greater, _, _) => Self::Overfunded(spending),
        }
    }
}

/// Renderable progress for one category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Progress {
    pub bar1: ProgressBar,
    pub bar1_lite: ProgressBar,
    pub bar2: Option<ProgressBar>,
    pub bar2_lite: Option<ProgressBar>,
    /// Whether the secondary bar uses a color of its own
    pub secondary_colored: bool,
    pub hint: UserHint,
}

impl Progress {
    /// Nothing to show
    pub fn empty() -> Self {
        Self::primary(ProgressBar::empty(), ProgressBar::empty(), UserHint::NoHint)
    }

    fn primary(bar1: ProgressBar, bar1_lite: ProgressBar, hint: UserHint) -> Self {
        Self {
            bar1,
            bar1_lite,
            bar2: None,
            bar2_lite: None,
            secondary_colored: false,
            hint,
        }
    }

    fn with_secondary(mut self, bar2: ProgressBar, bar2_lite: Option<ProgressBar>) -> Self {
        self.secondary_colored = bar2.color != self.bar1.color;
        self.bar2 = Some(bar2);
        self.bar2_lite = bar2_lite;
        self
    }

    /// Render a classified case
    pub fn for_case(
        case: ProgressCase,
        budget_target: Money,
        assigned: Money,
        available: Money,
    ) -> Self {
        use ProgressColor::*;
        use SpendingState::*;

        let overspent_by = available.abs();

        match case {
            ProgressCase::Empty => Self::empty(),

            ProgressCase::UnassignedOverspent => Self::primary(
                ProgressBar::full(Red),
                ProgressBar::empty(),
                UserHint::AssignMoreOrRemoveSpending(overspent_by),
            ),

            ProgressCase::NoTarget(state) => {
                let lite = ProgressBar::full(GreenLite);
                match state {
                    Overspent => Self::primary(
                        ProgressBar::full(Red),
                        lite,
                        UserHint::SpentMoreThanAvailable(overspent_by),
                    ),
                    AllSpent => {
                        Self::primary(ProgressBar::new(0.0, Green), lite, UserHint::AllSpent)
                    }
                    PartlySpent => Self::primary(
                        ProgressBar::new(available.ratio_of(assigned), Green),
                        lite,
                        UserHint::Spent(assigned - available),
                    ),
                    Untouched => Self::primary(ProgressBar::full(Green), lite, UserHint::NoHint),
                }
            }

            ProgressCase::Unfunded => Self::primary(
                ProgressBar::new(0.0, Yellow),
                ProgressBar::new(0.0, YellowLite),
                UserHint::MoreNeedForBudgetTarget(budget_target),
            ),

            ProgressCase::Underfunded(state) => {
                let funded = assigned.max(Money::zero(assigned.currency()));
                let lite = ProgressBar::new(funded.ratio_of(budget_target), YellowLite);
                let needed = UserHint::MoreNeedForBudgetTarget(budget_target - funded);
                match state {
                    Overspent => Self::primary(
                        ProgressBar::full(Red),
                        lite,
                        UserHint::AssignMoreOrRemoveSpending(overspent_by),
                    ),
                    AllSpent => Self::primary(ProgressBar::new(0.0, Yellow), lite, needed),
                    PartlySpent | Untouched => Self::primary(
                        ProgressBar::new(available.ratio_of(budget_target), Yellow),
                        lite,
                        needed,
                    ),
                }
            }

            ProgressCase::Funded(state) => {
                let lite = ProgressBar::full(GreenLite);
                match state {
                    Overspent => Self::primary(
                        ProgressBar::new(0.0, Green),
                        lite,
                        UserHint::SpentMoreThanAvailable(overspent_by),
                    )
                    .with_secondary(
                        ProgressBar::new(overspent_by.ratio_of(budget_target), Red),
                        None,
                    ),
                    AllSpent => {
                        Self::primary(ProgressBar::new(0.0, Green), lite, UserHint::AllSpent)
                    }
                    PartlySpent => Self::primary(
                        ProgressBar::new(available.ratio_of(budget_target), Green),
                        lite,
                        UserHint::Spent(assigned - available),
                    ),
                    Untouched => {
                        Self::primary(ProgressBar::full(Green), lite, UserHint::FullyFunded)
                    }
                }
            }

            ProgressCase::Overfunded(state) => {
                let lite = ProgressBar::full(GreenLite);
                let surplus = assigned - budget_target;
                let surplus_lite = Some(ProgressBar::full(PrimaryLite));
                match state {
                    Overspent => Self::primary(
                        ProgressBar::new(0.0, Green),
                        lite,
                        UserHint::SpentMoreThanAvailable(overspent_by),
                    )
                    .with_secondary(
                        ProgressBar::new(overspent_by.ratio_of(budget_target), Red),
                        None,
                    ),
                    AllSpent => {
                        Self::primary(ProgressBar::new(0.0, Green), lite, UserHint::AllSpent)
                            .with_secondary(ProgressBar::new(0.0, Primary), surplus_lite)
                    }
                    PartlySpent => Self::primary(
                        ProgressBar::new(available.ratio_of(budget_target), Green),
                        lite,
                        UserHint::Spent(assigned - available),
                    )
                    .with_secondary(
                        ProgressBar::new((available - budget_target).ratio_of(surplus), Primary),
                        surplus_lite,
                    ),
                    Untouched => Self::primary(
                        ProgressBar::full(Green),
                        lite,
                        UserHint::ExtraMoney(available - budget_target),
                    )
                    .with_secondary(ProgressBar::full(Primary), surplus_lite),
                }
            }
        }
    }

    /// All bars present, each within `[0, 1]`
    pub fn bars(&self) -> impl Iterator<Item = &ProgressBar> {
        [Some(&self.bar1), Some(&self.bar1_lite)]
            .into_iter()
            .chain([self.bar2.as_ref(), self.bar2_lite.as_ref()])
            .flatten()
    }
}

/// Compute progress for a category
///
/// Total over every combination of amounts; a target of zero (or below)
/// means the category has no target.
pub fn progress(budget_target: Money, assigned: Money, available: Money) -> Progress {
    let case = ProgressCase::classify(budget_target, assigned, available);
    Progress::for_case(case, budget_target, assigned, available)
}
