//! Budget calculators
//!
//! The contribution and progress calculators are pure functions invoked per
//! category. The ready-to-assign aggregator is the one stateful piece: it
//! recombines account balances and category statuses whenever either side
//! changes.

pub mod contribution;
pub mod progress;
pub mod ready_to_assign;

pub use contribution::{months_span, savings_contribution, target_contribution, TargetContribution};
pub use progress::{
    progress, Progress, ProgressBar, ProgressCase, ProgressColor, SpendingState, UserHint,
};
pub use ready_to_assign::{
    ready_to_assign, AggregatorHandle, AssignState, BudgetUpdate, OverspentCategory,
    ReadyToAssign, ReadyToAssignAggregator,
};
