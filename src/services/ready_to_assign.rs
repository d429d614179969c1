//! Assignable money aggregator
//!
//! Ready-to-assign is the sum of all budget-eligible account balances minus
//! everything assigned to categories in the active month. The figure is
//! recomputed whenever either input changes: [`ReadyToAssignAggregator`]
//! keeps the latest value of each input and pushes a fresh result to its
//! subscribers on every update, and [`AggregatorHandle`] runs that
//! combinator on its own thread fed by a single channel of updates.

use serde::Serialize;
use std::sync::mpsc;
use std::thread;
use tracing::{debug, warn};

use crate::error::{EnvelopeError, EnvelopeResult};
use crate::models::{Account, CategoryId, CategoryMonthlyStatus, Currency, Money, YearMonth};

/// The category surfaced when everything is assigned but something is overspent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OverspentCategory {
    pub category_id: CategoryId,
    /// How far below zero the category's available amount is
    pub overspent_by: Money,
}

/// The global ready-to-assign figure for one month
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReadyToAssign {
    pub month: YearMonth,
    pub amount: Money,
    pub overspent_category: Option<OverspentCategory>,
}

/// How callers should present a [`ReadyToAssign`] value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignState {
    /// Money is waiting to be assigned
    ToAssign(Money),
    /// Every unit of money has a job
    FullyAssigned,
    /// Everything is assigned but a category went negative
    Overspent(OverspentCategory),
    /// More was assigned than the accounts hold
    OverAssigned(Money),
}

impl ReadyToAssign {
    pub fn state(&self) -> AssignState {
        if self.amount.is_positive() {
            AssignState::ToAssign(self.amount)
        } else if self.amount.is_negative() {
            AssignState::OverAssigned(self.amount.abs())
        } else {
            match self.overspent_category {
                Some(category) => AssignState::Overspent(category),
                None => AssignState::FullyAssigned,
            }
        }
    }
}

/// Compute ready-to-assign for `month`
///
/// Ineligible accounts (debts, investments) never contribute. Statuses for
/// other months are ignored. Entries in a currency other than `currency`
/// are skipped with a warning since no conversion is performed.
pub fn ready_to_assign(
    currency: Currency,
    month: YearMonth,
    accounts: &[Account],
    statuses: &[CategoryMonthlyStatus],
) -> ReadyToAssign {
    let zero = Money::zero(currency);

    let balances = accounts
        .iter()
        .filter(|a| a.is_budget_eligible())
        .filter(|a| {
            let same = a.balance.currency() == currency;
            if !same {
                warn!(
                    account = %a.id,
                    found = %a.balance.currency(),
                    expected = %currency,
                    "Skipping account in foreign currency"
                );
            }
            same
        })
        .fold(zero, |total, a| total + a.balance);

    let current: Vec<&CategoryMonthlyStatus> = statuses
        .iter()
        .filter(|s| {
            let in_month = s.year_month == month;
            if !in_month {
                debug!(
                    category = %s.category_id,
                    month = %s.year_month,
                    "Ignoring status for other month"
                );
            }
            in_month
        })
        .filter(|s| {
            let same = s.currency() == currency;
            if !same {
                warn!(
                    category = %s.category_id,
                    found = %s.currency(),
                    expected = %currency,
                    "Skipping category status in foreign currency"
                );
            }
            same
        })
        .collect();

    let assigned = current
        .iter()
        .fold(zero, |total, s| total + s.assigned_amount);

    let amount = balances - assigned;
    let overspent_category = if amount.is_zero() {
        most_overspent(&current)
    } else {
        None
    };

    debug!(
        %month,
        balances = %balances,
        assigned = %assigned,
        amount = %amount,
        "Recomputed ready to assign"
    );

    ReadyToAssign {
        month,
        amount,
        overspent_category,
    }
}

/// The most negative category; ties go to the lowest category id
fn most_overspent(statuses: &[&CategoryMonthlyStatus]) -> Option<OverspentCategory> {
    let status = statuses
        .iter()
        .filter(|s| s.is_overspent())
        .min_by(|a, b| {
            a.available_amount
                .cmp(&b.available_amount)
                .then_with(|| a.category_id.cmp(&b.category_id))
        })?;

    debug!(
        category = %status.category_id,
        available = %status.available_amount,
        "Overspent category selected"
    );

    Some(OverspentCategory {
        category_id: status.category_id,
        overspent_by: status.available_amount.abs(),
    })
}

/// A change on one of the two inputs
#[derive(Debug, Clone)]
pub enum BudgetUpdate {
    /// The full current set of accounts
    Accounts(Vec<Account>),
    /// The full current set of category statuses
    Statuses(Vec<CategoryMonthlyStatus>),
}

/// Combine-latest over accounts and category statuses
///
/// Nothing is emitted until both inputs have been seen at least once; after
/// that every update produces a new value. Intermediate values may be
/// transiently inconsistent when one side is updated before the other.
#[derive(Debug)]
pub struct ReadyToAssignAggregator {
    currency: Currency,
    month: YearMonth,
    accounts: Option<Vec<Account>>,
    statuses: Option<Vec<CategoryMonthlyStatus>>,
    latest: Option<ReadyToAssign>,
    subscribers: Vec<mpsc::Sender<ReadyToAssign>>,
}

impl ReadyToAssignAggregator {
    pub fn new(currency: Currency, month: YearMonth) -> Self {
        Self {
            currency,
            month,
            accounts: None,
            statuses: None,
            latest: None,
            subscribers: Vec::new(),
        }
    }

    /// Receive every future value; the latest one is replayed immediately
    pub fn subscribe(&mut self) -> mpsc::Receiver<ReadyToAssign> {
        let (sender, receiver) = mpsc::channel();
        if let Some(latest) = &self.latest {
            // the receiver is still in scope, so this cannot fail
            let _ = sender.send(latest.clone());
        }
        self.subscribers.push(sender);
        receiver
    }

    /// Store an update and recompute once both inputs are known
    pub fn apply(&mut self, update: BudgetUpdate) -> Option<&ReadyToAssign> {
        match update {
            BudgetUpdate::Accounts(accounts) => self.accounts = Some(accounts),
            BudgetUpdate::Statuses(statuses) => self.statuses = Some(statuses),
        }
        self.recompute()
    }

    /// Switch the active month
    pub fn set_month(&mut self, month: YearMonth) -> Option<&ReadyToAssign> {
        self.month = month;
        self.recompute()
    }

    pub fn month(&self) -> YearMonth {
        self.month
    }

    /// The most recent value, if both inputs have been seen
    pub fn latest(&self) -> Option<&ReadyToAssign> {
        self.latest.as_ref()
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    fn recompute(&mut self) -> Option<&ReadyToAssign> {
        let (Some(accounts), Some(statuses)) = (&self.accounts, &self.statuses) else {
            debug!("Waiting for both inputs before computing ready to assign");
            return None;
        };

        let value = ready_to_assign(self.currency, self.month, accounts, statuses);
        self.subscribers
            .retain(|subscriber| subscriber.send(value.clone()).is_ok());
        self.latest = Some(value);
        self.latest.as_ref()
    }
}

enum Command {
    Update(BudgetUpdate),
    Subscribe(mpsc::Sender<mpsc::Receiver<ReadyToAssign>>),
    Shutdown,
}

/// Runs a [`ReadyToAssignAggregator`] on a background thread
///
/// Both input streams are merged into one channel, so updates are applied
/// strictly in the order they were pushed.
pub struct AggregatorHandle {
    sender: mpsc::Sender<Command>,
    handle: Option<thread::JoinHandle<ReadyToAssignAggregator>>,
}

impl AggregatorHandle {
    /// Move `aggregator` onto its own thread
    pub fn spawn(mut aggregator: ReadyToAssignAggregator) -> Self {
        let (sender, receiver) = mpsc::channel();
        let handle = thread::spawn(move || {
            for command in receiver {
                match command {
                    Command::Update(update) => {
                        aggregator.apply(update);
                    }
                    Command::Subscribe(reply) => {
                        if reply.send(aggregator.subscribe()).is_err() {
                            debug!("Subscriber went away before the reply");
                        }
                    }
                    Command::Shutdown => break,
                }
            }
            aggregator
        });

        Self {
            sender,
            handle: Some(handle),
        }
    }

    pub fn push_accounts(&self, accounts: Vec<Account>) -> EnvelopeResult<()> {
        self.send(Command::Update(BudgetUpdate::Accounts(accounts)))
    }

    pub fn push_statuses(&self, statuses: Vec<CategoryMonthlyStatus>) -> EnvelopeResult<()> {
        self.send(Command::Update(BudgetUpdate::Statuses(statuses)))
    }

    /// Subscribe to the running aggregator
    pub fn subscribe(&self) -> EnvelopeResult<mpsc::Receiver<ReadyToAssign>> {
        let (reply, response) = mpsc::channel();
        self.send(Command::Subscribe(reply))?;
        response
            .recv()
            .map_err(|_| EnvelopeError::Aggregator("worker stopped before replying".into()))
    }

    /// Stop the worker and return the last computed value
    pub fn shutdown(mut self) -> EnvelopeResult<Option<ReadyToAssign>> {
        let aggregator = self.stop()?;
        Ok(aggregator.and_then(|a| a.latest))
    }

    fn send(&self, command: Command) -> EnvelopeResult<()> {
        self.sender
            .send(command)
            .map_err(|_| EnvelopeError::Aggregator("worker is not running".into()))
    }

    fn stop(&mut self) -> EnvelopeResult<Option<ReadyToAssignAggregator>> {
        let Some(handle) = self.handle.take() else {
            return Ok(None);
        };
        // the worker may already have exited; joining still reports its state
        let _ = self.sender.send(Command::Shutdown);
        handle
            .join()
            .map(Some)
            .map_err(|_| EnvelopeError::Aggregator("worker thread panicked".into()))
    }
}

impl Drop for AggregatorHandle {
    fn drop(&mut self) {
        if let Err(e) = self.stop() {
            warn!(error = %e, "Aggregator did not shut down cleanly");
        }
    }
}
