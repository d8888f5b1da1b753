//! Interest capitalization engine.
//!
//! Advances a simulated calendar one month at a time and credits interest
//! into savings accounts whose capitalization schedule has matured. Stepping
//! has no error cases; it is a pure scheduled mutation.

use std::sync::Arc;

use chrono::{Datelike, Months, NaiveDate};
use tracing::info;

use crate::model::AccountKind;
use crate::store::AccountStore;

/// The engine's notion of "today", decoupled from wall-clock time.
/// Seeded once at construction and only ever moved forward, explicitly.
#[derive(Debug, Clone, Copy)]
pub struct SimulatedClock {
    today: NaiveDate,
}

impl SimulatedClock {
    pub fn new(start: NaiveDate) -> Self {
        Self { today: start }
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// The date one calendar month ahead of today.
    pub fn next_month(&self) -> NaiveDate {
        self.today + Months::new(1)
    }

    fn advance_to(&mut self, date: NaiveDate) {
        debug_assert!(date >= self.today);
        self.today = date;
    }
}

pub struct InterestEngine {
    store: Arc<AccountStore>,
    clock: SimulatedClock,
}

impl InterestEngine {
    pub fn new(store: Arc<AccountStore>, start: NaiveDate) -> Self {
        Self {
            store,
            clock: SimulatedClock::new(start),
        }
    }

    pub fn clock(&self) -> &SimulatedClock {
        &self.clock
    }

    /// Advance the simulated calendar by one month.
    ///
    /// A savings account matures on this step iff `last_applied` plus its
    /// frequency's month growth lands in the same calendar month and year as
    /// the new clock date. Day-of-month never matters. On maturity the
    /// balance is credited `balance * interest_rate` (compounding per period)
    /// and `last_applied` moves to the new clock date. The clock commits
    /// whether or not anything matured.
    pub fn step(&mut self) {
        let next = self.clock.next_month();

        for id in self.store.ids() {
            self.store.with_account(&id, |account| {
                let AccountKind::Savings(terms) = &mut account.kind else {
                    return;
                };

                let due = terms.last_applied + Months::new(terms.frequency.month_growth());
                if due.month() == next.month() && due.year() == next.year() {
                    let credited = account.balance.amount.apply_rate(terms.interest_rate);
                    account.balance.amount += credited;
                    terms.last_applied = next;
                    info!(
                        account = %account.id,
                        credited = %credited,
                        balance = %account.balance,
                        applied_on = %next,
                        "interest capitalized"
                    );
                }
            });
        }

        self.clock.advance_to(next);
    }
}
