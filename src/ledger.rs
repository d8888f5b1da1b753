//! Ledger facade bundling the transaction and interest engines over one
//! shared account store, plus an async runner for operation streams.

use std::sync::Arc;

use chrono::NaiveDate;
use tokio_stream::{Stream, StreamExt};
use tracing::info;

use crate::engine::{EngineError, TransactionEngine};
use crate::interest::InterestEngine;
use crate::model::{Operation, TransactionRecord};
use crate::money::Money;
use crate::store::AccountStore;

pub struct Ledger {
    store: Arc<AccountStore>,
    transactions: TransactionEngine,
    interest: InterestEngine,
}

impl Ledger {
    /// Build a ledger over `store`, seeding the simulated clock at `start`.
    pub fn new(store: Arc<AccountStore>, start: NaiveDate) -> Self {
        Self {
            transactions: TransactionEngine::new(store.clone()),
            interest: InterestEngine::new(store.clone(), start),
            store,
        }
    }

    pub fn store(&self) -> &Arc<AccountStore> {
        &self.store
    }

    /// Run the ledger over a stream of operations.
    ///
    /// A failed operation is logged with its reason and skipped; the stream
    /// keeps going.
    pub async fn run(&mut self, mut stream: impl Stream<Item = Operation> + Unpin) {
        while let Some(op) = stream.next().await {
            let _ = self.apply(op);
        }
    }

    /// Apply a single operation on top of the current ledger state.
    pub fn apply(&mut self, op: Operation) -> Result<(), EngineError> {
        match &op {
            Operation::Transfer { from, to, value } => {
                let result = self.transactions.transfer(from, to, *value);
                Self::log_result("transfer", &op, &result);
                result?;
            }
            Operation::Withdraw { account, amount } => {
                let result = self.transactions.withdraw(account, *amount);
                Self::log_result("withdraw", &op, &result);
                result?;
            }
            Operation::PassTime => {
                self.interest.step();
                info!(today = %self.interest.clock().today(), "calendar advanced");
            }
        }
        Ok(())
    }

    pub fn transfer(
        &self,
        from: &str,
        to: &str,
        value: Money,
    ) -> Result<Arc<TransactionRecord>, EngineError> {
        self.transactions.transfer(from, to, value)
    }

    pub fn withdraw(
        &self,
        account: &str,
        amount: Money,
    ) -> Result<Arc<TransactionRecord>, EngineError> {
        self.transactions.withdraw(account, amount)
    }

    pub fn check_funds(&self, account: &str) -> Result<Money, EngineError> {
        self.transactions.check_funds(account)
    }

    pub fn retrieve_transactions(
        &self,
        account: &str,
    ) -> Result<Vec<Arc<TransactionRecord>>, EngineError> {
        self.transactions.retrieve_transactions(account)
    }

    /// Advance the simulated calendar by one month.
    pub fn pass_time(&mut self) {
        self.interest.step();
    }

    pub fn today(&self) -> NaiveDate {
        self.interest.clock().today()
    }

    fn log_result(
        op_name: &str,
        op: &Operation,
        result: &Result<Arc<TransactionRecord>, EngineError>,
    ) {
        match result {
            Ok(record) => info!(tx = %record.id, op = ?op, "{op_name} applied"),
            Err(reason) => info!(%reason, op = ?op, "{op_name} skipped"),
        }
    }
}
