//! Transaction engine.
//!
//! Validates and executes transfers and withdrawals against the shared
//! [`AccountStore`], appending an immutable [`TransactionRecord`] to the
//! affected accounts on success. Preconditions are checked before any
//! mutation, so a failed operation leaves the store untouched.

use std::sync::Arc;

use crate::model::{Account, TransactionRecord};
use crate::money::Money;
use crate::store::AccountStore;

mod error;
pub use error::EngineError;

/// The transfer/withdrawal engine. Cheap to clone handles of; all state
/// lives in the store.
pub struct TransactionEngine {
    store: Arc<AccountStore>,
}

impl TransactionEngine {
    pub fn new(store: Arc<AccountStore>) -> Self {
        Self { store }
    }

    /// Move `value` from one account to another.
    ///
    /// Precondition order: both accounts exist, the source is not a savings
    /// account, and the debit (converted to the source currency) leaves the
    /// source balance non-negative. The destination is credited with `value`
    /// converted to its own currency.
    ///
    /// A self-transfer (`from == to`) is balance-neutral but still validated,
    /// and the record lands twice in the single history, once per leg.
    pub fn transfer(
        &self,
        from: &str,
        to: &str,
        value: Money,
    ) -> Result<Arc<TransactionRecord>, EngineError> {
        if !self.store.exists(from) {
            return Err(EngineError::AccountNotFound(from.to_owned()));
        }
        if !self.store.exists(to) {
            return Err(EngineError::AccountNotFound(to.to_owned()));
        }

        let result = if from == to {
            self.store.with_account(from, |account| {
                if account.is_savings() {
                    return Err(EngineError::ForbiddenSourceType(account.id.clone()));
                }
                checked_debit(account, value)?;
                credit(account, value);
                let record = Arc::new(TransactionRecord::new(
                    from.to_owned(),
                    to.to_owned(),
                    value,
                ));
                account.record(record.clone());
                account.record(record.clone());
                Ok(record)
            })
        } else {
            self.store.with_pair(from, to, |src, dst| {
                if src.is_savings() {
                    return Err(EngineError::ForbiddenSourceType(src.id.clone()));
                }
                checked_debit(src, value)?;
                credit(dst, value);
                let record = Arc::new(TransactionRecord::new(
                    from.to_owned(),
                    to.to_owned(),
                    value,
                ));
                src.record(record.clone());
                dst.record(record.clone());
                Ok(record)
            })
        };

        // Accounts are never removed, so the ids resolved above still do.
        result.ok_or_else(|| EngineError::AccountNotFound(from.to_owned()))?
    }

    /// Debit `amount` from a single account. The record has `from == to`.
    ///
    /// There is no account-kind restriction here: savings accounts may be
    /// drawn down directly even though they cannot fund a transfer.
    pub fn withdraw(
        &self,
        account_id: &str,
        amount: Money,
    ) -> Result<Arc<TransactionRecord>, EngineError> {
        let result = self.store.with_account(account_id, |account| {
            checked_debit(account, amount)?;
            let record = Arc::new(TransactionRecord::new(
                account_id.to_owned(),
                account_id.to_owned(),
                amount,
            ));
            account.record(record.clone());
            Ok(record)
        });

        result.ok_or_else(|| EngineError::AccountNotFound(account_id.to_owned()))?
    }

    /// Current balance of an account.
    pub fn check_funds(&self, account_id: &str) -> Result<Money, EngineError> {
        self.store
            .with_account(account_id, |account| account.balance)
            .ok_or_else(|| EngineError::AccountNotFound(account_id.to_owned()))
    }

    /// Transaction history of an account, in chronological order.
    pub fn retrieve_transactions(
        &self,
        account_id: &str,
    ) -> Result<Vec<Arc<TransactionRecord>>, EngineError> {
        self.store
            .with_account(account_id, |account| account.transactions().to_vec())
            .ok_or_else(|| EngineError::AccountNotFound(account_id.to_owned()))
    }
}

/// Subtract `value` from the account balance, converting to the account's
/// currency first. Fails without mutating if the result would be negative.
///
/// The sufficiency check and the subtraction share one conversion, so they
/// cannot disagree.
fn checked_debit(account: &mut Account, value: Money) -> Result<(), EngineError> {
    let debit = value.convert_to(account.balance.currency);
    let remaining = account.balance.amount - debit.amount;
    if remaining.is_negative() {
        return Err(EngineError::InsufficientFunds {
            account: account.id.clone(),
            balance: account.balance,
            requested: debit,
        });
    }
    account.balance.amount = remaining;
    Ok(())
}

/// Add `value` to the account balance, converting to the account's currency.
fn credit(account: &mut Account, value: Money) {
    account.balance.amount += value.convert_to(account.balance.currency).amount;
}
