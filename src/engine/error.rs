//! Error types for ledger operations.

use thiserror::Error;

use crate::Money;
use crate::model::AccountId;

/// Validation failures surfaced by the transaction engine.
///
/// Each precondition maps to one variant; every failure aborts the operation
/// before any balance or history mutation.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("account {0} does not exist")]
    AccountNotFound(AccountId),

    #[error("account {0} is a savings account and cannot be a transfer source")]
    ForbiddenSourceType(AccountId),

    #[error("insufficient funds in account {account}: balance {balance}, requested {requested}")]
    InsufficientFunds {
        account: AccountId,
        balance: Money,
        /// The requested debit, already expressed in the account's currency.
        requested: Money,
    },
}
