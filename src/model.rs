//! Core domain types for the ledger.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::money::Money;

/// Account identifier. Unique and immutable for the life of the account.
pub type AccountId = String;

/// Transaction identifier.
pub type TxId = Uuid;

/// How often interest is capitalized into a savings balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapitalizationFrequency {
    Monthly,
    Quarterly,
}

impl CapitalizationFrequency {
    /// Months between two interest applications.
    pub fn month_growth(&self) -> u32 {
        match self {
            CapitalizationFrequency::Monthly => 1,
            CapitalizationFrequency::Quarterly => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CapitalizationFrequency::Monthly => "monthly",
            CapitalizationFrequency::Quarterly => "quarterly",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "monthly" => Some(CapitalizationFrequency::Monthly),
            "quarterly" => Some(CapitalizationFrequency::Quarterly),
            _ => None,
        }
    }
}

/// Interest schedule carried only by savings accounts.
#[derive(Debug, Clone)]
pub struct SavingsTerms {
    /// Fractional rate per capitalization period, e.g. 0.02 for 2%.
    pub interest_rate: f64,
    pub frequency: CapitalizationFrequency,
    /// Date interest was last capitalized; month/year are what matter.
    pub last_applied: NaiveDate,
}

/// Account variant. Savings-only fields live on the variant, so there is no
/// runtime field-presence check anywhere.
#[derive(Debug, Clone)]
pub enum AccountKind {
    Checking,
    Savings(SavingsTerms),
}

impl AccountKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountKind::Checking => "checking",
            AccountKind::Savings(_) => "savings",
        }
    }
}

/// A bank account: balance plus an append-only transaction history.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: AccountId,
    pub balance: Money,
    pub kind: AccountKind,
    transactions: Vec<Arc<TransactionRecord>>,
}

impl Account {
    pub fn checking(id: impl Into<AccountId>, balance: Money) -> Self {
        Self {
            id: id.into(),
            balance,
            kind: AccountKind::Checking,
            transactions: Vec::new(),
        }
    }

    pub fn savings(id: impl Into<AccountId>, balance: Money, terms: SavingsTerms) -> Self {
        Self {
            id: id.into(),
            balance,
            kind: AccountKind::Savings(terms),
            transactions: Vec::new(),
        }
    }

    pub fn is_savings(&self) -> bool {
        matches!(self.kind, AccountKind::Savings(_))
    }

    /// Append a record to the history. Insertion order is chronological
    /// order; records are never removed or mutated afterwards.
    pub fn record(&mut self, tx: Arc<TransactionRecord>) {
        self.transactions.push(tx);
    }

    pub fn transactions(&self) -> &[Arc<TransactionRecord>] {
        &self.transactions
    }
}

/// Immutable audit record of a successful transfer or withdrawal.
///
/// One record is created per successful operation and the same `Arc` is
/// appended to both affected accounts' histories. A withdrawal has
/// `from == to`.
#[derive(Debug)]
pub struct TransactionRecord {
    pub id: TxId,
    pub from: AccountId,
    pub to: AccountId,
    pub amount: Money,
    pub timestamp: DateTime<Utc>,
}

impl TransactionRecord {
    pub fn new(from: AccountId, to: AccountId, amount: Money) -> Self {
        Self {
            id: Uuid::new_v4(),
            from,
            to,
            amount,
            timestamp: Utc::now(),
        }
    }
}

/// An operation representing the possible inputs of the ledger.
#[derive(Debug, Clone)]
pub enum Operation {
    /// Move funds between two accounts, converting currency as needed.
    Transfer {
        from: AccountId,
        to: AccountId,
        value: Money,
    },
    /// Debit funds from a single account.
    Withdraw { account: AccountId, amount: Money },
    /// Advance the simulated calendar by one month, capitalizing interest
    /// on savings accounts whose schedule has matured.
    PassTime,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Amount, Currency};

    fn ron(value: f64) -> Money {
        Money::new(Amount::from_float(value), Currency::Ron)
    }

    #[test]
    fn month_growth_per_frequency() {
        assert_eq!(CapitalizationFrequency::Monthly.month_growth(), 1);
        assert_eq!(CapitalizationFrequency::Quarterly.month_growth(), 3);
    }

    #[test]
    fn frequency_roundtrip() {
        for freq in [
            CapitalizationFrequency::Monthly,
            CapitalizationFrequency::Quarterly,
        ] {
            assert_eq!(CapitalizationFrequency::from_str(freq.as_str()), Some(freq));
        }
        assert_eq!(CapitalizationFrequency::from_str("yearly"), None);
    }

    #[test]
    fn account_kind_is_tagged() {
        let checking = Account::checking("chk-1", ron(100.0));
        assert!(!checking.is_savings());

        let savings = Account::savings(
            "sav-1",
            ron(100.0),
            SavingsTerms {
                interest_rate: 0.02,
                frequency: CapitalizationFrequency::Monthly,
                last_applied: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            },
        );
        assert!(savings.is_savings());
    }

    #[test]
    fn record_appends_in_order() {
        let mut account = Account::checking("chk-1", ron(100.0));
        let first = Arc::new(TransactionRecord::new(
            "chk-1".into(),
            "chk-1".into(),
            ron(10.0),
        ));
        let second = Arc::new(TransactionRecord::new(
            "chk-1".into(),
            "chk-1".into(),
            ron(20.0),
        ));
        account.record(first.clone());
        account.record(second.clone());

        let history = account.transactions();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].id, first.id);
        assert_eq!(history[1].id, second.id);
        assert!(history[0].timestamp <= history[1].timestamp);
    }

    #[test]
    fn records_get_distinct_ids() {
        let a = TransactionRecord::new("a".into(), "b".into(), ron(1.0));
        let b = TransactionRecord::new("a".into(), "b".into(), ron(1.0));
        assert_ne!(a.id, b.id);
    }
}
