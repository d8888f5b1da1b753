//! CSV front-end: account seed files, operation scenario files, and the
//! final balance report.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;
use thiserror::Error;

use crate::model::{Account, AccountId, CapitalizationFrequency, Operation, SavingsTerms};
use crate::money::{Currency, Money};
use crate::Amount;

/// Errors that can occur when parsing csv rows
#[derive(Debug, Error)]
pub enum CsvError {
    #[error("line {line}: failed to parse row: {source}")]
    Parse { line: usize, source: csv::Error },

    #[error("line {line}: unrecognized operation '{op}'")]
    UnrecognizedOp { line: usize, op: String },

    #[error("line {line}: unrecognized account kind '{kind}'")]
    UnrecognizedKind { line: usize, kind: String },

    #[error("line {line}: unrecognized currency '{code}'")]
    UnrecognizedCurrency { line: usize, code: String },

    #[error("line {line}: unrecognized capitalization frequency '{frequency}'")]
    UnrecognizedFrequency { line: usize, frequency: String },

    #[error("line {line}: invalid date '{value}' (expected YYYY-MM-DD)")]
    InvalidDate { line: usize, value: String },

    #[error("line {line}: missing field '{field}'")]
    MissingField { line: usize, field: &'static str },
}

#[derive(Debug, Deserialize)]
struct AccountRow {
    id: String,
    kind: String,
    balance: f64,
    currency: String,
    rate: Option<f64>,
    frequency: Option<String>,
    since: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OperationRow {
    op: String,
    account: Option<String>,
    to: Option<String>,
    amount: Option<f64>,
    currency: Option<String>,
}

#[derive(Debug, Serialize)]
struct BalanceRow {
    id: AccountId,
    kind: &'static str,
    balance: String,
    currency: &'static str,
}

fn parse_currency(code: &str, line: usize) -> Result<Currency, CsvError> {
    Currency::from_str(code).ok_or_else(|| CsvError::UnrecognizedCurrency {
        line,
        code: code.to_string(),
    })
}

fn require<T>(field: Option<T>, name: &'static str, line: usize) -> Result<T, CsvError> {
    field.ok_or(CsvError::MissingField { line, field: name })
}

/// Read account seed rows from a csv file.
///
/// Columns: `id,kind,balance,currency,rate,frequency,since`; the last three
/// apply only to savings rows.
pub fn read_accounts(path: impl AsRef<Path>) -> impl Iterator<Item = Result<Account, CsvError>> {
    let reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .expect("failed to open csv file");

    reader
        .into_deserialize::<AccountRow>()
        .enumerate()
        .map(|(idx, result)| {
            let line = idx + 2; // 1-indexed, skip header
            let row = result.map_err(|source| CsvError::Parse { line, source })?;
            let balance = Money::new(
                Amount::from_float(row.balance),
                parse_currency(&row.currency, line)?,
            );
            match row.kind.as_str() {
                "checking" => Ok(Account::checking(row.id, balance)),
                "savings" => {
                    let rate = require(row.rate, "rate", line)?;
                    let frequency = require(row.frequency, "frequency", line)?;
                    let frequency = CapitalizationFrequency::from_str(&frequency).ok_or(
                        CsvError::UnrecognizedFrequency { line, frequency },
                    )?;
                    let since = require(row.since, "since", line)?;
                    let last_applied = NaiveDate::parse_from_str(&since, "%Y-%m-%d")
                        .map_err(|_| CsvError::InvalidDate { line, value: since })?;
                    Ok(Account::savings(
                        row.id,
                        balance,
                        SavingsTerms {
                            interest_rate: rate,
                            frequency,
                            last_applied,
                        },
                    ))
                }
                other => Err(CsvError::UnrecognizedKind {
                    line,
                    kind: other.to_string(),
                }),
            }
        })
}

/// Read operation rows from a csv file.
///
/// Columns: `op,account,to,amount,currency`; ops are `transfer`, `withdraw`
/// and `pass_time`.
pub fn read_operations(
    path: impl AsRef<Path>,
) -> impl Iterator<Item = Result<Operation, CsvError>> {
    let reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .expect("failed to open csv file");

    reader
        .into_deserialize::<OperationRow>()
        .enumerate()
        .map(|(idx, result)| {
            let line = idx + 2; // 1-indexed, skip header
            let row = result.map_err(|source| CsvError::Parse { line, source })?;
            match row.op.as_str() {
                "transfer" => {
                    let amount = require(row.amount, "amount", line)?;
                    let currency = require(row.currency, "currency", line)?;
                    Ok(Operation::Transfer {
                        from: require(row.account, "account", line)?,
                        to: require(row.to, "to", line)?,
                        value: Money::new(
                            Amount::from_float(amount),
                            parse_currency(&currency, line)?,
                        ),
                    })
                }
                "withdraw" => {
                    let amount = require(row.amount, "amount", line)?;
                    let currency = require(row.currency, "currency", line)?;
                    Ok(Operation::Withdraw {
                        account: require(row.account, "account", line)?,
                        amount: Money::new(
                            Amount::from_float(amount),
                            parse_currency(&currency, line)?,
                        ),
                    })
                }
                "pass_time" => Ok(Operation::PassTime),
                other => Err(CsvError::UnrecognizedOp {
                    line,
                    op: other.to_string(),
                }),
            }
        })
}

/// Write final account balances to stdout in csv format.
pub fn write_balances(accounts: impl IntoIterator<Item = (AccountId, &'static str, Money)>) {
    let stdout = io::stdout();
    let mut writer = csv::Writer::from_writer(stdout.lock());

    for (id, kind, balance) in accounts {
        let row = BalanceRow {
            id,
            kind,
            balance: balance.amount.to_string(),
            currency: balance.currency.as_str(),
        };
        writer.serialize(&row).expect("failed to write csv row");
    }

    writer.flush().expect("failed to flush csv writer");
}
