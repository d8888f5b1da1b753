use std::env;
use std::sync::Arc;

use bank_ledger::csv::{read_accounts, read_operations, write_balances};
use bank_ledger::{AccountStore, Ledger};
use chrono::{NaiveDate, Utc};
use tokio_stream::wrappers::ReceiverStream;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("warn".parse().unwrap()))
        .with_writer(std::io::stderr)
        .init();

    let mut args = env::args().skip(1);
    let accounts_path = args
        .next()
        .expect("usage: bank-ledger <accounts.csv> <operations.csv> [start-date]");
    let operations_path = args
        .next()
        .expect("usage: bank-ledger <accounts.csv> <operations.csv> [start-date]");
    let start = match args.next() {
        Some(date) => NaiveDate::parse_from_str(&date, "%Y-%m-%d")
            .expect("start date must be formatted YYYY-MM-DD"),
        None => Utc::now().date_naive(),
    };

    let store = Arc::new(AccountStore::new());
    for result in read_accounts(&accounts_path) {
        match result {
            Ok(account) => store.insert(account),
            Err(e) => warn!("{e}"),
        }
    }

    let mut ledger = Ledger::new(store.clone(), start);
    let (op_sender, op_receiver) = tokio::sync::mpsc::channel(16);

    tokio::spawn(async move {
        for result in read_operations(&operations_path) {
            match result {
                Ok(op) => {
                    op_sender.send(op).await.unwrap();
                }
                Err(e) => {
                    warn!("{e}");
                }
            }
        }
    });

    ledger.run(ReceiverStream::new(op_receiver)).await;

    write_balances(store.ids().into_iter().map(|id| {
        store
            .with_account(&id, |account| {
                (account.id.clone(), account.kind.as_str(), account.balance)
            })
            .expect("account disappeared from store")
    }));
}
