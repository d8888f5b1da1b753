pub mod amount;
pub mod csv;
pub mod engine;
pub mod interest;
pub mod ledger;
pub mod model;
pub mod money;
pub mod store;

pub use amount::Amount;
pub use engine::{EngineError, TransactionEngine};
pub use interest::{InterestEngine, SimulatedClock};
pub use ledger::Ledger;
pub use model::{
    Account, AccountId, AccountKind, CapitalizationFrequency, Operation, SavingsTerms,
    TransactionRecord,
};
pub use money::{Currency, Money};
pub use store::AccountStore;
