//! Concurrency-safe account store.
//!
//! The store owns every [`Account`] and hands out access only under a
//! per-account lock, so a check-then-mutate sequence on one account is
//! atomic and an interest sweep can never interleave with a transfer
//! mid-mutation. Operations touching two accounts acquire both locks in
//! lexicographic id order, which rules out deadlock.
//!
//! Accounts are inserted by the driver before the engines run and are never
//! removed, so a positive existence check stays valid.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

use crate::model::{Account, AccountId};

#[derive(Debug, Default)]
pub struct AccountStore {
    accounts: RwLock<HashMap<AccountId, Arc<Mutex<Account>>>>,
}

impl AccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an account. Replaces any previous account with the same id.
    pub fn insert(&self, account: Account) {
        let id = account.id.clone();
        self.accounts
            .write()
            .expect("account map lock poisoned")
            .insert(id, Arc::new(Mutex::new(account)));
    }

    pub fn exists(&self, id: &str) -> bool {
        self.accounts
            .read()
            .expect("account map lock poisoned")
            .contains_key(id)
    }

    /// All account ids, sorted for a deterministic sweep order.
    pub fn ids(&self) -> Vec<AccountId> {
        let mut ids: Vec<AccountId> = self
            .accounts
            .read()
            .expect("account map lock poisoned")
            .keys()
            .cloned()
            .collect();
        ids.sort();
        ids
    }

    fn handle(&self, id: &str) -> Option<Arc<Mutex<Account>>> {
        self.accounts
            .read()
            .expect("account map lock poisoned")
            .get(id)
            .cloned()
    }

    /// Run `f` with exclusive access to one account.
    /// Returns `None` if the id does not resolve.
    pub fn with_account<T>(&self, id: &str, f: impl FnOnce(&mut Account) -> T) -> Option<T> {
        let handle = self.handle(id)?;
        let mut account = handle.lock().expect("account lock poisoned");
        Some(f(&mut account))
    }

    /// Run `f` with exclusive access to two distinct accounts, passed in the
    /// caller's argument order. Locks are acquired in lexicographic id order.
    /// Returns `None` if either id does not resolve.
    ///
    /// Panics if `a == b`; single-account operations go through
    /// [`with_account`](Self::with_account).
    pub fn with_pair<T>(
        &self,
        a: &str,
        b: &str,
        f: impl FnOnce(&mut Account, &mut Account) -> T,
    ) -> Option<T> {
        assert_ne!(a, b, "with_pair requires distinct accounts");
        let handle_a = self.handle(a)?;
        let handle_b = self.handle(b)?;

        if a < b {
            let mut first = handle_a.lock().expect("account lock poisoned");
            let mut second = handle_b.lock().expect("account lock poisoned");
            Some(f(&mut first, &mut second))
        } else {
            let mut first = handle_b.lock().expect("account lock poisoned");
            let mut second = handle_a.lock().expect("account lock poisoned");
            Some(f(&mut second, &mut first))
        }
    }
}
