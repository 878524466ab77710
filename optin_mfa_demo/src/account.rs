use std::{
    collections::HashMap,
    sync::{Arc, Mutex, PoisonError},
};

use optin_mfa_models::{account::Account, user::UserName};
use optin_mfa_persistence_contracts::account::AccountRepository;

/// Stateful in-memory [`AccountRepository`] for integration tests. Clones
/// share the same accounts.
#[derive(Debug, Clone, Default)]
pub struct MemoryAccountRepository {
    accounts: Arc<Mutex<HashMap<UserName, Account>>>,
}

impl MemoryAccountRepository {
    pub fn new(accounts: impl IntoIterator<Item = Account>) -> Self {
        Self {
            accounts: Arc::new(Mutex::new(
                accounts
                    .into_iter()
                    .map(|account| (account.subject.clone(), account))
                    .collect(),
            )),
        }
    }
}

impl AccountRepository for MemoryAccountRepository {
    fn get_by_subject(&self, subject: &UserName) -> anyhow::Result<Option<Account>> {
        let accounts = self
            .accounts
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        Ok(accounts.get(subject).cloned())
    }

    fn update(&self, account: &Account) -> anyhow::Result<()> {
        let mut accounts = self
            .accounts
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        accounts.insert(account.subject.clone(), account.clone());
        Ok(())
    }
}
