use hub_core::{Account, AccountStore, AccountTransaction};

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub(crate) enum InMemoryStoreError {
    #[error("UNIQUE constraint failed: accounts.{0}")]
    UniqueViolation(&'static str),

    #[error("injected store failure")]
    Injected,
}

#[derive(Default)]
struct Inner {
    accounts: HashMap<Uuid, Account>,
    begins: usize,
    upserts: usize,
    commits: usize,
    rollbacks: usize,
    failing_upserts: usize,
    failing_begins: usize,
    /// Committed by "another request" right before the next commit
    concurrent_insert: Option<Account>,
}

/// Store double with snapshot transactions and the same uniqueness rules
/// as the SQLite schema. Counters let tests assert what was touched.
#[derive(Clone, Default)]
pub(crate) struct InMemoryAccountStore {
    inner: Arc<Mutex<Inner>>,
}

impl InMemoryAccountStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn seed(&self, account: Account) {
        self.inner.lock().unwrap().accounts.insert(account.id, account);
    }

    pub(crate) fn accounts(&self) -> Vec<Account> {
        self.inner.lock().unwrap().accounts.values().cloned().collect()
    }

    pub(crate) fn get(&self, id: Uuid) -> Option<Account> {
        self.inner.lock().unwrap().accounts.get(&id).cloned()
    }

    pub(crate) fn begins(&self) -> usize {
        self.inner.lock().unwrap().begins
    }

    pub(crate) fn upserts(&self) -> usize {
        self.inner.lock().unwrap().upserts
    }

    pub(crate) fn commits(&self) -> usize {
        self.inner.lock().unwrap().commits
    }

    pub(crate) fn rollbacks(&self) -> usize {
        self.inner.lock().unwrap().rollbacks
    }

    pub(crate) fn fail_next_upserts(&self, count: usize) {
        self.inner.lock().unwrap().failing_upserts = count;
    }

    pub(crate) fn fail_next_begins(&self, count: usize) {
        self.inner.lock().unwrap().failing_begins = count;
    }

    pub(crate) fn insert_before_next_commit(&self, account: Account) {
        self.inner.lock().unwrap().concurrent_insert = Some(account);
    }
}

pub(crate) struct InMemoryTransaction {
    inner: Arc<Mutex<Inner>>,
    snapshot: HashMap<Uuid, Account>,
}

fn conflict(
    accounts: &HashMap<Uuid, Account>,
    account: &Account,
) -> Option<InMemoryStoreError> {
    accounts.values().filter(|a| a.id != account.id).find_map(|other| {
        if other.email == account.email {
            Some(InMemoryStoreError::UniqueViolation("email"))
        } else if other.external_subject_id.is_some()
            && other.external_subject_id == account.external_subject_id
        {
            Some(InMemoryStoreError::UniqueViolation("external_subject_id"))
        } else {
            None
        }
    })
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    type Error = InMemoryStoreError;
    type Transaction = InMemoryTransaction;

    async fn begin(&self) -> Result<InMemoryTransaction, InMemoryStoreError> {
        let mut inner = self.inner.lock().unwrap();
        inner.begins += 1;
        if inner.failing_begins > 0 {
            inner.failing_begins -= 1;
            return Err(InMemoryStoreError::Injected);
        }

        Ok(InMemoryTransaction {
            inner: Arc::clone(&self.inner),
            snapshot: inner.accounts.clone(),
        })
    }
}

#[async_trait]
impl AccountTransaction for InMemoryTransaction {
    type Error = InMemoryStoreError;

    async fn find_by_subject_id(
        &mut self,
        subject_id: &str,
    ) -> Result<Option<Account>, InMemoryStoreError> {
        Ok(self
            .snapshot
            .values()
            .find(|a| a.external_subject_id.as_deref() == Some(subject_id))
            .cloned())
    }

    async fn find_by_email(&mut self, email: &str) -> Result<Option<Account>, InMemoryStoreError> {
        Ok(self.snapshot.values().find(|a| a.email == email).cloned())
    }

    async fn upsert(&mut self, account: &Account) -> Result<(), InMemoryStoreError> {
        {
            let mut inner = self.inner.lock().unwrap();
            inner.upserts += 1;
            if inner.failing_upserts > 0 {
                inner.failing_upserts -= 1;
                return Err(InMemoryStoreError::Injected);
            }
        }

        if let Some(err) = conflict(&self.snapshot, account) {
            return Err(err);
        }
        self.snapshot.insert(account.id, account.clone());
        Ok(())
    }

    async fn commit(self) -> Result<(), InMemoryStoreError> {
        let mut inner = self.inner.lock().unwrap();
        if let Some(winner) = inner.concurrent_insert.take() {
            inner.accounts.insert(winner.id, winner);
        }

        for account in self.snapshot.values() {
            if let Some(err) = conflict(&inner.accounts, account) {
                return Err(err);
            }
        }

        inner.accounts.extend(self.snapshot);
        inner.commits += 1;
        Ok(())
    }

    async fn rollback(self) -> Result<(), InMemoryStoreError> {
        self.inner.lock().unwrap().rollbacks += 1;
        Ok(())
    }
}
