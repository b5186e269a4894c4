//! Persistence seam for the account reconciler.
//!
//! The reconciler never touches a database handle directly: it is given an
//! [`AccountStore`] and performs every read and the single write of one
//! sign-in through one [`AccountTransaction`]. Uniqueness of
//! `external_subject_id` and `email` is enforced by the store, so a losing
//! concurrent insert comes back as an error from [`AccountTransaction::upsert`]
//! or [`AccountTransaction::commit`].

use crate::Account;

use std::error::Error as StdError;

use async_trait::async_trait;

#[async_trait]
pub trait AccountStore: Send + Sync {
    type Error: StdError + Send + Sync + 'static;
    type Transaction: AccountTransaction<Error = Self::Error>;

    /// Start a unit of work. Dropping the transaction without committing
    /// must discard every write made through it.
    async fn begin(&self) -> Result<Self::Transaction, Self::Error>;
}

#[async_trait]
pub trait AccountTransaction: Send {
    type Error: StdError + Send + Sync + 'static;

    async fn find_by_subject_id(&mut self, subject_id: &str)
    -> Result<Option<Account>, Self::Error>;

    async fn find_by_email(&mut self, email: &str) -> Result<Option<Account>, Self::Error>;

    /// Insert the account, or update it in place when its `id` already exists
    async fn upsert(&mut self, account: &Account) -> Result<(), Self::Error>;

    async fn commit(self) -> Result<(), Self::Error>;

    async fn rollback(self) -> Result<(), Self::Error>;
}
