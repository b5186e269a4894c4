use crate::{AccountRepository, DbError, Result as DbErrorResult};

use hub_core::{Account, AccountStore, AccountTransaction};

use async_trait::async_trait;
use log::warn;
use sqlx::{Sqlite, SqlitePool, Transaction};

/// [`AccountStore`] backed by the SQLite pool
#[derive(Clone)]
pub struct SqliteAccountStore {
    pool: SqlitePool,
}

impl SqliteAccountStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

/// One open SQLite transaction. Dropping it uncommitted rolls back.
pub struct SqliteAccountTransaction {
    tx: Transaction<'static, Sqlite>,
}

#[async_trait]
impl AccountStore for SqliteAccountStore {
    type Error = DbError;
    type Transaction = SqliteAccountTransaction;

    /// Takes the write lock up front so a concurrent reconcile waits on the
    /// busy timeout and then reads the committed row
    async fn begin(&self) -> DbErrorResult<SqliteAccountTransaction> {
        let tx = self.pool.begin_with("BEGIN IMMEDIATE").await?;
        Ok(SqliteAccountTransaction { tx })
    }
}

#[async_trait]
impl AccountTransaction for SqliteAccountTransaction {
    type Error = DbError;

    async fn find_by_subject_id(&mut self, subject_id: &str) -> DbErrorResult<Option<Account>> {
        AccountRepository::find_by_subject_id_tx(&mut self.tx, subject_id).await
    }

    async fn find_by_email(&mut self, email: &str) -> DbErrorResult<Option<Account>> {
        AccountRepository::find_by_email_tx(&mut self.tx, email).await
    }

    async fn upsert(&mut self, account: &Account) -> DbErrorResult<()> {
        AccountRepository::upsert_tx(&mut self.tx, account)
            .await
            .inspect_err(|e| {
                if e.is_unique_violation() {
                    warn!(
                        "Account {} lost a uniqueness race (email or subject already taken)",
                        account.id
                    );
                }
            })
    }

    async fn commit(self) -> DbErrorResult<()> {
        self.tx.commit().await?;
        Ok(())
    }

    async fn rollback(self) -> DbErrorResult<()> {
        self.tx.rollback().await?;
        Ok(())
    }
}
