//! Account repository.
//!
//! Lookups exist in two flavours: pool-backed methods for read-only callers
//! (profile pages, tests) and `*_tx` associated functions that run on a
//! caller-owned transaction. The sign-in path only ever uses the latter so
//! that its reads and its single write share one transaction.

use crate::{DbError, Result as DbErrorResult};

use hub_core::Account;

use chrono::DateTime;
use sqlx::{Executor, FromRow, Sqlite, SqlitePool, Transaction};
use uuid::Uuid;

const SELECT_BY_ID: &str = r#"
    SELECT id, external_subject_id, email, display_name, avatar_url, created_at, updated_at
    FROM accounts
    WHERE id = ?
"#;

const SELECT_BY_SUBJECT_ID: &str = r#"
    SELECT id, external_subject_id, email, display_name, avatar_url, created_at, updated_at
    FROM accounts
    WHERE external_subject_id = ?
"#;

const SELECT_BY_EMAIL: &str = r#"
    SELECT id, external_subject_id, email, display_name, avatar_url, created_at, updated_at
    FROM accounts
    WHERE email = ?
"#;

// Email is deliberately absent from the UPDATE list: once stored it is only
// ever set by the insert.
const UPSERT: &str = r#"
    INSERT INTO accounts (
        id, external_subject_id, email, display_name, avatar_url, created_at, updated_at
    ) VALUES (?, ?, ?, ?, ?, ?, ?)
    ON CONFLICT (id) DO UPDATE SET
        external_subject_id = excluded.external_subject_id,
        display_name = excluded.display_name,
        avatar_url = excluded.avatar_url,
        updated_at = excluded.updated_at
"#;

#[derive(FromRow)]
struct AccountRow {
    id: String,
    external_subject_id: Option<String>,
    email: String,
    display_name: Option<String>,
    avatar_url: Option<String>,
    created_at: i64,
    updated_at: i64,
}

impl TryFrom<AccountRow> for Account {
    type Error = DbError;

    fn try_from(r: AccountRow) -> DbErrorResult<Self> {
        Ok(Account {
            id: Uuid::parse_str(&r.id).map_err(|e| {
                DbError::invalid_row("accounts", format!("Invalid UUID in account.id: {}", e))
            })?,
            external_subject_id: r.external_subject_id,
            email: r.email,
            display_name: r.display_name,
            avatar_url: r.avatar_url,
            created_at: DateTime::from_timestamp(r.created_at, 0).ok_or_else(|| {
                DbError::invalid_row("accounts", "Invalid timestamp in account.created_at")
            })?,
            updated_at: DateTime::from_timestamp(r.updated_at, 0).ok_or_else(|| {
                DbError::invalid_row("accounts", "Invalid timestamp in account.updated_at")
            })?,
        })
    }
}

pub struct AccountRepository {
    pool: SqlitePool,
}

impl AccountRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> DbErrorResult<Option<Account>> {
        fetch_one_by(&self.pool, SELECT_BY_ID, &id.to_string()).await
    }

    pub async fn find_by_subject_id(&self, subject_id: &str) -> DbErrorResult<Option<Account>> {
        fetch_one_by(&self.pool, SELECT_BY_SUBJECT_ID, subject_id).await
    }

    pub async fn find_by_email(&self, email: &str) -> DbErrorResult<Option<Account>> {
        fetch_one_by(&self.pool, SELECT_BY_EMAIL, email).await
    }

    pub async fn count(&self) -> DbErrorResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM accounts")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Insert or update outside of any caller transaction
    pub async fn upsert(&self, account: &Account) -> DbErrorResult<()> {
        execute_upsert(&self.pool, account).await
    }

    pub async fn find_by_subject_id_tx(
        tx: &mut Transaction<'_, Sqlite>,
        subject_id: &str,
    ) -> DbErrorResult<Option<Account>> {
        fetch_one_by(&mut **tx, SELECT_BY_SUBJECT_ID, subject_id).await
    }

    pub async fn find_by_email_tx(
        tx: &mut Transaction<'_, Sqlite>,
        email: &str,
    ) -> DbErrorResult<Option<Account>> {
        fetch_one_by(&mut **tx, SELECT_BY_EMAIL, email).await
    }

    /// Insert, or update in place when the id already exists.
    ///
    /// A clash on `email` or `external_subject_id` with a *different* row is
    /// not absorbed by the upsert and surfaces as a unique violation.
    pub async fn upsert_tx(
        tx: &mut Transaction<'_, Sqlite>,
        account: &Account,
    ) -> DbErrorResult<()> {
        execute_upsert(&mut **tx, account).await
    }
}

async fn fetch_one_by<'c, E>(executor: E, sql: &str, key: &str) -> DbErrorResult<Option<Account>>
where
    E: Executor<'c, Database = Sqlite>,
{
    let row = sqlx::query_as::<_, AccountRow>(sql)
        .bind(key)
        .fetch_optional(executor)
        .await?;

    row.map(Account::try_from).transpose()
}

async fn execute_upsert<'c, E>(executor: E, account: &Account) -> DbErrorResult<()>
where
    E: Executor<'c, Database = Sqlite>,
{
    sqlx::query(UPSERT)
        .bind(account.id.to_string())
        .bind(account.external_subject_id.as_deref())
        .bind(account.email.as_str())
        .bind(account.display_name.as_deref())
        .bind(account.avatar_url.as_deref())
        .bind(account.created_at.timestamp())
        .bind(account.updated_at.timestamp())
        .execute(executor)
        .await?;

    Ok(())
}
