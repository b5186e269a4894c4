//! Storage for provider access credentials, one per account and provider.

use crate::{DbError, Result as DbErrorResult};

use hub_core::LinkedCredential;

use chrono::DateTime;
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

#[derive(FromRow)]
struct LinkedCredentialRow {
    id: String,
    account_id: String,
    provider: String,
    access_token: String,
    token_type: Option<String>,
    scope: Option<String>,
    expires_at: Option<i64>,
    created_at: i64,
    updated_at: i64,
}

impl TryFrom<LinkedCredentialRow> for LinkedCredential {
    type Error = DbError;

    fn try_from(r: LinkedCredentialRow) -> DbErrorResult<Self> {
        let parse_uuid = |value: &str, column: &str| {
            Uuid::parse_str(value).map_err(|e| {
                DbError::invalid_row(
                    "linked_credentials",
                    format!("Invalid UUID in linked_credential.{}: {}", column, e),
                )
            })
        };

        Ok(LinkedCredential {
            id: parse_uuid(&r.id, "id")?,
            account_id: parse_uuid(&r.account_id, "account_id")?,
            provider: r.provider,
            access_token: r.access_token,
            token_type: r.token_type,
            scope: r.scope,
            expires_at: r.expires_at.and_then(|ts| DateTime::from_timestamp(ts, 0)),
            created_at: DateTime::from_timestamp(r.created_at, 0).ok_or_else(|| {
                DbError::invalid_row(
                    "linked_credentials",
                    "Invalid timestamp in linked_credential.created_at",
                )
            })?,
            updated_at: DateTime::from_timestamp(r.updated_at, 0).ok_or_else(|| {
                DbError::invalid_row(
                    "linked_credentials",
                    "Invalid timestamp in linked_credential.updated_at",
                )
            })?,
        })
    }
}

pub struct LinkedCredentialRepository {
    pool: SqlitePool,
}

impl LinkedCredentialRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Store the credential, replacing the token of an existing
    /// `(account_id, provider)` pair. The original row id and `created_at`
    /// survive a replacement.
    pub async fn upsert(&self, credential: &LinkedCredential) -> DbErrorResult<()> {
        sqlx::query(
            r#"
                INSERT INTO linked_credentials (
                    id, account_id, provider, access_token, token_type, scope,
                    expires_at, created_at, updated_at
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
                ON CONFLICT (account_id, provider) DO UPDATE SET
                    access_token = excluded.access_token,
                    token_type = excluded.token_type,
                    scope = excluded.scope,
                    expires_at = excluded.expires_at,
                    updated_at = excluded.updated_at
            "#,
        )
        .bind(credential.id.to_string())
        .bind(credential.account_id.to_string())
        .bind(credential.provider.as_str())
        .bind(credential.access_token.as_str())
        .bind(credential.token_type.as_deref())
        .bind(credential.scope.as_deref())
        .bind(credential.expires_at.map(|dt| dt.timestamp()))
        .bind(credential.created_at.timestamp())
        .bind(credential.updated_at.timestamp())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn find(
        &self,
        account_id: Uuid,
        provider: &str,
    ) -> DbErrorResult<Option<LinkedCredential>> {
        let row = sqlx::query_as::<_, LinkedCredentialRow>(
            r#"
                SELECT id, account_id, provider, access_token, token_type, scope,
                    expires_at, created_at, updated_at
                FROM linked_credentials
                WHERE account_id = ? AND provider = ?
            "#,
        )
        .bind(account_id.to_string())
        .bind(provider)
        .fetch_optional(&self.pool)
        .await?;

        row.map(LinkedCredential::try_from).transpose()
    }

    pub async fn find_by_account(&self, account_id: Uuid) -> DbErrorResult<Vec<LinkedCredential>> {
        let rows = sqlx::query_as::<_, LinkedCredentialRow>(
            r#"
                SELECT id, account_id, provider, access_token, token_type, scope,
                    expires_at, created_at, updated_at
                FROM linked_credentials
                WHERE account_id = ?
                ORDER BY provider
            "#,
        )
        .bind(account_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(LinkedCredential::try_from)
            .collect::<DbErrorResult<Vec<_>>>()
    }
}
