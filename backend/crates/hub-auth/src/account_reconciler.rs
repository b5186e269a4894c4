//! Maps an identity asserted by a third-party provider to exactly one local
//! account.
//!
//! One call reads and writes through a single store transaction:
//!
//! 1. look the account up by provider subject id,
//! 2. otherwise look it up by email and link the subject id to it,
//! 3. otherwise create a new account,
//!
//! then refresh the display name and avatar from the non-blank incoming
//! values, upsert, and commit. The store's unique indexes on subject id and
//! email are the only concurrency control; a losing concurrent insert comes
//! back as [`ReconcileError::Persistence`] and
//! [`AccountReconciler::reconcile_with_retry`] runs the decision once more.

use crate::{ReconcileError, ReconcileOutcome};

use hub_core::{Account, AccountStore, AccountTransaction, ExternalIdentity, ReconcileAction};

use log::{debug, info, warn};

#[derive(Debug, Clone)]
pub struct AccountReconciler<S> {
    store: S,
}

impl<S: AccountStore> AccountReconciler<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Find or create the account for `identity`
    pub async fn reconcile(&self, identity: &ExternalIdentity) -> Result<Account, ReconcileError> {
        self.reconcile_detailed(identity)
            .await
            .map(ReconcileOutcome::into_account)
    }

    /// Like [`Self::reconcile`], also reporting which branch was taken
    pub async fn reconcile_detailed(
        &self,
        identity: &ExternalIdentity,
    ) -> Result<ReconcileOutcome, ReconcileError> {
        let subject_id = identity
            .subject_id()
            .ok_or_else(ReconcileError::missing_subject)?;
        let email = identity.email().ok_or_else(ReconcileError::missing_email)?;

        let mut tx = self
            .store
            .begin()
            .await
            .map_err(|e| ReconcileError::persistence(e))?;

        match Self::resolve(&mut tx, subject_id, email, identity).await {
            Ok(outcome) => {
                tx.commit()
                    .await
                    .map_err(|e| ReconcileError::persistence(e))?;

                info!(
                    "Reconciled subject {} to account {} ({})",
                    subject_id, outcome.account.id, outcome.action
                );
                Ok(outcome)
            }
            Err(e) => {
                if let Err(rollback_err) = tx.rollback().await {
                    warn!("Rollback after failed reconcile also failed: {rollback_err}");
                }
                Err(ReconcileError::persistence(e))
            }
        }
    }

    /// Reconcile, retrying exactly once when the first attempt failed in the
    /// store. The second attempt re-reads, so a concurrent winner's row is
    /// found through the subject id branch.
    pub async fn reconcile_with_retry(
        &self,
        identity: &ExternalIdentity,
    ) -> Result<ReconcileOutcome, ReconcileError> {
        match self.reconcile_detailed(identity).await {
            Err(e) if e.is_retryable() => {
                warn!("Reconcile failed, retrying once: {e}");
                self.reconcile_detailed(identity).await
            }
            other => other,
        }
    }

    async fn resolve(
        tx: &mut S::Transaction,
        subject_id: &str,
        email: &str,
        identity: &ExternalIdentity,
    ) -> Result<ReconcileOutcome, S::Error> {
        let (mut account, action) = if let Some(account) = tx.find_by_subject_id(subject_id).await? {
            (account, ReconcileAction::Matched)
        } else if let Some(mut account) = tx.find_by_email(email).await? {
            debug!("Linking subject {subject_id} to existing account {}", account.id);
            account.link_subject(subject_id);
            (account, ReconcileAction::Linked)
        } else {
            (
                Account::new(subject_id.to_string(), email.to_string()),
                ReconcileAction::Created,
            )
        };

        account.refresh_profile(identity);
        tx.upsert(&account).await?;

        Ok(ReconcileOutcome::new(account, action))
    }
}
