//! Account entity - the local user record a sign-in resolves to.

use crate::{CoreError, ExternalIdentity, Result as CoreErrorResult};

use error_location::ErrorLocation;

use std::panic::Location;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A local account. Created on the first successful sign-in for an identity
/// and refreshed on every later one; never deleted by the sign-in flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Assigned once at creation, never changes
    pub id: Uuid,
    /// Linked provider subject id (unique when present)
    pub external_subject_id: Option<String>,
    /// Unique, required
    pub email: String,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Create a new account already linked to `subject_id`
    pub fn new(subject_id: String, email: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            external_subject_id: Some(subject_id),
            email,
            display_name: None,
            avatar_url: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_linked(&self) -> bool {
        self.external_subject_id.is_some()
    }

    /// Attach a provider subject id to an account found by email
    pub fn link_subject(&mut self, subject_id: &str) {
        self.external_subject_id = Some(subject_id.to_string());
        self.updated_at = Utc::now();
    }

    /// Last-write-wins refresh of the profile fields.
    ///
    /// Only non-blank values from `identity` overwrite; the email is never
    /// touched. Returns whether anything changed.
    pub fn refresh_profile(&mut self, identity: &ExternalIdentity) -> bool {
        let mut changed = false;

        if let Some(name) = identity.display_name()
            && self.display_name.as_deref() != Some(name)
        {
            self.display_name = Some(name.to_string());
            changed = true;
        }

        if let Some(url) = identity.avatar_url()
            && self.avatar_url.as_deref() != Some(url)
        {
            self.avatar_url = Some(url.to_string());
            changed = true;
        }

        if changed {
            self.updated_at = Utc::now();
        }

        changed
    }

    /// Parse an account id coming from outside (session claims, paths)
    #[track_caller]
    pub fn parse_id(value: &str) -> CoreErrorResult<Uuid> {
        Uuid::parse_str(value).map_err(|source| CoreError::Uuid {
            source,
            location: ErrorLocation::from(Location::caller()),
        })
    }
}
