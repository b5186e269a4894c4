//! Identity assertion produced by a third-party sign-in.

use serde::{Deserialize, Serialize};

/// What the identity provider asserted about the end user for one sign-in
/// attempt. Never persisted as-is.
///
/// Optional fields may also arrive as empty strings; the accessors treat
/// blank values the same as missing ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalIdentity {
    /// Provider-assigned stable identifier (OpenID `sub`)
    pub subject_id: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
}

impl ExternalIdentity {
    pub fn new(subject_id: impl Into<String>) -> Self {
        Self {
            subject_id: subject_id.into(),
            ..Self::default()
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    pub fn with_avatar_url(mut self, avatar_url: impl Into<String>) -> Self {
        self.avatar_url = Some(avatar_url.into());
        self
    }

    /// Subject id with surrounding whitespace removed, `None` when blank
    pub fn subject_id(&self) -> Option<&str> {
        Some(self.subject_id.trim()).filter(|s| !s.is_empty())
    }

    pub fn email(&self) -> Option<&str> {
        non_blank(&self.email)
    }

    pub fn display_name(&self) -> Option<&str> {
        non_blank(&self.display_name)
    }

    pub fn avatar_url(&self) -> Option<&str> {
        non_blank(&self.avatar_url)
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
}
