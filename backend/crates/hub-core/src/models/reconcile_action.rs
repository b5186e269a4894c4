use serde::{Deserialize, Serialize};

/// Which branch of the reconciliation decision produced an account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReconcileAction {
    /// Found by provider subject id
    Matched,
    /// Found by email and linked to the subject id
    Linked,
    /// No existing account, a new one was created
    Created,
}

impl ReconcileAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Matched => "matched",
            Self::Linked => "linked",
            Self::Created => "created",
        }
    }

    /// Whether the account row is new to the store
    pub fn is_insert(&self) -> bool {
        matches!(self, Self::Created)
    }
}

impl std::fmt::Display for ReconcileAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
