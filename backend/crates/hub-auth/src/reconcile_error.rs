use std::error::Error as StdError;
use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

/// Why a sign-in could not be resolved to an account
#[derive(Error, Debug)]
pub enum ReconcileError {
    #[error("Identity has no subject id {location}")]
    MissingSubject { location: ErrorLocation },

    /// The provider did not share an email address. Nothing was read or
    /// written.
    #[error("Identity has no email address {location}")]
    MissingEmail { location: ErrorLocation },

    /// The store failed (unique-constraint race, connectivity). The
    /// transaction was rolled back.
    #[error("Account store failure: {source} {location}")]
    Persistence {
        #[source]
        source: Box<dyn StdError + Send + Sync>,
        location: ErrorLocation,
    },
}

impl ReconcileError {
    #[track_caller]
    pub(crate) fn missing_subject() -> Self {
        Self::MissingSubject {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub(crate) fn missing_email() -> Self {
        Self::MissingEmail {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn persistence<E>(source: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::Persistence {
            source: Box::new(source),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Only store failures are worth a second attempt
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Persistence { .. })
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MissingSubject { .. } => "MISSING_SUBJECT",
            Self::MissingEmail { .. } => "MISSING_EMAIL",
            Self::Persistence { .. } => "PERSISTENCE",
        }
    }
}
