pub mod account_reconciler;
pub mod error;
pub mod google_identity_provider;
pub mod identity_provider;
pub mod provider_settings;
pub mod provider_token;
pub mod reconcile_error;
pub mod reconcile_outcome;
pub mod session_claims;
pub mod session_issuer;
pub mod session_token;
pub mod session_validator;
pub mod state_tokens;

pub use account_reconciler::AccountReconciler;
pub use error::{AuthError, Result};
pub use google_identity_provider::GoogleIdentityProvider;
pub use identity_provider::IdentityProvider;
pub use provider_settings::ProviderSettings;
pub use provider_token::ProviderToken;
pub use reconcile_error::ReconcileError;
pub use reconcile_outcome::ReconcileOutcome;
pub use session_claims::SessionClaims;
pub use session_issuer::SessionIssuer;
pub use session_token::SessionToken;
pub use session_validator::{SessionValidator, bearer_token};
pub use state_tokens::StateTokens;

#[cfg(test)]
mod tests;
