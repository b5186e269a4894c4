pub mod error;
pub mod models;
pub mod store;

pub use error::{CoreError, Result};
pub use models::account::Account;
pub use models::external_identity::ExternalIdentity;
pub use models::linked_credential::LinkedCredential;
pub use models::reconcile_action::ReconcileAction;
pub use store::{AccountStore, AccountTransaction};

#[cfg(test)]
mod tests;
