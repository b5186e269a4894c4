pub mod account;
pub mod external_identity;
pub mod linked_credential;
pub mod reconcile_action;
