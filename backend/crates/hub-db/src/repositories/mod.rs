pub mod account_repository;
pub mod linked_credential_repository;
