mod account;
mod external_identity;
mod linked_credential;
