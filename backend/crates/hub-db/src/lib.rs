pub mod connection;
pub mod error;
pub mod repositories;
pub mod store;

pub use connection::pool::{open_pool, run_migrations};
pub use error::{DbError, Result};
pub use repositories::account_repository::AccountRepository;
pub use repositories::linked_credential_repository::LinkedCredentialRepository;
pub use store::sqlite_account_store::{SqliteAccountStore, SqliteAccountTransaction};
