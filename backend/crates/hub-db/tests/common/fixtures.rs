use hub_core::{Account, LinkedCredential};

use uuid::Uuid;

/// Creates a linked account with a profile
pub fn create_test_account(subject_id: &str, email: &str) -> Account {
    let mut account = Account::new(subject_id.to_string(), email.to_string());
    account.display_name = Some("Test User".to_string());
    account.avatar_url = Some("https://example.com/avatar.png".to_string());
    account
}

/// Creates an account that exists only by email (no provider subject)
pub fn create_unlinked_account(email: &str) -> Account {
    let mut account = Account::new(String::new(), email.to_string());
    account.external_subject_id = None;
    account
}

pub fn create_test_credential(account_id: Uuid, token: &str) -> LinkedCredential {
    let mut credential = LinkedCredential::new(account_id, "google".to_string(), token.to_string());
    credential.token_type = Some("Bearer".to_string());
    credential.scope = Some("openid email profile".to_string());
    credential
}
