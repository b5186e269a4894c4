use hub_core::Account;

use serde::Serialize;

/// Account DTO for JSON serialization
#[derive(Debug, Serialize)]
pub struct AccountDto {
    pub id: String,
    pub email: String,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
    pub linked: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<Account> for AccountDto {
    fn from(a: Account) -> Self {
        Self {
            id: a.id.to_string(),
            linked: a.is_linked(),
            email: a.email,
            display_name: a.display_name,
            avatar_url: a.avatar_url,
            created_at: a.created_at.timestamp(),
            updated_at: a.updated_at.timestamp(),
        }
    }
}
