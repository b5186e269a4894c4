use crate::AccountDto;

use hub_core::ReconcileAction;

use serde::Serialize;

/// Successful callback: the session token plus the resolved account
#[derive(Debug, Serialize)]
pub struct SignInResponse {
    pub notice: String,
    pub token: String,
    /// Unix timestamp
    pub expires_at: i64,
    pub action: ReconcileAction,
    pub account: AccountDto,
}
