use crate::AccountDto;

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub account: AccountDto,
}
