pub mod api;
pub mod app_state;
pub mod error;
pub mod health;
pub mod logger;
pub mod routes;

#[cfg(test)]
mod tests;

pub use api::{
    auth::{
        account_dto::AccountDto,
        auth::{callback, login, logout, profile},
        callback_query::CallbackQuery,
        notice_response::NoticeResponse,
        profile_response::ProfileResponse,
        sign_in_response::SignInResponse,
    },
    error::ApiError,
    error::Result as ApiResult,
    extractors::session_account::SessionAccount,
};
pub use app_state::AppState;

pub use crate::routes::build_router;
