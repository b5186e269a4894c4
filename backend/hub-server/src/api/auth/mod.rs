pub mod account_dto;
#[allow(clippy::module_inception)]
pub mod auth;
pub mod callback_query;
pub mod notice_response;
pub mod profile_response;
pub mod sign_in_response;
