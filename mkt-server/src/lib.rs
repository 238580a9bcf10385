pub mod api;
pub mod error;
pub mod health;
pub mod logger;
pub mod routes;
pub mod state;

pub use api::{
    callback::callback::auth_callback,
    error::ApiError,
    error::Result as ApiResult,
    extractors::current_identity::CurrentIdentity,
    sync_user::{
        sync_user::sync_user, sync_user_request::SyncUserRequest,
        sync_user_response::SyncUserResponse, user_dto::UserDto,
    },
    webhook::{
        webhook::{receive_event, verify_endpoint},
        webhook_response::WebhookResponse,
    },
};

pub use crate::routes::build_router;
pub use crate::state::AppState;

#[cfg(test)]
mod tests;
