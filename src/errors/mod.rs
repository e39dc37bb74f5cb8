pub mod api;
pub mod auth;

pub use api::{AuthApiError, AuthErrorResponse};
pub use auth::AuthError;
