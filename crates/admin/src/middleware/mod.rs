//! HTTP middleware for the admin service.

pub mod auth;
pub mod request_id;
pub mod session;

pub use auth::{RequireAdmin, RequireAuth, clear_auth_on_unauthorized};
pub use request_id::request_id_middleware;
pub use session::create_session_layer;
