mod auth;

pub use auth::{AuthUser, Session};
