//! Axum extractors for request handling
//!
//! Authentication, validated input and typed path parameters.

mod auth;
mod path;
mod validated;

pub use auth::AuthUser;
pub use path::IdPath;
pub use validated::{ValidatedJson, ValidatedQuery};
