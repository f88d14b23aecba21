//! Session storage module.
//!
//! Refresh tokens are stored per login session and expire with the token.

mod refresh_token;

pub use refresh_token::{RefreshTokenData, RefreshTokenStore};
