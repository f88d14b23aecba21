//! # attendance-cache
//!
//! Redis layer holding refresh-token sessions.
//!
//! ## Features
//!
//! - **Connection Pool**: Managed Redis connection pool with deadpool
//! - **Session Storage**: One refresh-token record per login session, indexed per user
//!
//! ## Example
//!
//! ```ignore
//! use attendance_cache::{RedisPool, RedisPoolConfig, RefreshTokenData, RefreshTokenStore};
//!
//! let pool = RedisPool::new(RedisPoolConfig::default())?;
//! let sessions = RefreshTokenStore::new(pool);
//!
//! let data = RefreshTokenData::new(user_id, session_id.clone());
//! sessions.store(&session_id, &data).await?;
//! ```

pub mod pool;
pub mod session;

// Re-export pool types
pub use pool::{RedisPool, RedisPoolConfig, RedisPoolError, RedisResult};

// Re-export session types
pub use session::{RefreshTokenData, RefreshTokenStore};
