//! Refresh token storage in Redis.
//!
//! One entry per login session, keyed by the session id carried in the JWT
//! claims. A per-user set indexes the sessions so that deleting an account
//! can revoke all of them.

use crate::pool::{RedisPool, RedisPoolError, RedisResult};
use redis::AsyncCommands;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Key prefix for refresh tokens
const REFRESH_TOKEN_PREFIX: &str = "refresh_token:";

/// Key prefix for the per-user session index
const USER_TOKENS_PREFIX: &str = "user_tokens:";

/// Default TTL for refresh tokens (7 days)
const DEFAULT_REFRESH_TOKEN_TTL: u64 = 7 * 24 * 60 * 60;

/// Stored refresh token data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshTokenData {
    /// Account this session belongs to
    pub user_id: Uuid,
    pub session_id: String,
    /// The refresh token issued for this session; a rotated-out token no longer matches
    pub token: String,
    /// Unix epoch seconds
    pub created_at: i64,
}

impl RefreshTokenData {
    #[must_use]
    pub fn new(user_id: Uuid, session_id: String, token: String) -> Self {
        Self {
            user_id,
            session_id,
            token,
            created_at: chrono::Utc::now().timestamp(),
        }
    }

    /// Whether `token` is the one currently issued for this session
    #[must_use]
    pub fn matches(&self, token: &str) -> bool {
        self.token == token
    }
}

/// Refresh token store for managing authentication sessions
#[derive(Clone)]
pub struct RefreshTokenStore {
    pool: RedisPool,
    ttl_seconds: u64,
}

impl RefreshTokenStore {
    #[must_use]
    pub fn new(pool: RedisPool) -> Self {
        Self {
            pool,
            ttl_seconds: DEFAULT_REFRESH_TOKEN_TTL,
        }
    }

    /// Create with a TTL matching the refresh token expiry
    #[must_use]
    pub fn with_ttl(pool: RedisPool, ttl_seconds: u64) -> Self {
        Self { pool, ttl_seconds }
    }

    fn key(session_id: &str) -> String {
        format!("{REFRESH_TOKEN_PREFIX}{session_id}")
    }

    fn user_key(user_id: Uuid) -> String {
        format!("{USER_TOKENS_PREFIX}{user_id}")
    }

    /// Store the refresh token of a session
    pub async fn store(&self, data: &RefreshTokenData) -> RedisResult<()> {
        let ttl = i64::try_from(self.ttl_seconds)
            .map_err(|_| RedisPoolError::InvalidTtl(self.ttl_seconds))?;

        let key = Self::key(&data.session_id);
        self.pool.set(&key, data, Some(self.ttl_seconds)).await?;

        let user_set_key = Self::user_key(data.user_id);
        let mut conn = self.pool.get().await?;
        conn.sadd::<_, _, ()>(&user_set_key, &data.session_id).await?;
        conn.expire::<_, ()>(&user_set_key, ttl).await?;

        tracing::debug!(
            user_id = %data.user_id,
            session_id = %data.session_id,
            "Stored refresh token"
        );

        Ok(())
    }

    /// Get the session's stored token data, `None` once expired or revoked
    pub async fn get(&self, session_id: &str) -> RedisResult<Option<RefreshTokenData>> {
        self.pool.get_value(&Self::key(session_id)).await
    }

    /// Claim a session for rotation. The entry is removed atomically, so of
    /// two callers presenting the same session only one gets `Some`.
    pub async fn take(&self, session_id: &str) -> RedisResult<Option<RefreshTokenData>> {
        let taken: Option<RefreshTokenData> = self.pool.take_value(&Self::key(session_id)).await?;

        if let Some(data) = &taken {
            let mut conn = self.pool.get().await?;
            conn.srem::<_, _, ()>(Self::user_key(data.user_id), session_id)
                .await?;
            tracing::debug!(session_id = %session_id, "Claimed refresh token");
        }

        Ok(taken)
    }

    /// Revoke one session
    pub async fn revoke(&self, session_id: &str) -> RedisResult<bool> {
        if let Some(data) = self.get(session_id).await? {
            let mut conn = self.pool.get().await?;
            conn.srem::<_, _, ()>(Self::user_key(data.user_id), session_id)
                .await?;
        }

        let deleted = self.pool.delete(&Self::key(session_id)).await?;

        if deleted {
            tracing::debug!(session_id = %session_id, "Revoked refresh token");
        }

        Ok(deleted)
    }

    /// Revoke every session of an account
    pub async fn revoke_all_for_user(&self, user_id: Uuid) -> RedisResult<usize> {
        let user_set_key = Self::user_key(user_id);
        let mut conn = self.pool.get().await?;

        let session_ids: Vec<String> = conn.smembers(&user_set_key).await?;
        let count = session_ids.len();

        if !session_ids.is_empty() {
            let keys: Vec<String> = session_ids.iter().map(|id| Self::key(id)).collect();
            let key_refs: Vec<&str> = keys.iter().map(String::as_str).collect();
            self.pool.delete_many(&key_refs).await?;
        }

        conn.del::<_, ()>(&user_set_key).await?;

        tracing::info!(user_id = %user_id, count, "Revoked all refresh tokens for user");

        Ok(count)
    }
}
