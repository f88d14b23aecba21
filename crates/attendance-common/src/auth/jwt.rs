//! JWT access/refresh tokens
//!
//! Claims carry the account id, its stored role and the session id that keys
//! the refresh token in Redis.

use attendance_core::Role;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenType {
    Access,
    Refresh,
}

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (account ID)
    pub sub: String,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
    pub token_type: TokenType,
    pub session_id: String,
}

impl Claims {
    /// Parse the subject as an account ID
    pub fn user_id(&self) -> Result<Uuid, AppError> {
        self.sub.parse().map_err(|_| AppError::InvalidToken)
    }

    #[must_use]
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }
}

/// Token pair returned by login and refresh
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_token_expiry: i64,
    refresh_token_expiry: i64,
}

impl JwtService {
    #[must_use]
    pub fn new(secret: &str, access_token_expiry: i64, refresh_token_expiry: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            access_token_expiry,
            refresh_token_expiry,
        }
    }

    /// Refresh token lifetime in seconds
    #[must_use]
    pub fn refresh_token_expiry(&self) -> i64 {
        self.refresh_token_expiry
    }

    /// Issue an access/refresh pair bound to one session
    pub fn issue(&self, user_id: Uuid, role: Role, session_id: &str) -> Result<TokenPair, AppError> {
        Ok(TokenPair {
            access_token: self.encode_token(user_id, role, session_id, TokenType::Access)?,
            refresh_token: self.encode_token(user_id, role, session_id, TokenType::Refresh)?,
            token_type: "Bearer".to_string(),
            expires_in: self.access_token_expiry,
        })
    }

    fn encode_token(
        &self,
        user_id: Uuid,
        role: Role,
        session_id: &str,
        token_type: TokenType,
    ) -> Result<String, AppError> {
        let now = Utc::now();
        let expiry = match token_type {
            TokenType::Access => self.access_token_expiry,
            TokenType::Refresh => self.refresh_token_expiry,
        };

        let claims = Claims {
            sub: user_id.to_string(),
            role,
            iat: now.timestamp(),
            exp: (now + Duration::seconds(expiry)).timestamp(),
            token_type,
            session_id: session_id.to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to encode JWT: {e}")))
    }

    /// Decode and validate signature and expiry
    pub fn decode_token(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::TokenExpired,
                _ => AppError::InvalidToken,
            })
    }

    pub fn validate_access_token(&self, token: &str) -> Result<Claims, AppError> {
        self.decode_expecting(token, TokenType::Access)
    }

    pub fn validate_refresh_token(&self, token: &str) -> Result<Claims, AppError> {
        self.decode_expecting(token, TokenType::Refresh)
    }

    fn decode_expecting(&self, token: &str, expected: TokenType) -> Result<Claims, AppError> {
        let claims = self.decode_token(token)?;
        if claims.token_type != expected {
            return Err(AppError::InvalidToken);
        }
        Ok(claims)
    }
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("access_token_expiry", &self.access_token_expiry)
            .field("refresh_token_expiry", &self.refresh_token_expiry)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> JwtService {
        JwtService::new("test-secret-key-that-is-long-enough", 900, 604_800)
    }

    #[test]
    fn test_issue_pair() {
        let pair = service().issue(Uuid::new_v4(), Role::Student, "s-1").unwrap();

        assert!(!pair.access_token.is_empty());
        assert_ne!(pair.access_token, pair.refresh_token);
        assert_eq!(pair.token_type, "Bearer");
        assert_eq!(pair.expires_in, 900);
    }

    #[test]
    fn test_access_claims_carry_role_and_session() {
        let service = service();
        let user_id = Uuid::new_v4();
        let pair = service.issue(user_id, Role::Faculty, "session-42").unwrap();

        let claims = service.validate_access_token(&pair.access_token).unwrap();
        assert_eq!(claims.user_id().unwrap(), user_id);
        assert_eq!(claims.role, Role::Faculty);
        assert_eq!(claims.session_id, "session-42");
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_token_types_are_not_interchangeable() {
        let service = service();
        let pair = service.issue(Uuid::new_v4(), Role::Admin, "s").unwrap();

        assert!(service.validate_access_token(&pair.refresh_token).is_err());
        assert!(service.validate_refresh_token(&pair.access_token).is_err());
        assert!(service.validate_refresh_token(&pair.refresh_token).is_ok());
    }

    #[test]
    fn test_foreign_signature_rejected() {
        let pair = JwtService::new("another-secret", 900, 900)
            .issue(Uuid::new_v4(), Role::Admin, "s")
            .unwrap();

        let result = service().decode_token(&pair.access_token);
        assert!(matches!(result, Err(AppError::InvalidToken)));
    }

    #[test]
    fn test_expired_token() {
        let service = JwtService::new("test-secret-key-that-is-long-enough", -120, -120);
        let pair = service.issue(Uuid::new_v4(), Role::Student, "s").unwrap();

        let result = service.decode_token(&pair.access_token);
        assert!(matches!(result, Err(AppError::TokenExpired)));
    }

    #[test]
    fn test_bad_subject() {
        let claims = Claims {
            sub: "12345".to_string(),
            role: Role::Student,
            iat: 0,
            exp: i64::MAX,
            token_type: TokenType::Access,
            session_id: String::new(),
        };
        assert!(matches!(claims.user_id(), Err(AppError::InvalidToken)));
    }
}
