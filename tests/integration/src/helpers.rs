//! Test helpers for integration tests
//!
//! Server lifecycle, authenticated HTTP calls and account seeding.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use attendance_api::{create_app, create_app_state};
use attendance_common::{hash_password, AppConfig};
use attendance_core::entities::{RoleProfile, User};
use attendance_core::traits::UserRepository;
use attendance_core::value_objects::Role;
use attendance_db::{create_pool, DatabaseConfig, PgUserRepository};
use reqwest::{Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::fixtures::{unique_suffix, AuthResponse, LoginRequest, TEST_PASSWORD};

const API_PREFIX: &str = "/api/v1";

/// Running application bound to an ephemeral port
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    user_repo: Arc<PgUserRepository>,
    _handle: JoinHandle<()>,
}

impl TestServer {
    pub async fn start() -> Result<Self> {
        let config = test_config()?;
        Self::start_with_config(config).await
    }

    pub async fn start_with_config(config: AppConfig) -> Result<Self> {
        let seed_pool = create_pool(&DatabaseConfig::from(&config.database)).await?;
        let state = create_app_state(config).await?;
        let app = create_app(state)?;

        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        tokio::time::sleep(Duration::from_millis(100)).await;

        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            addr,
            client,
            user_repo: Arc::new(PgUserRepository::new(seed_pool)),
            _handle: handle,
        })
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}{API_PREFIX}{path}", self.base_url())
    }

    /// GET a root-level path such as `/health`
    pub async fn get_root(&self, path: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.get(&url).send().await?)
    }

    pub async fn get_auth(&self, path: &str, token: &str) -> Result<Response> {
        Ok(self
            .client
            .get(self.api_url(path))
            .bearer_auth(token)
            .send()
            .await?)
    }

    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        Ok(self.client.post(self.api_url(path)).json(body).send().await?)
    }

    pub async fn post_auth<T: Serialize>(&self, path: &str, token: &str, body: &T) -> Result<Response> {
        Ok(self
            .client
            .post(self.api_url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await?)
    }

    pub async fn patch_auth<T: Serialize>(&self, path: &str, token: &str, body: &T) -> Result<Response> {
        Ok(self
            .client
            .patch(self.api_url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await?)
    }

    pub async fn delete_auth(&self, path: &str, token: &str) -> Result<Response> {
        Ok(self
            .client
            .delete(self.api_url(path))
            .bearer_auth(token)
            .send()
            .await?)
    }

    /// Insert an admin account directly; admins cannot self-register
    pub async fn seed_admin(&self) -> Result<String> {
        let email = format!("admin{}@college.edu", unique_suffix());
        let user = User::new(Uuid::new_v4(), &email, Role::Admin);
        let hash = hash_password(TEST_PASSWORD)?;
        self.user_repo
            .create_with_profile(&user, &hash, &RoleProfile::Admin)
            .await?;
        Ok(email)
    }

    /// Log in and return the access token
    pub async fn login(&self, email: &str, role: Option<&str>) -> Result<AuthResponse> {
        let request = LoginRequest {
            email: email.to_string(),
            password: TEST_PASSWORD.to_string(),
            role: role.map(str::to_string),
        };
        let response = self.post("/auth/login", &request).await?;
        assert_json(response, StatusCode::OK).await
    }

    /// Seed an admin and return its access token
    pub async fn admin_token(&self) -> Result<String> {
        let email = self.seed_admin().await?;
        Ok(self.login(&email, Some("admin")).await?.access_token)
    }
}

/// Configuration from the environment, with migrations on and a rate limit
/// high enough for a burst of test traffic
pub fn test_config() -> Result<AppConfig> {
    dotenvy::dotenv().ok();

    let mut config = AppConfig::from_env().map_err(|e| anyhow::anyhow!("Config error: {e}"))?;
    config.database.run_migrations = true;
    config.database.migrations_dir = concat!(env!("CARGO_MANIFEST_DIR"), "/../../migrations").to_string();
    config.rate_limit.requests_per_second = 1_000;
    config.rate_limit.burst = 1_000;

    Ok(config)
}

/// Whether PostgreSQL and Redis are configured for this run
pub fn check_test_env() -> bool {
    for var in ["DATABASE_URL", "REDIS_URL"] {
        if std::env::var(var).is_err() {
            eprintln!("Skipping test: {var} not set");
            return false;
        }
    }
    true
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(response: Response, expected_status: StatusCode) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(())
}
