//! Server setup and initialization
//!
//! Builds the application from configuration and runs the HTTP listener.

use std::sync::Arc;

use attendance_cache::{RedisPool, RedisPoolConfig};
use attendance_common::{AppConfig, AppError, JwtService};
use attendance_db::{
    create_pool, run_migrations, PgAttendanceRepository, PgFacultyRepository,
    PgOverviewRepository, PgStudentRepository, PgSubjectRepository, PgTimetableRepository,
    PgUserRepository,
};
use attendance_service::ServiceContextBuilder;
use axum::Router;
use tokio::net::TcpListener;
use tracing::info;

use crate::middleware::{apply_middleware, apply_middleware_with_config};
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
///
/// # Errors
/// Returns `AppError::Config` when the rate limit settings are unusable.
pub fn create_app(state: AppState) -> Result<Router, AppError> {
    let config = state.config();
    let api = apply_middleware_with_config(
        create_router(),
        &config.rate_limit,
        &config.cors,
        config.app.env.is_production(),
    )?;

    Ok(api
        .merge(apply_middleware(health_routes()))
        .with_state(state))
}

/// Connect to PostgreSQL and Redis, apply migrations and wire the services
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    info!("Connecting to PostgreSQL...");
    let db_config = attendance_db::DatabaseConfig::from(&config.database);
    let pool = create_pool(&db_config)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    if config.database.run_migrations {
        run_migrations(&pool, &config.database.migrations_dir)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
    }

    info!("Creating Redis pool...");
    let redis_pool = RedisPool::new(RedisPoolConfig::from(&config.redis))
        .map_err(|e| AppError::Cache(e.to_string()))?;

    let jwt_service = Arc::new(JwtService::new(
        &config.jwt.secret,
        config.jwt.access_token_expiry,
        config.jwt.refresh_token_expiry,
    ));

    let service_context = ServiceContextBuilder::new()
        .pool(pool.clone())
        .redis_pool(redis_pool)
        .user_repo(Arc::new(PgUserRepository::new(pool.clone())))
        .student_repo(Arc::new(PgStudentRepository::new(pool.clone())))
        .faculty_repo(Arc::new(PgFacultyRepository::new(pool.clone())))
        .timetable_repo(Arc::new(PgTimetableRepository::new(pool.clone())))
        .attendance_repo(Arc::new(PgAttendanceRepository::new(pool.clone())))
        .subject_repo(Arc::new(PgSubjectRepository::new(pool.clone())))
        .overview_repo(Arc::new(PgOverviewRepository::new(pool)))
        .jwt_service(jwt_service)
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, config))
}

/// Bind the listener and serve until the process stops
pub async fn run_server(app: Router, address: &str) -> Result<(), AppError> {
    let listener = TcpListener::bind(address)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {address}: {e}")))?;

    info!(address = %address, "Server listening");

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let address = config.api.address();
    let state = create_app_state(config).await?;
    let app = create_app(state)?;
    run_server(app, &address).await
}
