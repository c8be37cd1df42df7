//! HTTP API
//!
//! Each handler reads a fresh snapshot from the record store; the matching
//! core never sees a collection that is being written. Store and credential
//! work runs on the blocking pool, never on the async workers.

mod admin;
mod auth;
mod names;


use crate::auth::{TokenIssuer, UserDirectory};
use crate::config::Settings;
use crate::error::AppError;
use crate::matching::SearchService;
use crate::records::RecordStore;
use anyhow::{Context, Result};
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tracing::{info, warn};

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub records: RecordStore,
    pub users: UserDirectory,
    pub tokens: Arc<TokenIssuer>,
    pub search: SearchService,
    pub settings: Arc<Settings>,
}

impl AppState {
    pub fn new(settings: Settings) -> Result<Self> {
        let records = RecordStore::open(&settings.data_dir)
            .with_context(|| format!("Failed to open data dir {}", settings.data_dir.display()))?;
        let users = UserDirectory::new(&settings.data_dir, settings.password_hash_cost);

        let ttl = settings.token_ttl()?;
        let tokens = match &settings.jwt_secret {
            Some(secret) => TokenIssuer::new(secret.as_bytes(), ttl),
            None => {
                warn!("JWT_SECRET not set; using a random secret, tokens will not survive a restart");
                TokenIssuer::ephemeral(ttl)
            }
        };

        Ok(Self {
            records,
            users,
            tokens: Arc::new(tokens),
            search: SearchService::new(),
            settings: Arc::new(settings),
        })
    }
}

/// Run file I/O, locking or password hashing on the blocking pool
async fn blocking<T, F>(work: F) -> Result<T, AppError>
where
    F: FnOnce() -> Result<T, AppError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| AppError::Internal(format!("Blocking task failed: {}", e)))?
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/me", get(auth::me))
        .route("/api/names", post(names::create_record))
        .route("/api/names/search", post(names::search))
        .route("/api/names/test-match", post(names::test_match))
        .route("/api/names/standardize", post(names::standardize_name))
        .route("/api/names/debug/records", get(names::debug_records))
        .route(
            "/api/names/:id",
            get(names::get_record).delete(names::delete_record),
        )
        .route("/api/admin/stats", get(admin::stats))
        .route("/api/admin/test-matching", post(admin::test_matching))
        .route("/api/admin/bulk-standardize", post(admin::bulk_standardize))
        .route("/api/admin/restandardize", post(admin::restandardize))
        .route("/api/admin/users", get(admin::users))
        .with_state(state)
}

/// Bind and serve until Ctrl-C
pub async fn serve(settings: Settings) -> Result<()> {
    let bind = settings.bind.clone();
    let state = AppState::new(settings)?;

    match state.users.users() {
        Ok(users) if users.is_empty() => {
            warn!("No users in {}; run `namematch setup` first", state.users.path().display())
        }
        Ok(users) => info!("Loaded {} users", users.len()),
        Err(e) => warn!("Failed to read users: {}", e),
    }

    let listener = tokio::net::TcpListener::bind(&bind)
        .await
        .with_context(|| format!("Failed to bind {}", bind))?;

    info!("namematch API listening on {}", bind);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutting down");
        })
        .await
        .context("Server error")?;

    Ok(())
}
