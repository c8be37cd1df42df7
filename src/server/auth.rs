use super::{blocking, AppState};
use crate::auth::{AuthUser, PublicUser};
use crate::error::AppError;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    password: Option<String>,
}

pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<Value>, AppError> {
    let (username, password) = match (request.username, request.password) {
        (Some(u), Some(p)) if !u.is_empty() && !p.is_empty() => (u, p),
        _ => {
            return Err(AppError::InvalidInput(
                "Username and password required".to_string(),
            ))
        }
    };

    let users = state.users.clone();
    let user = blocking(move || users.authenticate(&username, &password)).await?;
    let token = state.tokens.issue(&user)?;
    info!("User {} logged in", user.username);

    Ok(Json(json!({
        "success": true,
        "message": "Login successful",
        "token": token,
        "user": PublicUser::from(&user),
    })))
}

pub async fn me(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
) -> Result<Json<Value>, AppError> {
    let user = blocking(move || Ok(state.users.find_by_id(claims.sub)?))
        .await?
        .ok_or_else(|| AppError::Unauthorized("User no longer exists".to_string()))?;

    Ok(Json(json!({
        "success": true,
        "user": PublicUser::from(&user),
    })))
}
