use super::{blocking, AppState};
use crate::auth::{AdminUser, PublicUser};
use crate::error::AppError;
use crate::matching::Algorithm;
use crate::tools::names::{compare_names, standardize_all};
use crate::tools::search::score_percent;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

pub async fn stats(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> Result<Json<Value>, AppError> {
    let stats = blocking(move || Ok(state.records.stats()?)).await?;
    Ok(Json(json!({ "success": true, "stats": stats })))
}

#[derive(Debug, Deserialize)]
pub struct TestMatchingRequest {
    #[serde(default)]
    name1: String,
    #[serde(default)]
    name2: String,
}

pub async fn test_matching(
    State(state): State<AppState>,
    _admin: AdminUser,
    Json(request): Json<TestMatchingRequest>,
) -> Result<Json<Value>, AppError> {
    let comparison = compare_names(
        state.search.engine(),
        &request.name1,
        &request.name2,
        Algorithm::Combined,
    )?;
    let detail = &comparison.detail;

    Ok(Json(json!({
        "success": true,
        "comparison": {
            "name1": comparison.name1,
            "name2": comparison.name2,
            "fuzzy_score": score_percent(detail.fuzzy_score),
            "phonetic_match": detail.phonetic_match,
            "combined_score": score_percent(detail.combined_score),
            "standardized_name1": detail.standardized_name1,
            "standardized_name2": detail.standardized_name2,
        }
    })))
}

pub async fn bulk_standardize(
    _admin: AdminUser,
    Json(body): Json<Value>,
) -> Result<Json<Value>, AppError> {
    let names = body
        .get("names")
        .and_then(Value::as_array)
        .ok_or_else(|| AppError::InvalidInput("Names array is required".to_string()))?;

    let names: Vec<String> = names
        .iter()
        .map(|v| match v {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .collect();

    let results = standardize_all(&names);
    Ok(Json(json!({
        "success": true,
        "results": results,
    })))
}

pub async fn restandardize(
    State(state): State<AppState>,
    AdminUser(claims): AdminUser,
) -> Result<Json<Value>, AppError> {
    let updated = blocking(move || Ok(state.records.restandardize_all()?)).await?;
    info!("{} re-standardized {} records", claims.username, updated);
    Ok(Json(json!({
        "success": true,
        "updated": updated,
    })))
}

pub async fn users(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> Result<Json<Value>, AppError> {
    let users = blocking(move || Ok(state.users.users()?)).await?;
    let users: Vec<PublicUser> = users.iter().map(PublicUser::from).collect();
    Ok(Json(json!({ "success": true, "users": users })))
}
