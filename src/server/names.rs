use super::{blocking, AppState};
use crate::auth::{AdminUser, AuthUser};
use crate::error::{validate_name, AppError};
use crate::matching::{standardize, Algorithm};
use crate::records::NewRecord;
use crate::tools::names::compare_names;
use crate::tools::search::{run_search, score_percent, MatchSummary};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    query: String,
    #[serde(default)]
    algorithm: Option<String>,
    #[serde(default)]
    threshold: Option<f64>,
}

pub async fn search(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Json(request): Json<SearchRequest>,
) -> Result<Json<Value>, AppError> {
    let algorithm = request
        .algorithm
        .as_deref()
        .map(Algorithm::parse)
        .unwrap_or(state.settings.default_algorithm);
    let threshold = request.threshold.unwrap_or(state.settings.default_threshold);

    let outcome = blocking(move || {
        run_search(
            &state.records,
            &state.search,
            &request.query,
            algorithm,
            threshold,
        )
    })
    .await?;
    info!(
        "{} searched {:?}: {} matches",
        claims.username,
        outcome.query,
        outcome.matches.len()
    );

    let matches: Vec<MatchSummary> = outcome.matches.iter().map(MatchSummary::from).collect();

    Ok(Json(json!({
        "success": true,
        "query": outcome.query,
        "algorithm": outcome.algorithm,
        "threshold": outcome.threshold,
        "matches_found": matches.len(),
        "matches": matches,
    })))
}

#[derive(Debug, Deserialize)]
pub struct TestMatchRequest {
    #[serde(default)]
    name1: String,
    #[serde(default)]
    name2: String,
    #[serde(default)]
    algorithm: Option<String>,
}

pub async fn test_match(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(request): Json<TestMatchRequest>,
) -> Result<Json<Value>, AppError> {
    let algorithm = request
        .algorithm
        .as_deref()
        .map(Algorithm::parse)
        .unwrap_or_default();
    let comparison = compare_names(
        state.search.engine(),
        &request.name1,
        &request.name2,
        algorithm,
    )?;

    Ok(Json(json!({
        "success": true,
        "name1": comparison.name1,
        "name2": comparison.name2,
        "algorithm": comparison.algorithm,
        "score": score_percent(comparison.score),
        "standardized_name1": comparison.detail.standardized_name1,
        "standardized_name2": comparison.detail.standardized_name2,
        "phonetic_match": comparison.detail.phonetic_match,
    })))
}

pub async fn debug_records(
    State(state): State<AppState>,
    _user: AuthUser,
) -> Result<Json<Value>, AppError> {
    let records = blocking(move || Ok(state.records.records()?)).await?;
    let active: Vec<Value> = records
        .iter()
        .filter(|r| r.is_active)
        .map(|r| {
            json!({
                "id": r.id,
                "original_name": r.original_name,
                "standardized_name": r.standardized_name,
                "person_type": r.person_type,
                "case_number": r.case_number,
            })
        })
        .collect();

    Ok(Json(json!({
        "success": true,
        "total_records": records.len(),
        "active_records": active.len(),
        "records": active,
    })))
}

#[derive(Debug, Deserialize)]
pub struct CreateRecordRequest {
    #[serde(default)]
    original_name: String,
    #[serde(default)]
    person_type: String,
    #[serde(default)]
    case_number: Option<String>,
    #[serde(default)]
    department: Option<String>,
}

pub async fn create_record(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Json(request): Json<CreateRecordRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    if request.original_name.trim().is_empty() || request.person_type.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "Original name and person type are required".to_string(),
        ));
    }

    let record = blocking(move || {
        let department = match request.department.filter(|d| !d.trim().is_empty()) {
            Some(department) => Some(department),
            None => state
                .users
                .find_by_id(claims.sub)?
                .and_then(|user| user.department),
        };

        Ok(state.records.add(NewRecord {
            original_name: request.original_name,
            person_type: request.person_type,
            case_number: request.case_number,
            department,
            created_by: claims.sub,
            created_by_name: claims.username,
        })?)
    })
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Name record created successfully",
            "record": record,
        })),
    ))
}

pub async fn get_record(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<u64>,
) -> Result<Json<Value>, AppError> {
    let record = blocking(move || Ok(state.records.get(id)?)).await?;
    Ok(Json(json!({ "success": true, "record": record })))
}

pub async fn delete_record(
    State(state): State<AppState>,
    AdminUser(claims): AdminUser,
    Path(id): Path<u64>,
) -> Result<Json<Value>, AppError> {
    blocking(move || {
        state.records.get(id)?;
        Ok(state.records.soft_delete(id)?)
    })
    .await?;
    info!("{} deleted record {}", claims.username, id);
    Ok(Json(json!({
        "success": true,
        "message": "Record deleted successfully",
    })))
}

#[derive(Debug, Deserialize)]
pub struct StandardizeRequest {
    #[serde(default)]
    name: String,
}

pub async fn standardize_name(
    _user: AuthUser,
    Json(request): Json<StandardizeRequest>,
) -> Result<Json<Value>, AppError> {
    validate_name(&request.name, "Name")?;
    Ok(Json(json!({
        "success": true,
        "original_name": request.name,
        "standardized_name": standardize(&request.name),
    })))
}
