//! Alert endpoint handlers.

use axum::extract::{Path, State};
use axum::http::header::LOCATION;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::application::error::AlertError;
use crate::application::services::alert::UpdateOutcome;
use crate::domain::entities::alert::{Alert, AlertId, DetailedAlert};
use crate::domain::value_objects::enabled::parse_enabled;

use super::error::ApiError;
use super::params::FormParams;
use super::principal::MaybePrincipal;
use super::AppState;

fn parse_id(raw: &str) -> Result<AlertId, ApiError> {
    raw.parse().map_err(|_| ApiError::BadId(raw.to_string()))
}

/// POST /alerts
pub async fn create_alert(
    State(state): State<AppState>,
    MaybePrincipal(principal): MaybePrincipal,
    params: FormParams,
) -> Result<Response, ApiError> {
    let name = params.get("name").unwrap_or_default();
    let enabled = parse_enabled(params.get("enabled"));

    let alert = state
        .service
        .create_alert(principal.as_ref(), name, enabled)?;

    Ok((
        StatusCode::CREATED,
        [(LOCATION, format!("/alerts/{}", alert.id))],
        "Add alert successfully",
    )
        .into_response())
}

/// PATCH|PUT /alerts/{id}
pub async fn update_alert(
    State(state): State<AppState>,
    MaybePrincipal(principal): MaybePrincipal,
    Path(raw_id): Path<String>,
    params: FormParams,
) -> Result<Response, ApiError> {
    state.service.authenticate(principal.as_ref())?;
    let id = parse_id(&raw_id)?;
    let enabled = parse_enabled(params.get("enabled"));

    let outcome = state
        .service
        .update_alert(principal.as_ref(), id, enabled)
        .await?;

    match outcome {
        UpdateOutcome::Synced(_) => {
            Ok((StatusCode::ACCEPTED, "Save alert successfully").into_response())
        }
        UpdateOutcome::SaveFailed(e) => Err(ApiError::SaveFailed(e)),
        UpdateOutcome::SyncFailed { error, .. } => Err(AlertError::Sync(error).into()),
    }
}

/// GET /alerts/{id}
pub async fn get_alert(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<DetailedAlert>, ApiError> {
    let id = parse_id(&raw_id)?;
    Ok(Json(state.service.get_detailed_alert(id)?))
}

/// GET /alerts
pub async fn list_alerts(
    State(state): State<AppState>,
    MaybePrincipal(principal): MaybePrincipal,
) -> Result<Json<Vec<Alert>>, ApiError> {
    Ok(Json(state.service.list_alerts(principal.as_ref())?))
}

/// DELETE /alerts/{id}
pub async fn delete_alert(
    State(state): State<AppState>,
    MaybePrincipal(principal): MaybePrincipal,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.service.authenticate(principal.as_ref())?;
    let id = parse_id(&raw_id)?;
    state.service.delete_alert(principal.as_ref(), id)?;
    Ok(StatusCode::NO_CONTENT)
}
