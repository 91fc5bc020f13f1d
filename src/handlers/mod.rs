/// HTTP request handlers
use crate::domain::{DashboardView, FilterOptions, Health, LaunchDetail};
use crate::errors::ApiError;
use crate::services::{DashboardQuery, DashboardService};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Utc;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub dashboard_service: Arc<DashboardService>,
}

/// Successful response wrapper
#[derive(Serialize)]
pub struct SuccessResponse<T: Serialize> {
    pub ok: bool,
    #[serde(flatten)]
    pub data: T,
}

impl<T: Serialize> SuccessResponse<T> {
    pub fn new(data: T) -> Self {
        Self { ok: true, data }
    }
}

/// Health check handler
pub async fn health() -> Json<Health> {
    Json(Health {
        status: "ok",
        now: Utc::now(),
    })
}

/// Dropdown options for both filter axes
pub async fn get_filters() -> Json<SuccessResponse<FilterOptions>> {
    Json(SuccessResponse::new(FilterOptions::all()))
}

/// Current page of the launch table
pub async fn get_launches(
    Query(query): Query<DashboardQuery>,
    State(state): State<AppState>,
) -> Result<Json<SuccessResponse<DashboardView>>, ApiError> {
    let view = state.dashboard_service.view(&query, Utc::now()).await?;
    Ok(Json(SuccessResponse::new(view)))
}

/// Full detail for a row on the requested page
pub async fn get_launch_detail(
    Path(id): Path<String>,
    Query(query): Query<DashboardQuery>,
    State(state): State<AppState>,
) -> Result<Json<SuccessResponse<LaunchDetail>>, ApiError> {
    let detail = state
        .dashboard_service
        .detail(&id, &query, Utc::now())
        .await?;
    Ok(Json(SuccessResponse::new(detail)))
}

/// Reload launches and reference data from SpaceX
pub async fn refresh(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let count = state.dashboard_service.reload().await?;
    Ok(Json(serde_json::json!(SuccessResponse::new(
        serde_json::json!({
            "launches": count
        })
    ))))
}
