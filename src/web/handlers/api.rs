use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

use crate::llm::models::{AnalyzeRequest, AnalyzeResponse, SqlGenRequest, SqlGenResponse};
use crate::services::{analysis, sql_generation};
use crate::web::error::ApiError;
use crate::web::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub version: String,
    pub uptime_seconds: i64,
    pub backend: String,
    pub sql_model: String,
    pub analyze_model: String,
}

/// Generate T-SQL from a natural-language request plus optional hints and metadata.
pub async fn generate_sql(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SqlGenRequest>,
) -> Result<Json<SqlGenResponse>, ApiError> {
    info!("SQL generation requested: {}", payload.natural_language);

    let sql = sql_generation::generate_sql(
        &state.llm_manager,
        &state.templates,
        &state.config.llm.sql_model,
        state.config.sql_guard.mode,
        &payload,
    )
    .await?;

    Ok(Json(SqlGenResponse { generated_sql: sql }))
}

/// Summarize tabular query results for capacity planning.
pub async fn analyze(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    info!("Analysis requested for {} rows", payload.rows.len());

    let analysis = analysis::analyze_results(
        &state.llm_manager,
        &state.templates,
        &state.config.llm.analyze_model,
        &payload,
    )
    .await?;

    Ok(Json(AnalyzeResponse { analysis }))
}

pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthStatus> {
    let uptime = chrono::Utc::now()
        .signed_duration_since(state.startup_time)
        .num_seconds();

    Json(HealthStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: uptime,
        backend: state.llm_manager.backend().to_string(),
        sql_model: state.config.llm.sql_model.clone(),
        analyze_model: state.config.llm.analyze_model.clone(),
    })
}
