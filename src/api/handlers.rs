use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Extension, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::TitlesResponse,
    services::{
        diagnostics::{self, DiagnosticsReport},
        titles, TitleQuery,
    },
};

use super::AppState;

/// Query parameters of `GET /api/titles`
#[derive(Debug, Deserialize)]
pub struct ListTitlesParams {
    /// Search by name
    pub q: Option<String>,
    pub genre: Option<String>,
    /// movie or series
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub limit: Option<i64>,
}

/// Readiness message
pub async fn root() -> Json<Value> {
    Json(json!({ "message": "Streaming API ready" }))
}

/// List catalog titles
pub async fn list_titles(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    params: Result<Query<ListTitlesParams>, QueryRejection>,
) -> AppResult<Json<TitlesResponse>> {
    let Query(params) = params.map_err(|e| AppError::InvalidInput(e.body_text()))?;

    tracing::info!(
        request_id = %request_id,
        q = ?params.q,
        genre = ?params.genre,
        kind = ?params.kind,
        limit = ?params.limit,
        "Processing title listing request"
    );

    let query = TitleQuery::new(
        params.q.as_deref(),
        params.genre.as_deref(),
        params.kind.as_deref(),
        params.limit,
    )?;

    let items = titles::list_titles(state.store(), &state.seeder, &query).await?;

    Ok(Json(TitlesResponse { items }))
}

/// Store and configuration diagnostics
pub async fn diagnostics(State(state): State<AppState>) -> Json<DiagnosticsReport> {
    Json(diagnostics::inspect(state.store(), &state.config).await)
}
