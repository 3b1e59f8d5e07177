use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::error::AppResult;
use crate::state::AppState;

/// Liveness response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    pub ok: bool,
}

/// GET /health -- liveness only; never touches the database.
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse { ok: true })
}

/// GET /dbcheck -- returns the database server's clock, or 500 with the
/// store's error message when it is unreachable.
async fn db_check(State(state): State<AppState>) -> AppResult<Json<notes_db::DbClock>> {
    let clock = notes_db::current_time(&state.pool).await?;
    Ok(Json(clock))
}

/// Mount health and database check routes at the root.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/dbcheck", get(db_check))
}
