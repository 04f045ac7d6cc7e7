use axum::{
    extract::{Query, State},
    http::StatusCode,
    Extension, Json,
};
use infra::models::{MatchDetailRow, MatchRow};
use infra::pagination::LimitOffset;
use infra::repos::MatchRepo;
use infra::rules::{validate, MatchMode, MatchSubmission};
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::Claims;
use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// GET /api/matches — newest first, names joined in for display.
pub async fn list_matches(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Vec<MatchDetailRow>>, AppError> {
    let page = LimitOffset::new(query.limit, query.offset);
    let matches = MatchRepo::new(state.db.clone()).list_detailed(page).await?;
    Ok(Json(matches))
}

/// Candidate match as submitted. Side A's principal is not part of the
/// body; it is bound to the authenticated caller.
#[derive(Debug, Deserialize)]
pub struct RecordMatchRequest {
    pub mode: Option<MatchMode>,
    pub teammate_a: Option<Uuid>,
    pub player_b: Option<Uuid>,
    pub teammate_b: Option<Uuid>,
    pub score_a: Option<i32>,
    pub score_b: Option<i32>,
}

/// POST /api/matches — validates, derives the winner, persists. Each rule
/// rejection maps to a 400 with its specific reason.
pub async fn record_match(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<RecordMatchRequest>,
) -> Result<(StatusCode, Json<MatchRow>), AppError> {
    let submission = MatchSubmission {
        mode: payload.mode,
        player_a: Some(claims.user_id()?),
        teammate_a: payload.teammate_a,
        player_b: payload.player_b,
        teammate_b: payload.teammate_b,
        score_a: payload.score_a,
        score_b: payload.score_b,
    };

    let validated = validate(&submission)?;

    let row = MatchRepo::new(state.db.clone()).create(validated).await?;

    tracing::info!(match_id = %row.id, winner = %row.winner_id, "recorded match");
    Ok((StatusCode::CREATED, Json(row)))
}
