use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Full user record, password hash included. Never serialized to clients.
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub name: String,
    pub surname: String,
    pub username: String,
    pub password_hash: String,
    pub photo: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Public projection of a user, as returned by roster and profile endpoints.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct PlayerRow {
    pub id: Uuid,
    pub name: String,
    pub surname: String,
    pub username: String,
    pub photo: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct MatchRow {
    pub id: Uuid,
    pub player_a: Uuid,
    pub teammate_a: Option<Uuid>,
    pub player_b: Uuid,
    pub teammate_b: Option<Uuid>,
    pub score_a: i32,
    pub score_b: i32,
    pub winner_id: Uuid,
    pub is_doubles: bool,
    pub played_at: DateTime<Utc>,
}

/// Match history row enriched with display names for all four slots.
/// Teammate columns come from LEFT JOINs, so their names are optional too.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct MatchDetailRow {
    pub id: Uuid,
    pub player_a: Uuid,
    pub player_a_name: String,
    pub player_a_surname: String,
    pub teammate_a: Option<Uuid>,
    pub teammate_a_name: Option<String>,
    pub teammate_a_surname: Option<String>,
    pub player_b: Uuid,
    pub player_b_name: String,
    pub player_b_surname: String,
    pub teammate_b: Option<Uuid>,
    pub teammate_b_name: Option<String>,
    pub teammate_b_surname: Option<String>,
    pub score_a: i32,
    pub score_b: i32,
    pub winner_id: Uuid,
    pub winner_name: String,
    pub winner_surname: String,
    pub is_doubles: bool,
    pub played_at: DateTime<Utc>,
}
