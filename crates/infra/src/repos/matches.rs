use sqlx::{PgPool, Result};
use uuid::Uuid;

use crate::models::{MatchDetailRow, MatchRow};
use crate::pagination::LimitOffset;
use crate::rules::ValidatedMatch;

pub struct MatchRepo {
    db: PgPool,
}

impl MatchRepo {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Persists a match that already passed the rules. Matches are immutable
    /// once recorded; there is no update or delete path.
    pub async fn create(&self, m: ValidatedMatch) -> Result<MatchRow> {
        let (player_a, teammate_a) = m.lineup.side_a();
        let (player_b, teammate_b) = m.lineup.side_b();

        let row = sqlx::query_as::<_, MatchRow>(
            r#"
            INSERT INTO matches (id, player_a, teammate_a, player_b, teammate_b, score_a, score_b, winner_id, is_doubles)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, player_a, teammate_a, player_b, teammate_b, score_a, score_b, winner_id, is_doubles, played_at
            "#
        )
        .bind(Uuid::new_v4())
        .bind(player_a)
        .bind(teammate_a)
        .bind(player_b)
        .bind(teammate_b)
        .bind(m.score_a)
        .bind(m.score_b)
        .bind(m.winner)
        .bind(m.lineup.is_doubles())
        .fetch_one(&self.db)
        .await?;

        Ok(row)
    }

    /// Every match a user took part in, any slot, oldest first. This is the
    /// stats aggregator's input.
    pub async fn history_for(&self, user_id: Uuid) -> Result<Vec<MatchRow>> {
        let rows = sqlx::query_as::<_, MatchRow>(
            r#"
            SELECT id, player_a, teammate_a, player_b, teammate_b, score_a, score_b, winner_id, is_doubles, played_at
            FROM matches
            WHERE player_a = $1 OR teammate_a = $1 OR player_b = $1 OR teammate_b = $1
            ORDER BY played_at ASC
            "#
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;

        Ok(rows)
    }

    /// Match history newest first, display names joined in for all four
    /// slots. Teammate joins are LEFT JOINs since singles rows hold NULLs.
    pub async fn list_detailed(&self, page: LimitOffset) -> Result<Vec<MatchDetailRow>> {
        let rows = sqlx::query_as::<_, MatchDetailRow>(
            r#"
            SELECT
                m.id,
                m.player_a,
                pa.name AS player_a_name,
                pa.surname AS player_a_surname,
                m.teammate_a,
                ta.name AS teammate_a_name,
                ta.surname AS teammate_a_surname,
                m.player_b,
                pb.name AS player_b_name,
                pb.surname AS player_b_surname,
                m.teammate_b,
                tb.name AS teammate_b_name,
                tb.surname AS teammate_b_surname,
                m.score_a,
                m.score_b,
                m.winner_id,
                w.name AS winner_name,
                w.surname AS winner_surname,
                m.is_doubles,
                m.played_at
            FROM matches m
            JOIN users pa ON m.player_a = pa.id
            JOIN users pb ON m.player_b = pb.id
            JOIN users w ON m.winner_id = w.id
            LEFT JOIN users ta ON m.teammate_a = ta.id
            LEFT JOIN users tb ON m.teammate_b = tb.id
            ORDER BY m.played_at DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(&self.db)
        .await?;

        Ok(rows)
    }
}
