use sqlx::PgPool;

pub type Db = PgPool;

pub async fn ping(pool: &Db) -> Result<(), sqlx::Error> {
    let _: i32 = sqlx::query_scalar("SELECT 1").fetch_one(pool).await?;
    Ok(())
}

/// Creates the `users` and `matches` relations when missing. Every player
/// column on `matches` cascades on user deletion, so removing a user also
/// removes every match referencing them in any slot.
pub async fn init_schema(pool: &Db) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id UUID PRIMARY KEY,
            name TEXT NOT NULL,
            surname TEXT NOT NULL,
            username TEXT UNIQUE NOT NULL,
            password_hash TEXT NOT NULL,
            photo TEXT,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS matches (
            id UUID PRIMARY KEY,
            player_a UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            teammate_a UUID REFERENCES users(id) ON DELETE CASCADE,
            player_b UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            teammate_b UUID REFERENCES users(id) ON DELETE CASCADE,
            score_a INTEGER NOT NULL,
            score_b INTEGER NOT NULL,
            winner_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            is_doubles BOOLEAN NOT NULL DEFAULT FALSE,
            played_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}