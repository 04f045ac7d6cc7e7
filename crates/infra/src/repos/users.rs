use sqlx::{PgPool, Result};
use uuid::Uuid;

use crate::models::{PlayerRow, UserRow};

#[derive(Debug, Clone)]
pub struct CreateUser {
    pub name: String,
    pub surname: String,
    pub username: String,
    pub password_hash: String,
    pub photo: Option<String>,
}

#[derive(Debug, Clone)]
pub struct UpdateUser {
    pub name: String,
    pub surname: String,
    pub photo: Option<String>,
    /// `None` keeps the current password.
    pub password_hash: Option<String>,
}

const PLAYER_COLUMNS: &str = "id, name, surname, username, photo, created_at";

pub struct UserRepo {
    db: PgPool,
}

impl UserRepo {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn create(&self, data: CreateUser) -> Result<PlayerRow> {
        let row = sqlx::query_as::<_, PlayerRow>(&format!(
            r#"
            INSERT INTO users (id, name, surname, username, password_hash, photo)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {PLAYER_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(data.name)
        .bind(data.surname)
        .bind(data.username)
        .bind(data.password_hash)
        .bind(data.photo)
        .fetch_one(&self.db)
        .await?;

        Ok(row)
    }

    pub async fn list(&self) -> Result<Vec<PlayerRow>> {
        let rows = sqlx::query_as::<_, PlayerRow>(&format!(
            "SELECT {PLAYER_COLUMNS} FROM users ORDER BY name, surname"
        ))
        .fetch_all(&self.db)
        .await?;

        Ok(rows)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<PlayerRow>> {
        let row = sqlx::query_as::<_, PlayerRow>(&format!(
            "SELECT {PLAYER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        Ok(row)
    }

    /// Full record including the password hash, for credential checks only.
    pub async fn get_by_username(&self, username: &str) -> Result<Option<UserRow>> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, name, surname, username, password_hash, photo, created_at FROM users WHERE username = $1"
        )
        .bind(username)
        .fetch_optional(&self.db)
        .await?;

        Ok(row)
    }

    pub async fn update(&self, id: Uuid, data: UpdateUser) -> Result<Option<PlayerRow>> {
        let row = sqlx::query_as::<_, PlayerRow>(&format!(
            r#"
            UPDATE users
            SET name = $2, surname = $3, photo = $4,
                password_hash = COALESCE($5, password_hash)
            WHERE id = $1
            RETURNING {PLAYER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(data.name)
        .bind(data.surname)
        .bind(data.photo)
        .bind(data.password_hash)
        .fetch_optional(&self.db)
        .await?;

        Ok(row)
    }

    /// Deletes the user; the schema cascades to every match referencing them.
    pub async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
