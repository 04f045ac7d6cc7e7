use axum::{extract::State, http::StatusCode, Json};
use infra::models::PlayerRow;
use infra::repos::{CreateUser, UserRepo};
use serde::{Deserialize, Serialize};

use crate::auth::PasswordService;
use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub name: String,
    pub surname: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

/// POST /api/register
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<PlayerRow>), AppError> {
    if payload.username.trim().is_empty()
        || payload.password.is_empty()
        || payload.name.trim().is_empty()
        || payload.surname.trim().is_empty()
    {
        return Err(AppError::BadRequest(
            "username, password, name and surname are required".to_string(),
        ));
    }

    let password_hash = PasswordService::hash_password(&payload.password)?;

    let user = UserRepo::new(state.db.clone())
        .create(CreateUser {
            name: payload.name,
            surname: payload.surname,
            username: payload.username,
            password_hash,
            photo: None,
        })
        .await?;

    tracing::info!(username = %user.username, "registered user");
    Ok((StatusCode::CREATED, Json(user)))
}

/// POST /api/login
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let user = UserRepo::new(state.db.clone())
        .get_by_username(&payload.username)
        .await?
        .ok_or_else(|| AppError::Unauthorized("invalid username or password".to_string()))?;

    if !PasswordService::verify_password(&payload.password, &user.password_hash)? {
        return Err(AppError::Unauthorized(
            "invalid username or password".to_string(),
        ));
    }

    let token = state.jwt_service().create_token(user.id, user.username)?;

    Ok(Json(LoginResponse { token }))
}
