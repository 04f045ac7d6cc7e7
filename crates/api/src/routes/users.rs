use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use infra::models::PlayerRow;
use infra::repos::{CreateUser, MatchRepo, UpdateUser, UserRepo};
use infra::stats::{compute_user_stats, UserStats};
use uuid::Uuid;

use crate::auth::PasswordService;
use crate::error::AppError;
use crate::state::AppState;
use crate::uploads;

/// Fields of the multipart profile form. Create and update share the shape;
/// which fields are mandatory differs per handler.
#[derive(Debug, Default)]
struct ProfileForm {
    name: Option<String>,
    surname: Option<String>,
    username: Option<String>,
    password: Option<String>,
    photo: Option<(String, Vec<u8>)>,
    photo_removed: bool,
}

async fn read_profile_form(mut multipart: Multipart) -> Result<ProfileForm, AppError> {
    let mut form = ProfileForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("malformed multipart body: {e}")))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        match name.as_str() {
            "photo" => {
                let file_name = field
                    .file_name()
                    .unwrap_or("photo.bin")
                    .to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("failed to read photo: {e}")))?;
                if !bytes.is_empty() {
                    form.photo = Some((file_name, bytes.to_vec()));
                }
            }
            _ => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("failed to read field: {e}")))?;
                match name.as_str() {
                    "name" => form.name = Some(value),
                    "surname" => form.surname = Some(value),
                    "username" => form.username = Some(value),
                    "password" if !value.is_empty() => form.password = Some(value),
                    "photo_removed" => form.photo_removed = value == "true",
                    _ => {}
                }
            }
        }
    }

    Ok(form)
}

fn required(value: Option<String>, field: &str) -> Result<String, AppError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(AppError::BadRequest(format!("{field} is required"))),
    }
}

/// GET /api/users
pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<Vec<PlayerRow>>, AppError> {
    let players = UserRepo::new(state.db.clone()).list().await?;
    Ok(Json(players))
}

/// GET /api/users/:id
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PlayerRow>, AppError> {
    let player = UserRepo::new(state.db.clone())
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("player not found".to_string()))?;

    Ok(Json(player))
}

/// POST /api/users — authenticated "add player", multipart with an
/// optional photo.
pub async fn create_user(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<PlayerRow>), AppError> {
    let form = read_profile_form(multipart).await?;

    let name = required(form.name, "name")?;
    let surname = required(form.surname, "surname")?;
    let username = required(form.username, "username")?;
    let password = required(form.password, "password")?;

    let photo = match &form.photo {
        Some((file_name, bytes)) => Some(uploads::store_photo(&state, file_name, bytes).await?),
        None => None,
    };

    let player = UserRepo::new(state.db.clone())
        .create(CreateUser {
            name,
            surname,
            username,
            password_hash: PasswordService::hash_password(&password)?,
            photo,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(player)))
}

/// PUT /api/users/:id — profile edit; username is immutable. A new photo
/// replaces the stored file, `photo_removed=true` drops it.
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<Json<PlayerRow>, AppError> {
    let form = read_profile_form(multipart).await?;

    let name = required(form.name, "name")?;
    let surname = required(form.surname, "surname")?;

    let repo = UserRepo::new(state.db.clone());
    let existing = repo
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("player not found".to_string()))?;

    let photo = match &form.photo {
        Some((file_name, bytes)) => Some(uploads::store_photo(&state, file_name, bytes).await?),
        None if form.photo_removed => None,
        None => existing.photo.clone(),
    };

    let password_hash = match form.password {
        Some(password) => Some(PasswordService::hash_password(&password)?),
        None => None,
    };

    let updated = repo
        .update(
            id,
            UpdateUser {
                name,
                surname,
                photo,
                password_hash,
            },
        )
        .await?
        .ok_or_else(|| AppError::NotFound("player not found".to_string()))?;

    // The old file is dropped only after the row moved off it.
    if let Some(old_photo) = existing.photo {
        if updated.photo.as_deref() != Some(old_photo.as_str()) {
            uploads::remove_photo(&state, &old_photo).await;
        }
    }

    Ok(Json(updated))
}

/// DELETE /api/users/:id — cascades to every match the player appears in.
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let repo = UserRepo::new(state.db.clone());
    let existing = repo
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("player not found".to_string()))?;

    if !repo.delete(id).await? {
        return Err(AppError::NotFound("player not found".to_string()));
    }

    if let Some(photo) = existing.photo {
        uploads::remove_photo(&state, &photo).await;
    }

    tracing::info!(player = %id, "deleted player and their matches");
    Ok(Json(
        serde_json::json!({ "message": "player and associated matches deleted" }),
    ))
}

/// GET /api/users/:id/stats — aggregated record. A player with no matches
/// (or an unknown id) gets zeroed stats, not an error.
pub async fn user_stats(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<UserStats>, AppError> {
    let history = MatchRepo::new(state.db.clone()).history_for(id).await?;
    Ok(Json(compute_user_stats(id, &history)))
}
