use std::path::Path;

use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;

/// Public URL prefix photos are served under; also how they are stored in
/// the `users.photo` column.
pub const PUBLIC_PREFIX: &str = "/uploads/";

pub async fn ensure_dir(state: &AppState) -> Result<(), AppError> {
    tokio::fs::create_dir_all(state.uploads_dir())
        .await
        .map_err(|e| AppError::Anyhow(anyhow::anyhow!("failed to create uploads dir: {e}")))
}

/// Writes an uploaded photo to disk under a fresh name and returns its
/// public path. The original file name only contributes its extension.
pub async fn store_photo(
    state: &AppState,
    original_name: &str,
    bytes: &[u8],
) -> Result<String, AppError> {
    let extension = Path::new(original_name)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("bin");
    let file_name = format!("profile-{}.{extension}", Uuid::new_v4());

    let path = state.uploads_dir().join(&file_name);
    tokio::fs::write(&path, bytes)
        .await
        .map_err(|e| AppError::Anyhow(anyhow::anyhow!("failed to store photo: {e}")))?;

    Ok(format!("{PUBLIC_PREFIX}{file_name}"))
}

/// Best-effort removal of a previously stored photo. Missing files are not
/// an error; a stale row must not block profile edits or deletes.
pub async fn remove_photo(state: &AppState, public_path: &str) {
    let Some(file_name) = public_path.strip_prefix(PUBLIC_PREFIX) else {
        return;
    };

    let path = state.uploads_dir().join(file_name);
    if let Err(e) = tokio::fs::remove_file(&path).await {
        tracing::warn!("failed to remove photo {}: {e}", path.display());
    }
}
