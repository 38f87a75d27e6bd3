use crate::errors::AppError;
use crate::models::AppData;
use std::path::Path;
use tokio::fs;
use tracing::{debug, error, warn};

/// Loads the streak list. A missing or unreadable file yields an empty
/// collection so the service can still start.
pub async fn load_data(path: &Path) -> AppData {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice::<AppData>(&bytes) {
            Ok(mut data) => {
                for id in data.drop_invalid_weekdays() {
                    warn!(streak_id = %id, "dropped weekday indices outside 0-6");
                }
                data
            }
            Err(err) => {
                error!(path = %path.display(), "failed to parse data file: {err}");
                AppData::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            warn!(path = %path.display(), "no data file yet, starting empty");
            AppData::default()
        }
        Err(err) => {
            error!(path = %path.display(), "failed to read data file: {err}");
            AppData::default()
        }
    }
}

pub async fn persist_data(path: &Path, data: &AppData) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(data).map_err(AppError::internal)?;
    fs::write(path, payload).await.map_err(AppError::internal)?;
    debug!(path = %path.display(), streaks = data.streaks.len(), "persisted streaks");
    Ok(())
}
