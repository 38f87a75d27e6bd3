use crate::errors::{AppError, StreakError};
use crate::models::AppData;
use crate::storage::persist_data;
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub data: Arc<Mutex<AppData>>,
}

impl AppState {
    pub fn new(data_path: PathBuf, data: AppData) -> Self {
        Self {
            data_path,
            data: Arc::new(Mutex::new(data)),
        }
    }

    /// Runs one mutation against a copy of the collection, persists the
    /// copy and only then makes it current. The lock is held until the file
    /// is written, so requests never interleave on the same generation of
    /// the collection, and a failed save leaves memory untouched.
    pub async fn mutate<T, F>(&self, f: F) -> Result<T, AppError>
    where
        F: FnOnce(&mut AppData) -> Result<T, StreakError>,
    {
        let mut data = self.data.lock().await;
        let mut next = data.clone();
        let value = f(&mut next)?;
        persist_data(&self.data_path, &next).await?;
        *data = next;
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewStreak, RepeatType};
    use crate::schedule::tests::at;

    fn one_streak() -> (AppData, String) {
        let mut data = AppData::default();
        let id = data
            .create(
                NewStreak {
                    name: "Read".to_string(),
                    repeat_type: RepeatType::Day,
                    ..NewStreak::default()
                },
                &at(2024, 1, 1, 9, 0),
            )
            .unwrap()
            .id;
        (data, id)
    }

    #[tokio::test]
    async fn failed_save_keeps_previous_collection() {
        let (data, id) = one_streak();
        // A directory cannot be written as a file.
        let state = AppState::new(std::env::temp_dir(), data);

        let result = state
            .mutate(|data| data.toggle(&id, &at(2024, 1, 1, 10, 0)))
            .await;
        assert!(result.is_err());
        assert_eq!(state.data.lock().await.get(&id).unwrap().count, 0);
    }

    #[tokio::test]
    async fn rejected_mutation_is_not_saved() {
        let (data, id) = one_streak();
        let path = std::env::temp_dir().join(format!(
            "streak_tracker_state_{}_{}.json",
            std::process::id(),
            id
        ));
        let state = AppState::new(path.clone(), data);

        let missing = state.mutate(|data| data.reset("missing", &at(2024, 1, 2, 9, 0))).await;
        assert_eq!(missing.unwrap_err().status, axum::http::StatusCode::NOT_FOUND);
        assert!(!path.exists());

        let toggled = state
            .mutate(|data| data.toggle(&id, &at(2024, 1, 2, 9, 0)))
            .await
            .unwrap();
        assert_eq!(toggled.count, 1);
        assert_eq!(state.data.lock().await.get(&id).unwrap().count, 1);
        assert_eq!(crate::storage::load_data(&path).await.streaks[0].count, 1);
        let _ = tokio::fs::remove_file(&path).await;
    }
}
