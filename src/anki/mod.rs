use std::time::Duration;

use tokio::time::sleep;

use crate::core::{
    CardsmithError,
    FlashcardNote,
};

pub mod api;

pub use api::{
    AnkiConnect,
    ApiResponse,
};

/// Where generated media and notes end up.
#[allow(async_fn_in_trait)]
pub trait NoteStore {
    async fn store_media(
        &self,
        filename: &str,
        data: &str,
    ) -> Result<ApiResponse<serde_json::Value>, CardsmithError>;

    async fn add_note(&self, note: &FlashcardNote) -> Result<ApiResponse<u64>, CardsmithError>;
}

impl NoteStore for AnkiConnect {
    async fn store_media(
        &self,
        filename: &str,
        data: &str,
    ) -> Result<ApiResponse<serde_json::Value>, CardsmithError> {
        self.store_media_file(filename, data).await
    }

    async fn add_note(&self, note: &FlashcardNote) -> Result<ApiResponse<u64>, CardsmithError> {
        AnkiConnect::add_note(self, note).await
    }
}

pub async fn wait_awake(
    anki: &AnkiConnect,
    wait_time: Duration,
    max_attempts: u32,
) -> Result<bool, CardsmithError> {
    for attempt in 1..=max_attempts {
        match anki.get_version().await {
            Ok(version) => {
                log::info!("AnkiConnect is online at {}. Version: {}", anki.url(), version);
                return Ok(true);
            }
            Err(err) => {
                log::warn!(
                    "AnkiConnect attempt {} of {} failed. Retrying in {:?}... Error: {}",
                    attempt,
                    max_attempts,
                    wait_time,
                    err
                );
                if attempt < max_attempts {
                    sleep(wait_time).await;
                }
            }
        }
    }
    Ok(false)
}
