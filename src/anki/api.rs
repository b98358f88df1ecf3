use reqwest::Client;
use serde::{
    Deserialize,
    Serialize,
};

use crate::core::{
    CardsmithError,
    FlashcardNote,
};

pub const ANKI_CONNECT_VERSION: u32 = 6;

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub result: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn unwrap_result(self) -> Option<T> {
        if let Some(error) = &self.error {
            log::warn!("AnkiConnect error: {error}");
        }
        self.result
    }
}

#[derive(Debug, Clone)]
pub struct AnkiConnect {
    client: Client,
    url: String,
}

impl AnkiConnect {
    pub fn new(client: Client, url: &str) -> Self {
        Self { client, url: url.to_string() }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn make_request<T: for<'de> Deserialize<'de>>(
        &self,
        action: &str,
        params: Option<serde_json::Value>,
    ) -> Result<ApiResponse<T>, CardsmithError> {
        let mut body = serde_json::Map::new();
        body.insert("action".to_string(), serde_json::Value::String(action.to_string()));
        body.insert("version".to_string(), serde_json::Value::Number(ANKI_CONNECT_VERSION.into()));

        if let Some(params) = params {
            body.insert("params".to_string(), params);
        }

        log::debug!("AnkiConnect request: {action}");
        let response: ApiResponse<T> =
            self.client.post(&self.url).json(&body).send().await?.json().await?;

        Ok(response)
    }

    pub async fn get_version(&self) -> Result<u32, CardsmithError> {
        let response: ApiResponse<u32> = self.make_request("version", None).await?;

        Ok(response.unwrap_result().unwrap_or_default())
    }

    /// Response is handed back as is; AnkiConnect reports the stored filename on success.
    pub async fn store_media_file(
        &self,
        filename: &str,
        data: &str,
    ) -> Result<ApiResponse<serde_json::Value>, CardsmithError> {
        let params = serde_json::json!({ "filename": filename, "data": data });
        self.make_request("storeMediaFile", Some(params)).await
    }

    pub async fn add_note(&self, note: &FlashcardNote) -> Result<ApiResponse<u64>, CardsmithError> {
        let params = serde_json::json!({
            "note": {
                "deckName": note.deck_name,
                "modelName": note.model_name,
                "fields": {
                    "Front": note.front_field(),
                    "Back": note.back,
                },
                "tags": note.tags,
                "options": {
                    "allowDuplicate": note.allow_duplicate,
                },
            }
        });
        self.make_request("addNote", Some(params)).await
    }
}
