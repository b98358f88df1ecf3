use std::{
    env,
    time::Duration,
};

use reqwest::Client;
use serde::Deserialize;

use crate::core::{
    http::{
        fetch_bytes,
        http_client,
    },
    CardsmithError,
    Profile,
};

pub mod normalize;

pub use normalize::normalize_to_base64;

pub const API_KEY_ENV: &str = "GENERATE_IMAGES_OPENAI_API_KEY";

/// Produces a base64 JPEG illustrating a piece of text.
#[allow(async_fn_in_trait)]
pub trait ImageGenerator {
    async fn generate(&self, text: &str) -> Result<String, CardsmithError>;
}

#[derive(Debug, Deserialize)]
struct GenerationResponse {
    #[serde(default)]
    data: Option<Vec<Option<GeneratedEntry>>>,
    error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
struct GeneratedEntry {
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// OpenAI image generation followed by a download of the returned URL.
pub struct OpenAiImages {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    size: Option<String>,
    prompt_template: String,
}

impl OpenAiImages {
    pub fn new(client: Client, api_key: String, profile: &Profile) -> Self {
        Self {
            client,
            api_key,
            base_url: profile.openai_base.trim_end_matches('/').to_string(),
            model: profile.image_model.clone(),
            size: profile.image_size.clone(),
            prompt_template: profile.prompt_template.clone(),
        }
    }

    pub fn from_env(profile: &Profile) -> Result<Self, CardsmithError> {
        let api_key = api_key_from(env::var(API_KEY_ENV).ok())?;
        let client = http_client(profile.request_timeout_secs.map(Duration::from_secs))?;
        Ok(Self::new(client, api_key, profile))
    }

    pub fn prompt_for(&self, text: &str) -> String {
        format!("{}{}", self.prompt_template, text)
    }

    /// Asks for exactly one image and returns its transient URL.
    pub async fn request_image_url(&self, text: &str) -> Result<String, CardsmithError> {
        let mut body = serde_json::json!({
            "model": self.model,
            "prompt": self.prompt_for(text),
            "n": 1,
        });
        if let Some(size) = &self.size {
            body["size"] = serde_json::Value::String(size.clone());
        }

        log::debug!("Requesting image from {} for: {}", self.base_url, text);
        let response: GenerationResponse = self
            .client
            .post(format!("{}/images/generations", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?
            .json()
            .await?;

        if let Some(error) = response.error {
            return Err(CardsmithError::Generation(format!("{} (for: {})", error.message, text)));
        }

        response
            .data
            .unwrap_or_default()
            .into_iter()
            .next()
            .flatten()
            .and_then(|entry| entry.url)
            .ok_or_else(|| {
                CardsmithError::Generation(format!("Image URL not found in the response for: {text}"))
            })
    }
}

/// A blank key counts as missing.
pub fn api_key_from(value: Option<String>) -> Result<String, CardsmithError> {
    value
        .filter(|key| !key.trim().is_empty())
        .ok_or(CardsmithError::MissingApiKey(API_KEY_ENV))
}

impl ImageGenerator for OpenAiImages {
    async fn generate(&self, text: &str) -> Result<String, CardsmithError> {
        let url = self.request_image_url(text).await?;
        let bytes = fetch_bytes(&self.client, &url).await?;
        normalize_to_base64(&bytes)
    }
}
