use thiserror::Error;

use crate::core::models::CardLayout;

#[derive(Error, Debug)]
pub enum CardsmithError {
    #[error("Image generation failed: {0}")]
    Generation(String),

    #[error("Image fetch failed: {0}")]
    Fetch(String),

    #[error("Network error: {0}")]
    Network(Box<reqwest::Error>),

    #[error("Image processing error: {0}")]
    Image(Box<image::ImageError>),

    #[error("I/O error: {0}")]
    Io(Box<std::io::Error>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HJson error: {0}")]
    HJson(#[from] serde_hjson::Error),

    #[error("Environment variable {0} is not set or is empty")]
    MissingApiKey(&'static str),

    #[error("Unknown profile preset: {0}")]
    UnknownPreset(String),

    #[error("Sentence file does not match the {expected} layout: {reason}")]
    LayoutMismatch { expected: CardLayout, reason: String },

    #[error("CardsmithError: {0}")]
    Custom(String),
}

impl From<std::io::Error> for CardsmithError {
    fn from(error: std::io::Error) -> Self {
        CardsmithError::Io(Box::new(error))
    }
}

impl From<reqwest::Error> for CardsmithError {
    fn from(error: reqwest::Error) -> Self {
        CardsmithError::Network(Box::new(error))
    }
}

impl From<image::ImageError> for CardsmithError {
    fn from(error: image::ImageError) -> Self {
        CardsmithError::Image(Box::new(error))
    }
}
