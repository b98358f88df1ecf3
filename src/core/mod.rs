pub mod errors;
pub mod http;
pub mod models;
pub mod pipeline;
pub mod presets;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_support;

pub use errors::CardsmithError;
pub use models::{ CardLayout, FlashcardNote, GeneratedImage, Profile, SentenceItem };
