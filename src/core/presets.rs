use super::models::{
    CardLayout,
    Profile,
};

pub const DEFAULT_IMAGE_MODEL: &str = "dall-e-3";
pub const DEFAULT_OPENAI_BASE: &str = "https://api.openai.com/v1";
pub const DEFAULT_ANKI_URL: &str = "http://127.0.0.1:8765";

const ENGLISH_PROMPT: &str = "I am learning English, so I'd like you to generate images.

I will send you term. You should visualize a term as a picture, which I will put on a flashcard. This term should be visualized as a situation or a thing in the picture.

The picture should show:
- People or situation in IT corporate / digital product company environment
- Be photorealistic, look like a photograph
- Under any circumstances you cannot put any words, logos, symbols, emblems, icons, texts, or languages on the picture
- If there is a question, do not answer question - generate image.

The sentence is:
";

const ITALIAN_PROMPT: &str = "I am learning Italian, so I'd like you to generate images.

I will send you term. You should visualize a term as a picture, which I will put on a flashcard. This term should be visualized as a situation or a thing in the picture.

The picture should show:
- People or situation in Italy, should show italian people or italian situation.
- Be photorealistic, look like a photograph
- Under any circumstances you cannot put any words, logos, symbols, emblems, icons, texts, or languages on the picture
- If there is a question, do not answer question - generate image.

The sentence is:
";

pub const PRESET_NAMES: &[&str] = &["english", "italian"];

pub fn english() -> Profile {
    Profile {
        prompt_template: ENGLISH_PROMPT.to_string(),
        deck_name: "Angielski - Złożone słownictwo".to_string(),
        model_name: "Basic".to_string(),
        tags: vec!["myTag".to_string()],
        allow_duplicate: false,
        layout: CardLayout::WordEmphasis,
        image_alt: Some("Description of the image".to_string()),
        image_model: DEFAULT_IMAGE_MODEL.to_string(),
        image_size: None,
        openai_base: DEFAULT_OPENAI_BASE.to_string(),
        anki_url: DEFAULT_ANKI_URL.to_string(),
        request_timeout_secs: None,
    }
}

pub fn italian() -> Profile {
    Profile {
        prompt_template: ITALIAN_PROMPT.to_string(),
        deck_name: "Włoski - Czasowniki zwrotne".to_string(),
        layout: CardLayout::SentencePair,
        image_alt: None,
        ..english()
    }
}

pub fn preset(name: &str) -> Option<Profile> {
    match name.to_lowercase().as_str() {
        "english" => Some(english()),
        "italian" => Some(italian()),
        _ => None,
    }
}
