use std::fmt;

use serde::{
    Deserialize,
    Serialize,
};

use super::utils::{
    bold_replacement,
    bold_word,
    escape_attribute,
};

/// How a sentence list is shaped and how its cards are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CardLayout {
    /// One sentence; the base word is bolded on the front and swapped for its
    /// replacement on the back.
    WordEmphasis,
    /// Separate front and back sentences, used verbatim.
    SentencePair,
}

impl fmt::Display for CardLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardLayout::WordEmphasis => write!(f, "wordEmphasis"),
            CardLayout::SentencePair => write!(f, "sentencePair"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordEmphasisItem {
    pub sentence: String,
    #[serde(rename = "baseWords", alias = "baseWord")]
    pub base_word: String,
    #[serde(rename = "replacedWords", alias = "replacedWord")]
    pub replaced_word: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentencePairItem {
    pub front_sentence: String,
    pub back_sentence: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SentenceItem {
    WordEmphasis(WordEmphasisItem),
    SentencePair(SentencePairItem),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardFaces {
    pub front: String,
    pub back: String,
}

impl SentenceItem {
    pub fn word(sentence: &str, base_word: &str, replaced_word: &str) -> Self {
        SentenceItem::WordEmphasis(WordEmphasisItem {
            sentence: sentence.to_string(),
            base_word: base_word.to_string(),
            replaced_word: replaced_word.to_string(),
        })
    }

    pub fn pair(front_sentence: &str, back_sentence: &str) -> Self {
        SentenceItem::SentencePair(SentencePairItem {
            front_sentence: front_sentence.to_string(),
            back_sentence: back_sentence.to_string(),
        })
    }

    /// Text used to identify the item in log lines.
    pub fn label(&self) -> &str {
        match self {
            SentenceItem::WordEmphasis(item) => &item.sentence,
            SentenceItem::SentencePair(item) => &item.front_sentence,
        }
    }

    /// Text appended to the prompt template.
    pub fn prompt_text(&self) -> &str {
        self.label()
    }

    /// Text the media filename is derived from.
    pub fn filename_source(&self) -> &str {
        match self {
            SentenceItem::WordEmphasis(item) => &item.sentence,
            SentenceItem::SentencePair(item) => &item.back_sentence,
        }
    }

    pub fn card_faces(&self) -> CardFaces {
        match self {
            SentenceItem::WordEmphasis(item) => CardFaces {
                front: bold_word(&item.sentence, &item.base_word),
                back: bold_replacement(&item.sentence, &item.base_word, &item.replaced_word),
            },
            SentenceItem::SentencePair(item) => CardFaces {
                front: item.front_sentence.clone(),
                back: item.back_sentence.clone(),
            },
        }
    }
}

/// A resized, JPEG encoded image ready for `storeMediaFile`.
#[derive(Debug, Clone)]
pub struct GeneratedImage {
    pub filename: String,
    pub data: String, // base64
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlashcardNote {
    pub deck_name: String,
    pub model_name: String,
    pub front: String,
    pub back: String,
    pub tags: Vec<String>,
    pub allow_duplicate: bool,
    pub image_filename: String,
    pub image_alt: String,
}

impl FlashcardNote {
    pub fn build(profile: &Profile, faces: CardFaces, image_filename: &str) -> Self {
        let image_alt = profile.image_alt.clone().unwrap_or_else(|| faces.front.clone());
        FlashcardNote {
            deck_name: profile.deck_name.clone(),
            model_name: profile.model_name.clone(),
            front: faces.front,
            back: faces.back,
            tags: profile.tags.clone(),
            allow_duplicate: profile.allow_duplicate,
            image_filename: image_filename.to_string(),
            image_alt,
        }
    }

    /// Front text followed by the image reference.
    pub fn front_field(&self) -> String {
        format!(
            "{}<br/><img src=\"{}\" alt=\"{}\">",
            self.front,
            escape_attribute(&self.image_filename),
            escape_attribute(&self.image_alt)
        )
    }
}

/// Everything that differs between one deck's batch and another's.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Profile {
    pub prompt_template: String,
    pub deck_name: String,
    pub model_name: String,
    pub tags: Vec<String>,
    pub allow_duplicate: bool,
    pub layout: CardLayout,
    /// `None` uses the front text as the alt attribute.
    pub image_alt: Option<String>,
    pub image_model: String,
    pub image_size: Option<String>,
    pub openai_base: String,
    pub anki_url: String,
    pub request_timeout_secs: Option<u64>,
}

impl Default for Profile {
    fn default() -> Self {
        super::presets::english()
    }
}
