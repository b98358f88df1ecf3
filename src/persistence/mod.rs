use std::{
    collections::BTreeMap,
    fs,
    path::{
        Path,
        PathBuf,
    },
};

use serde::{
    Deserialize,
    Serialize,
};

use crate::core::{
    models::{
        SentencePairItem,
        WordEmphasisItem,
    },
    presets,
    CardLayout,
    CardsmithError,
    Profile,
    SentenceItem,
};

const APP_NAME: &str = "cardsmith";
pub const PROFILES_FILE: &str = "profiles.json";

pub type ProfileMap = BTreeMap<String, Profile>;

pub fn get_app_data_dir() -> PathBuf {
    if let Some(data_dir) = dirs::data_local_dir() {
        let app_dir = data_dir.join(APP_NAME);
        let _ = fs::create_dir_all(&app_dir);
        app_dir
    } else {
        PathBuf::from(".")
    }
}

pub fn get_data_file_path(filename: &str) -> PathBuf {
    get_app_data_dir().join(filename)
}

pub fn save_json<T: Serialize>(data: &T, path: &Path) -> Result<(), CardsmithError> {
    let json = serde_json::to_string_pretty(data)?;
    fs::write(path, json)?;
    log::info!("Data saved to: {}", path.display());
    Ok(())
}

pub fn load_json<T: for<'de> Deserialize<'de> + Default>(path: &Path) -> Result<T, CardsmithError> {
    if !path.exists() {
        return Ok(T::default());
    }

    let json = fs::read_to_string(path)?;
    let data: T = serde_json::from_str(&json)?;
    log::debug!("Data loaded from: {}", path.display());
    Ok(data)
}

pub fn load_json_or_default<T: for<'de> Deserialize<'de> + Default>(path: &Path) -> T {
    match load_json::<T>(path) {
        Ok(data) => data,
        Err(e) => {
            log::warn!("Failed to load {}: {}. Using defaults.", path.display(), e);
            T::default()
        }
    }
}

pub fn builtin_profiles() -> ProfileMap {
    presets::PRESET_NAMES
        .iter()
        .filter_map(|name| presets::preset(name).map(|profile| (name.to_string(), profile)))
        .collect()
}

/// An explicit profile file must load; the one in the data directory is optional.
pub fn load_profiles(explicit: Option<&Path>) -> Result<ProfileMap, CardsmithError> {
    match explicit {
        Some(path) => {
            if !path.exists() {
                return Err(CardsmithError::Custom(format!(
                    "Profile file not found: {}",
                    path.display()
                )));
            }
            load_json(path)
        }
        None => Ok(load_json_or_default(&get_data_file_path(PROFILES_FILE))),
    }
}

/// Profiles from file win over the built-in presets of the same name.
pub fn resolve_profile(name: &str, from_file: &ProfileMap) -> Result<Profile, CardsmithError> {
    from_file
        .get(name)
        .cloned()
        .or_else(|| presets::preset(name))
        .ok_or_else(|| CardsmithError::UnknownPreset(name.to_string()))
}

/// Reads an HJSON (or plain JSON) array of sentence items shaped for `layout`.
pub fn load_sentences(path: &Path, layout: CardLayout) -> Result<Vec<SentenceItem>, CardsmithError> {
    let text = fs::read_to_string(path)?;
    parse_sentences(&text, layout)
}

pub fn parse_sentences(text: &str, layout: CardLayout) -> Result<Vec<SentenceItem>, CardsmithError> {
    let raw: Vec<serde_json::Value> = serde_hjson::from_str(text)?;

    raw.into_iter()
        .enumerate()
        .map(|(index, value)| {
            let parsed = match layout {
                CardLayout::WordEmphasis => {
                    serde_json::from_value::<WordEmphasisItem>(value).map(SentenceItem::WordEmphasis)
                }
                CardLayout::SentencePair => {
                    serde_json::from_value::<SentencePairItem>(value).map(SentenceItem::SentencePair)
                }
            };
            parsed.map_err(|e| CardsmithError::LayoutMismatch {
                expected: layout,
                reason: format!("item {}: {}", index + 1, e),
            })
        })
        .collect()
}
