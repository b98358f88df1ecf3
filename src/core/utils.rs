use std::borrow::Cow;

use regex::{
    NoExpand,
    Regex,
};

pub const IMAGE_EXTENSION: &str = ".jpg";
pub const MAX_FILENAME_STEM: usize = 60;

/// Accented letters folded to ASCII. Anything not listed passes through as is.
const ACCENT_MAP: &[(char, char)] =
    &[('à', 'a'), ('è', 'e'), ('é', 'e'), ('ì', 'i'), ('ò', 'o'), ('ù', 'u')];

const STRIPPED_CHARS: &[char] = &['.', ',', '?', '\'', '"', '/'];

/// Turns an arbitrary sentence into something usable as an Anki media filename.
pub fn sanitize_filename(text: &str) -> String {
    text.chars()
        .filter(|c| !STRIPPED_CHARS.contains(c))
        .map(|c| match ACCENT_MAP.iter().find(|(accented, _)| *accented == c) {
            Some((_, plain)) => *plain,
            None if c == ' ' => '_',
            None => c,
        })
        .collect()
}

/// Sanitized stem cut to `MAX_FILENAME_STEM` characters, plus the image extension.
pub fn image_filename(text: &str) -> String {
    let stem: String = sanitize_filename(text).chars().take(MAX_FILENAME_STEM).collect();
    format!("{stem}{IMAGE_EXTENSION}")
}

fn word_pattern(word: &str) -> Option<Regex> {
    if word.trim().is_empty() {
        return None;
    }
    Regex::new(&format!(r"(?i)\b{}\b", regex::escape(word))).ok()
}

/// Wraps every whole-word, case-insensitive occurrence of `word` in `<b>`,
/// keeping the text as it appears in the sentence.
///
/// A sentence that does not contain `word` comes back unchanged. The matched
/// casing is kept ("Gym" stays "Gym"), unlike the old script which always
/// inserted `word` itself.
pub fn bold_word(sentence: &str, word: &str) -> String {
    match word_pattern(word) {
        Some(re) => re
            .replace_all(sentence, |captures: &regex::Captures| format!("<b>{}</b>", &captures[0]))
            .into_owned(),
        None => sentence.to_string(),
    }
}

/// Same matching as [`bold_word`], but each occurrence is swapped for `<b>{replacement}</b>`.
pub fn bold_replacement(sentence: &str, word: &str, replacement: &str) -> String {
    match word_pattern(word) {
        Some(re) => {
            let bolded = format!("<b>{replacement}</b>");
            re.replace_all(sentence, NoExpand(&bolded)).into_owned()
        }
        None => sentence.to_string(),
    }
}

pub fn escape_attribute(value: &str) -> Cow<'_, str> {
    if !value.contains(['&', '"', '<', '>']) {
        return Cow::Borrowed(value);
    }

    let mut escaped = String::with_capacity(value.len() + 8);
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}
