use std::{
    path::PathBuf,
    time::Duration,
};

use cardsmith::{
    anki::{
        wait_awake,
        AnkiConnect,
    },
    core::{
        http::http_client,
        presets::{
            self,
            DEFAULT_ANKI_URL,
        },
    },
    imagegen::OpenAiImages,
    persistence::{
        builtin_profiles,
        get_data_file_path,
        load_profiles,
        load_sentences,
        resolve_profile,
        save_json,
        PROFILES_FILE,
    },
    run_batch,
    CardsmithError,
};
use clap::Parser;

const ANKI_WAIT: Duration = Duration::from_secs(2);
const ANKI_ATTEMPTS: u32 = 3;

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Generate an illustrated Anki note for every sentence in a file.
    Run {
        /// HJSON or JSON array of sentence items.
        sentences: PathBuf,
        /// Profile to use: a built-in preset or a name from the profile file.
        #[arg(long, default_value = "english")]
        preset: String,
        /// Profile file. By default, profiles.json in the data directory is used if present.
        #[arg(long)]
        profile_file: Option<PathBuf>,
        /// Override the profile's deck name.
        #[arg(long)]
        deck: Option<String>,
        /// Override the profile's note type.
        #[arg(long)]
        model: Option<String>,
        /// Start without checking that AnkiConnect answers.
        #[arg(long)]
        skip_anki_check: bool,
    },
    /// Check that AnkiConnect is reachable.
    Check {
        #[arg(long, default_value = DEFAULT_ANKI_URL)]
        anki_url: String,
    },
    /// List the built-in presets.
    Presets {
        /// Write the presets to profiles.json in the data directory for editing.
        #[arg(long)]
        export: bool,
    },
}

pub async fn entrypoint() -> Result<(), CardsmithError> {
    match Command::parse() {
        Command::Run { sentences, preset, profile_file, deck, model, skip_anki_check } => {
            let profiles = load_profiles(profile_file.as_deref())?;
            let mut profile = resolve_profile(&preset, &profiles)?;
            if let Some(deck) = deck {
                profile.deck_name = deck;
            }
            if let Some(model) = model {
                profile.model_name = model;
            }

            let items = load_sentences(&sentences, profile.layout)?;
            log::info!(
                "Loaded {} sentences for deck \"{}\" ({} layout)",
                items.len(),
                profile.deck_name,
                profile.layout
            );

            let generator = OpenAiImages::from_env(&profile)?;
            let timeout = profile.request_timeout_secs.map(Duration::from_secs);
            let anki = AnkiConnect::new(http_client(timeout)?, &profile.anki_url);

            if !skip_anki_check && !wait_awake(&anki, ANKI_WAIT, ANKI_ATTEMPTS).await? {
                return Err(CardsmithError::Custom(format!(
                    "AnkiConnect is not reachable at {}",
                    profile.anki_url
                )));
            }

            run_batch(&items, &generator, &anki, &profile).await;
            Ok(())
        }
        Command::Check { anki_url } => {
            let anki = AnkiConnect::new(http_client(None)?, &anki_url);
            let version = anki.get_version().await?;
            log::info!("AnkiConnect is online at {anki_url}. Version: {version}");
            Ok(())
        }
        Command::Presets { export } => {
            for name in presets::PRESET_NAMES {
                if let Some(profile) = presets::preset(name) {
                    println!("{name}\t{}\t{}", profile.deck_name, profile.layout);
                }
            }
            if export {
                save_json(&builtin_profiles(), &get_data_file_path(PROFILES_FILE))?;
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Command::command().debug_assert();
    }

    #[test]
    fn test_parse_run() {
        let cmd = Command::try_parse_from([
            "cardsmith",
            "run",
            "sentences.hjson",
            "--preset",
            "italian",
            "--deck",
            "Italiano",
        ])
        .unwrap();
        match cmd {
            Command::Run { sentences, preset, deck, model, skip_anki_check, .. } => {
                assert_eq!(sentences, PathBuf::from("sentences.hjson"));
                assert_eq!(preset, "italian");
                assert_eq!(deck.as_deref(), Some("Italiano"));
                assert!(model.is_none());
                assert!(!skip_anki_check);
            }
            _ => panic!("Expected run"),
        }
    }
}
