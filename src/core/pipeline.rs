use std::time::Instant;

use crate::{
    anki::NoteStore,
    core::{
        utils::image_filename,
        CardsmithError,
        FlashcardNote,
        GeneratedImage,
        Profile,
        SentenceItem,
    },
    imagegen::ImageGenerator,
};

/// The batch stops once this many items in a row have failed and one more fails.
pub const MAX_CONSECUTIVE_FAILURES: u32 = 3;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub succeeded: usize,
    pub failed: usize,
    pub halted: bool,
    pub unprocessed: usize,
}

/// Generates, uploads and files one card.
///
/// A note rejected by the store (its `error` field set) is only logged and
/// still counts as a success for the batch's failure counter.
pub async fn process_item<G: ImageGenerator, S: NoteStore>(
    item: &SentenceItem,
    generator: &G,
    store: &S,
    profile: &Profile,
) -> Result<(), CardsmithError> {
    let data = generator.generate(item.prompt_text()).await?;
    let image = GeneratedImage { filename: image_filename(item.filename_source()), data };

    let note = FlashcardNote::build(profile, item.card_faces(), &image.filename);

    store.store_media(&image.filename, &image.data).await?;

    let response = store.add_note(&note).await?;
    if let Some(error) = response.error {
        log::warn!("Anki rejected the note for {}: {}", item.label(), error);
    }

    Ok(())
}

/// Works through `items` in order, one at a time.
pub async fn run_batch<G: ImageGenerator, S: NoteStore>(
    items: &[SentenceItem],
    generator: &G,
    store: &S,
    profile: &Profile,
) -> BatchReport {
    let start = Instant::now();
    let mut report = BatchReport::default();
    let mut consecutive_failures: u32 = 0;

    for (index, item) in items.iter().enumerate() {
        match process_item(item, generator, store, profile).await {
            Ok(()) => {
                consecutive_failures = 0;
                report.succeeded += 1;
                log::info!("Generated image for: {}", item.label());
            }
            Err(e) => {
                consecutive_failures += 1;
                report.failed += 1;
                log::error!("Failed to generate image for {}: {}", item.label(), e);

                if consecutive_failures > MAX_CONSECUTIVE_FAILURES {
                    log::error!(
                        "More than {} consecutive errors. Stopping the process.",
                        MAX_CONSECUTIVE_FAILURES
                    );
                    report.halted = true;
                    report.unprocessed = items.len() - index - 1;
                    break;
                }
            }
        }
    }

    log::info!(
        "Batch finished in {:.1}s: {} succeeded, {} failed, {} unprocessed",
        start.elapsed().as_secs_f32(),
        report.succeeded,
        report.failed,
        report.unprocessed
    );
    report
}

#[cfg(test)]
mod tests {
    use std::{
        cell::RefCell,
        collections::HashSet,
    };

    use serde_json::Value;

    use super::*;
    use crate::anki::ApiResponse;

    #[derive(Default)]
    struct FakeGenerator {
        failing: HashSet<String>,
        calls: RefCell<Vec<String>>,
    }

    impl FakeGenerator {
        fn failing_on(labels: &[&str]) -> Self {
            Self { failing: labels.iter().map(|s| s.to_string()).collect(), ..Default::default() }
        }
    }

    impl ImageGenerator for FakeGenerator {
        async fn generate(&self, text: &str) -> Result<String, CardsmithError> {
            self.calls.borrow_mut().push(text.to_string());
            if self.failing.contains(text) {
                return Err(CardsmithError::Generation(format!(
                    "Image URL not found in the response for: {text}"
                )));
            }
            Ok("aW1hZ2U=".to_string())
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    enum StoreCall {
        Media { filename: String, data: String },
        Note { front: String, back: String, deck: String },
    }

    #[derive(Default)]
    struct FakeStore {
        calls: RefCell<Vec<StoreCall>>,
        note_error: Option<String>,
    }

    impl NoteStore for FakeStore {
        async fn store_media(
            &self,
            filename: &str,
            data: &str,
        ) -> Result<ApiResponse<Value>, CardsmithError> {
            self.calls.borrow_mut().push(StoreCall::Media {
                filename: filename.to_string(),
                data: data.to_string(),
            });
            Ok(ApiResponse { result: Some(Value::String(filename.to_string())), error: None })
        }

        async fn add_note(&self, note: &FlashcardNote) -> Result<ApiResponse<u64>, CardsmithError> {
            self.calls.borrow_mut().push(StoreCall::Note {
                front: note.front_field(),
                back: note.back.clone(),
                deck: note.deck_name.clone(),
            });
            Ok(ApiResponse { result: Some(1), error: self.note_error.clone() })
        }
    }

    fn items(labels: &[&str]) -> Vec<SentenceItem> {
        labels.iter().map(|l| SentenceItem::word(l, "word", "term")).collect()
    }

    #[tokio::test]
    async fn test_gym_end_to_end() {
        let generator = FakeGenerator::default();
        let store = FakeStore::default();
        let items = vec![SentenceItem::word("I go to the gym", "gym", "fitness center")];

        let report = run_batch(&items, &generator, &store, &Profile::default()).await;
        assert_eq!(report, BatchReport { succeeded: 1, ..Default::default() });

        let calls = store.calls.borrow();
        assert_eq!(calls.len(), 2);
        assert_eq!(
            calls[0],
            StoreCall::Media { filename: "I_go_to_the_gym.jpg".to_string(), data: "aW1hZ2U=".to_string() }
        );
        match &calls[1] {
            StoreCall::Note { front, back, deck } => {
                assert!(front.starts_with("I go to the <b>gym</b><br/>"));
                assert!(front.contains("<img src=\"I_go_to_the_gym.jpg\""));
                assert_eq!(back, "I go to the <b>fitness center</b>");
                assert_eq!(deck, "Angielski - Złożone słownictwo");
            }
            other => panic!("Expected a note, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_generation_error_skips_note_store() {
        let generator = FakeGenerator::failing_on(&["bad"]);
        let store = FakeStore::default();
        let item = SentenceItem::word("bad", "bad", "worse");

        let err = process_item(&item, &generator, &store, &Profile::default()).await.unwrap_err();
        assert!(matches!(err, CardsmithError::Generation(_)));
        assert!(store.calls.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_halts_after_fourth_consecutive_failure() {
        let generator = FakeGenerator::failing_on(&["two", "three", "four", "five"]);
        let store = FakeStore::default();
        let items = items(&["one", "two", "three", "four", "five", "six"]);

        let report = run_batch(&items, &generator, &store, &Profile::default()).await;

        assert_eq!(*generator.calls.borrow(), vec!["one", "two", "three", "four", "five"]);
        assert_eq!(report, BatchReport { succeeded: 1, failed: 4, halted: true, unprocessed: 1 });
        // Only the first item reached the store
        assert_eq!(store.calls.borrow().len(), 2);
    }

    #[tokio::test]
    async fn test_three_failures_do_not_halt() {
        let generator = FakeGenerator::failing_on(&["two", "three", "four"]);
        let store = FakeStore::default();
        let items = items(&["one", "two", "three", "four", "five", "six"]);

        let report = run_batch(&items, &generator, &store, &Profile::default()).await;
        assert_eq!(report, BatchReport { succeeded: 3, failed: 3, halted: false, unprocessed: 0 });
        assert_eq!(generator.calls.borrow().len(), 6);
    }

    #[tokio::test]
    async fn test_success_resets_counter() {
        let generator = FakeGenerator::failing_on(&["a", "b", "c", "e", "f", "g"]);
        let store = FakeStore::default();
        let items = items(&["a", "b", "c", "d", "e", "f", "g", "h"]);

        let report = run_batch(&items, &generator, &store, &Profile::default()).await;
        assert!(!report.halted);
        assert_eq!(report.succeeded, 2);
        assert_eq!(report.failed, 6);
    }

    #[tokio::test]
    async fn test_rejected_note_still_counts_as_success() {
        let generator = FakeGenerator::default();
        let store = FakeStore { note_error: Some("duplicate".to_string()), ..Default::default() };
        let items = items(&["one"]);

        let report = run_batch(&items, &generator, &store, &Profile::default()).await;
        assert_eq!(report.succeeded, 1);
    }

    #[tokio::test]
    async fn test_sentence_pair_uses_back_sentence_for_filename() {
        let generator = FakeGenerator::default();
        let store = FakeStore::default();
        let profile = crate::core::presets::italian();
        let items = vec![SentenceItem::pair("I wash my hands", "Mi lavo le mani.")];

        run_batch(&items, &generator, &store, &profile).await;

        assert_eq!(*generator.calls.borrow(), vec!["I wash my hands"]);
        let calls = store.calls.borrow();
        assert!(matches!(&calls[0], StoreCall::Media { filename, .. } if filename == "Mi_lavo_le_mani.jpg"));
        match &calls[1] {
            StoreCall::Note { front, back, deck } => {
                assert_eq!(
                    front,
                    "I wash my hands<br/><img src=\"Mi_lavo_le_mani.jpg\" alt=\"I wash my hands\">"
                );
                assert_eq!(back, "Mi lavo le mani.");
                assert_eq!(deck, "Włoski - Czasowniki zwrotne");
            }
            other => panic!("Expected a note, got {:?}", other),
        }
    }
}
