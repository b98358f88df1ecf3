pub mod anki;
pub mod core;
pub mod imagegen;
pub mod persistence;

pub use crate::core::{
    pipeline::{
        run_batch,
        BatchReport,
    },
    CardsmithError,
    Profile,
    SentenceItem,
};
