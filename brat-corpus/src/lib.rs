//! File and directory handling for brat standoff corpora.
//!
//! The model and codec in `brat-standoff` work on strings only; this crate
//! reads `.ann`/`.txt` pairs from disk, writes them back, and merges files
//! through `brat-merge`.
//!
//! ## Modules
//!
//! - [`config`] - TOML-backed [`CorpusConfig`]
//! - [`loader`] - Reading, writing and merging annotation files
//! - [`errors`] - Error types for corpus operations

pub mod config;
pub mod errors;
pub mod loader;

pub use config::CorpusConfig;
pub use errors::{CorpusError, CorpusResult};
pub use loader::{
    load_corpus, merge_files, read_annotations, read_document, write_annotations, write_document,
};
