//! Corpus configuration.

use std::fs;
use std::path::Path;

use brat_standoff::ReadOptions;
use serde::{Deserialize, Serialize};

use crate::errors::{CorpusError, CorpusResult};

/// How annotation files are found, read and written.
///
/// ```toml
/// annotation_extension = "ann"
/// text_extension = "txt"
/// strict_references = true
/// recursive = false
/// write_text = false
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorpusConfig {
    /// Extension of annotation files, without the dot.
    pub annotation_extension: String,
    /// Extension of the companion text files, without the dot.
    pub text_extension: String,
    /// Validate every reference after reading a file.
    pub strict_references: bool,
    /// Descend into subdirectories when loading a corpus.
    pub recursive: bool,
    /// Also write the document text next to the annotation file.
    pub write_text: bool,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            annotation_extension: "ann".into(),
            text_extension: "txt".into(),
            strict_references: false,
            recursive: true,
            write_text: false,
        }
    }
}

impl CorpusConfig {
    /// Load from a TOML file. A missing file gives the defaults.
    pub fn load(path: &Path) -> CorpusResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(CorpusError::io(path))?;

        toml::from_str(&content).map_err(|e| CorpusError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    pub fn read_options(&self) -> ReadOptions {
        ReadOptions {
            strict_references: self.strict_references,
        }
    }

    pub(crate) fn is_annotation_file(&self, path: &Path) -> bool {
        path.extension()
            .map_or(false, |e| *e == *self.annotation_extension)
    }
}
