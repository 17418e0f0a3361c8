//! Annotation file loading and writing.
//!
//! An annotated document is a pair of files sharing a stem: `doc.ann` holds
//! the annotations, `doc.txt` the text they point into.

use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use brat_standoff::{codec, Document, ReadOptions};

use crate::config::CorpusConfig;
use crate::errors::{CorpusError, CorpusResult};

/// Parse annotations from any reader.
pub fn read_annotations<R: Read>(
    mut reader: R,
    doc_id: impl Into<String>,
    options: &ReadOptions,
) -> CorpusResult<Document> {
    let mut content = String::new();
    reader.read_to_string(&mut content)?;
    let doc = codec::parse_document(&content, options)?;
    Ok(doc.with_doc_id(doc_id))
}

/// Read one annotation file plus its companion text file, if there is one.
///
/// The document id is the file stem.
pub fn read_document(ann_path: &Path, config: &CorpusConfig) -> CorpusResult<Document> {
    let content = fs::read_to_string(ann_path).map_err(CorpusError::io(ann_path))?;
    let mut doc = codec::parse_document(&content, &config.read_options()).map_err(|source| {
        CorpusError::Annotations {
            path: ann_path.to_path_buf(),
            source,
        }
    })?;

    if let Some(stem) = ann_path.file_stem() {
        doc.set_doc_id(Some(stem.to_string_lossy().into_owned()));
    }

    let text_path = ann_path.with_extension(&config.text_extension);
    if text_path.is_file() {
        let text = fs::read_to_string(&text_path).map_err(CorpusError::io(&text_path))?;
        doc.set_text(Some(text));
    } else {
        tracing::warn!(path = %text_path.display(), "no text file for annotations");
    }

    tracing::debug!(
        path = %ann_path.display(),
        annotations = doc.len(),
        "read annotation file"
    );
    Ok(doc)
}

/// Serialize the document's annotations into any writer.
pub fn write_annotations<W: Write>(mut writer: W, doc: &Document) -> CorpusResult<()> {
    writer.write_all(codec::write_document(doc).as_bytes())?;
    writer.flush()?;
    Ok(())
}

/// Write the annotations to `ann_path`, and the text next to it when
/// [`CorpusConfig::write_text`] is set and the document has text.
pub fn write_document(ann_path: &Path, doc: &Document, config: &CorpusConfig) -> CorpusResult<()> {
    fs::write(ann_path, codec::write_document(doc)).map_err(CorpusError::io(ann_path))?;

    if config.write_text {
        if let Some(text) = doc.text() {
            let text_path = ann_path.with_extension(&config.text_extension);
            fs::write(&text_path, text).map_err(CorpusError::io(&text_path))?;
        }
    }

    tracing::debug!(
        path = %ann_path.display(),
        annotations = doc.len(),
        "wrote annotation file"
    );
    Ok(())
}

/// Load every annotation file under `dir`, keyed by path relative to `dir`
/// and sorted by it.
pub fn load_corpus(dir: &Path, config: &CorpusConfig) -> CorpusResult<Vec<(String, Document)>> {
    let mut paths = Vec::new();
    collect_annotation_files(dir, config, &mut paths)?;
    paths.sort();

    let mut corpus = Vec::with_capacity(paths.len());
    for path in paths {
        let relative = path.strip_prefix(dir).unwrap_or(&path);
        let doc = read_document(&path, config)?;
        corpus.push((relative.display().to_string(), doc));
    }

    tracing::debug!(dir = %dir.display(), documents = corpus.len(), "loaded corpus");
    Ok(corpus)
}

fn collect_annotation_files(
    dir: &Path,
    config: &CorpusConfig,
    paths: &mut Vec<PathBuf>,
) -> CorpusResult<()> {
    if !dir.is_dir() {
        return Ok(());
    }

    for entry in fs::read_dir(dir).map_err(CorpusError::io(dir))? {
        let path = entry.map_err(CorpusError::io(dir))?.path();

        if path.is_dir() {
            if config.recursive {
                collect_annotation_files(&path, config, paths)?;
            }
        } else if config.is_annotation_file(&path) {
            paths.push(path);
        }
    }

    Ok(())
}

/// Read each annotation file and merge them, in order, into one document.
pub fn merge_files<P: AsRef<Path>>(paths: &[P], config: &CorpusConfig) -> CorpusResult<Document> {
    let docs = paths
        .iter()
        .map(|path| read_document(path.as_ref(), config))
        .collect::<CorpusResult<Vec<_>>>()?;
    Ok(brat_merge::merge(&docs)?)
}
