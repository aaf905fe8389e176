//! flattening many files, one at a time
//!
//! A file that fails to load, parse or flatten is logged and left out. It never stops the
//! remaining files from being processed.
use crate::documents::{ConfigSource, LoadError};
use crate::filter::{FilterSettings, NodeFilter};
use crate::flatten::{FlattenError, FlattenedDocument, Flattener};
use std::path::{Path, PathBuf};

#[derive(thiserror::Error, Debug)]
pub enum FileError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error("Unable to flatten document")]
    Flatten(#[from] FlattenError),
}

#[derive(Debug, Default)]
pub struct Batch {
    /// Flattened documents in input order
    pub documents: Vec<FlattenedDocument>,
    pub skipped: Vec<(PathBuf, FileError)>,
}

/// Loads, parses and flattens a single file
pub fn flatten_file(path: &Path, filter: &NodeFilter) -> Result<FlattenedDocument, FileError> {
    let source = ConfigSource::load(path)?;
    flatten_source(&source, filter)
}

pub fn flatten_source(
    source: &ConfigSource,
    filter: &NodeFilter,
) -> Result<FlattenedDocument, FileError> {
    let document = source.parse()?;
    let flattened = Flattener::new(filter).flatten_document(&document.root(), source.title())?;
    Ok(flattened)
}

pub fn run(files: &[PathBuf], settings: &FilterSettings) -> Batch {
    let filter = NodeFilter::new(settings.clone());
    let mut batch = Batch::default();

    for path in files {
        match flatten_file(path, &filter) {
            Ok(document) => {
                tracing::info!(
                    path=%path.display(),
                    title=%document.title,
                    tabs=document.tabs.len(),
                    "flattened file"
                );
                batch.documents.push(document);
            }
            Err(error) => {
                tracing::error!(path=%path.display(), %error, "skipping file");
                batch.skipped.push((path.clone(), error));
            }
        }
    }

    batch
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::tree::MAX_DEPTH;
    use pretty_assertions::assert_eq;

    fn nested(levels: usize) -> String {
        let mut xml = String::from(r#"<root><tab name="General">"#);
        for level in 0..levels {
            xml.push_str(&format!(r#"<container name="c{level}">"#));
        }
        xml.push_str(&"</container>".repeat(levels));
        xml.push_str("</tab></root>");
        xml
    }

    #[test]
    fn title_comes_from_source() {
        let source = ConfigSource::new(
            "templates/pn_account/data.cfg",
            r#"<root><tab name="General"><item pathid="a"><text/></item></tab></root>"#,
        );
        let document = flatten_source(&source, &NodeFilter::default()).unwrap();
        assert_eq!(document.title, "PN_ACCOUNT");
        assert_eq!(document.tabs["General"].len(), 1);
    }

    #[test]
    fn malformed_source() {
        let source = ConfigSource::new("broken.cfg", "<root>");
        let err = flatten_source(&source, &NodeFilter::default()).unwrap_err();
        assert!(matches!(
            err,
            FileError::Load(LoadError::MalformedInput { .. })
        ));
    }

    #[test]
    fn missing_file_is_skipped() {
        let batch = run(
            &[PathBuf::from("does/not/exist.cfg")],
            &FilterSettings::default(),
        );
        assert!(batch.documents.is_empty());
        assert_eq!(batch.skipped.len(), 1);
        assert!(matches!(
            batch.skipped[0].1,
            FileError::Load(LoadError::IoError(_))
        ));
    }

    #[test]
    fn too_deep_source() {
        let source = ConfigSource::new("pn_deep/data.cfg", nested(MAX_DEPTH + 10));
        let err = flatten_source(&source, &NodeFilter::default()).unwrap_err();
        assert!(matches!(
            err,
            FileError::Flatten(FlattenError::Structural { depth: MAX_DEPTH, .. })
        ));
    }

    #[test]
    fn nesting_up_to_limit_flattens() {
        let source = ConfigSource::new("pn_deep/data.cfg", nested(MAX_DEPTH - 1));
        let document = flatten_source(&source, &NodeFilter::default()).unwrap();
        assert_eq!(document.tabs["General"].len(), MAX_DEPTH - 1);
    }
}
