//! discovery and loading of configuration documents
//!
//! A [ConfigSource] keeps the raw contents of one file together with the path it was read
//! from. Parsing borrows from the source, so a [roxmltree::Document] never outlives it.
use std::path::{Path, PathBuf};

/// File extension of data-capture configuration documents
pub const DEFAULT_EXTENSION: &str = "cfg";

/// Recursively finds all files below `root` with the given extension
///
/// Results are sorted by path so runs over the same tree are reproducible.
pub fn discover(root: &Path, extension: &str) -> Result<Vec<PathBuf>, LoadError> {
    tracing::info!(root=%root.display(), extension, "discovering configuration files");

    let mut files = vec![];
    for entry in walkdir::WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let matches = entry
            .path()
            .extension()
            .is_some_and(|found| found == extension);
        if !matches {
            continue;
        }

        tracing::debug!(path=%entry.path().display(), "found configuration file");
        files.push(entry.into_path());
    }

    if files.is_empty() {
        return Err(LoadError::NoFilesFound(root.to_owned()));
    }

    Ok(files)
}

#[derive(Debug, Clone, derive_new::new)]
pub struct ConfigSource {
    #[new(into)]
    pub path: PathBuf,
    #[new(into)]
    pub contents: String,
}

impl ConfigSource {
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        tracing::info!(path=%path.display(), "loading file");
        let contents = std::fs::read_to_string(path)?;
        Ok(Self::new(path, contents))
    }

    pub fn parse(&self) -> Result<roxmltree::Document<'_>, LoadError> {
        roxmltree::Document::parse(&self.contents).map_err(|source| LoadError::MalformedInput {
            path: self.path.clone(),
            source,
        })
    }

    /// Report title: the name of the directory containing the file, upper-cased
    pub fn title(&self) -> String {
        self.path
            .parent()
            .and_then(Path::file_name)
            .or_else(|| self.path.file_stem())
            .map(|name| name.to_string_lossy().to_uppercase())
            .unwrap_or_default()
    }
}

#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    #[error("No configuration files found below {}", .0.display())]
    NoFilesFound(PathBuf),
    #[error("IO error")]
    IoError(#[from] std::io::Error),
    #[error("Unable to walk directory")]
    Walk(#[from] walkdir::Error),
    #[error("Unable to parse {}", path.display())]
    MalformedInput {
        path: PathBuf,
        #[source]
        source: roxmltree::Error,
    },
}

/// Utility macro to parse a [roxmltree::Document] from a string
///
/// ```
/// # use sandgen::config_document;
/// let document = config_document!(r#"<tab name="General"/>"#);
/// assert_eq!(document.root_element().attribute("name"), Some("General"));
/// ```
///
/// # Panic
/// Panics on invalid input
///
/// ```should_panic
/// # use sandgen::config_document;
/// config_document!("<tab>");
/// ```
#[macro_export]
macro_rules! config_document {
    { $expr:expr } => {
        roxmltree::Document::parse($expr).expect("document must parse")
    };
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn title_from_parent_directory() {
        let source = ConfigSource::new("templates/pn_customer/data.cfg", "");
        assert_eq!(source.title(), "PN_CUSTOMER");
    }

    #[test]
    fn title_falls_back_to_file_stem() {
        let source = ConfigSource::new("/", "");
        assert_eq!(source.title(), "");

        let source = ConfigSource::new("data.cfg", "");
        assert_eq!(source.title(), "DATA");
    }

    #[test]
    fn malformed_input_keeps_path() {
        let source = ConfigSource::new("broken/data.cfg", "<tab name=\"General\">");
        let err = source.parse().expect_err("must not parse");
        assert!(matches!(err, LoadError::MalformedInput { ref path, .. } if path.ends_with("broken/data.cfg")));
        assert_eq!(err.to_string(), "Unable to parse broken/data.cfg");
    }
}
