use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort TOC reconciliation.
///
/// Missing pages and keyword targets are not errors; they are deprecated
/// content and get dropped silently.
#[derive(Debug, Error)]
pub enum TocError {
  /// A titled `<section>` has no `ref` attribute and no override covers it.
  #[error("empty reference in module `{module}` for section `{title}`")]
  MissingReference { module: String, title: String },

  /// A file could not be read from disk.
  #[error("failed to read `{path}`: {source}")]
  ReadFile {
    path:   PathBuf,
    #[source]
    source: std::io::Error,
  },

  /// A module directory could not be listed.
  #[error("failed to list module directory `{path}`: {source}")]
  ReadDir {
    path:   PathBuf,
    #[source]
    source: std::io::Error,
  },

  /// The QHP project file is not well-formed XML.
  #[error("failed to parse `{path}` at byte {position}: {source}")]
  ParseQhp {
    path:     PathBuf,
    position: u64,
    #[source]
    source:   quick_xml::Error,
  },
}
