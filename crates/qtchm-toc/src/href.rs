//! Output-root-relative href handling.
//!
//! Every href the reconciliation stores is relative to the output root and
//! uses `/` separators, whether it came from a QHP `ref` (module relative)
//! or from an anchor inside a page (page relative). Since the output tree
//! mirrors the source tree, the same href also locates the source file.
use std::path::{Component, Path, PathBuf};

use crate::rules::TocRules;

/// Immutable run context handed to every reconciliation operation.
#[derive(Debug, Clone)]
pub struct Context {
  source_root: PathBuf,
  output_root: PathBuf,
  rules:       TocRules,
}

impl Context {
  #[must_use]
  pub fn new(
    source_root: impl Into<PathBuf>,
    output_root: impl Into<PathBuf>,
    rules: TocRules,
  ) -> Self {
    Self {
      source_root: source_root.into(),
      output_root: output_root.into(),
      rules,
    }
  }

  #[must_use]
  pub fn source_root(&self) -> &Path {
    &self.source_root
  }

  #[must_use]
  pub fn output_root(&self) -> &Path {
    &self.output_root
  }

  #[must_use]
  pub const fn rules(&self) -> &TocRules {
    &self.rules
  }

  /// Source file an href points at, fragment stripped.
  #[must_use]
  pub fn source_path(&self, href: &str) -> PathBuf {
    self.source_root.join(split_fragment(href).0)
  }

  /// Output file an href points at, fragment stripped.
  #[must_use]
  pub fn output_path(&self, href: &str) -> PathBuf {
    self.output_root.join(split_fragment(href).0)
  }

  /// Whether the file part of `href` exists under the source root.
  ///
  /// Hrefs climbing above the root never exist.
  #[must_use]
  pub fn exists(&self, href: &str) -> bool {
    let (path, _) = split_fragment(href);
    !path.is_empty()
      && !escapes_root(path)
      && self.source_root.join(path).is_file()
  }

  /// Express a path below the output root as an href.
  ///
  /// Returns `None` for paths outside the output root.
  #[must_use]
  pub fn output_href(&self, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(&self.output_root).ok()?;
    Some(path_to_href(rel))
  }
}

/// Split `href` into its path and its `#fragment` (the `#` kept).
#[must_use]
pub fn split_fragment(href: &str) -> (&str, &str) {
  href.find('#').map_or((href, ""), |idx| href.split_at(idx))
}

/// Whether `href` carries a fragment marker anywhere.
#[must_use]
pub fn has_fragment(href: &str) -> bool {
  href.contains('#')
}

/// Lexically fold `.` and `..` segments and empty segments out of a
/// `/`-separated path. Leading `..` segments that cannot be folded are kept.
#[must_use]
pub fn normalize(path: &str) -> String {
  let mut segments: Vec<&str> = Vec::new();
  for segment in path.split(['/', '\\']) {
    match segment {
      "" | "." => {},
      ".." => {
        if segments.last().is_some_and(|last| *last != "..") {
          segments.pop();
        } else {
          segments.push("..");
        }
      },
      other => segments.push(other),
    }
  }
  segments.join("/")
}

/// Whether a normalized path starts above the root it is relative to.
#[must_use]
pub fn escapes_root(path: &str) -> bool {
  path.split(['/', '\\']).next() == Some("..")
}

/// Resolve a QHP `ref` against its module: `module/reference`.
#[must_use]
pub fn module_href(module: &str, reference: &str) -> String {
  let (path, fragment) = split_fragment(reference);
  format!("{}{fragment}", normalize(&format!("{module}/{path}")))
}

/// Resolve an anchor found inside the page at `page_href`.
///
/// A bare fragment refers to the page itself; anything else is relative to
/// the page's directory.
#[must_use]
pub fn page_href(page_href: &str, anchor: &str) -> String {
  let (page_path, _) = split_fragment(page_href);
  if anchor.starts_with('#') {
    return format!("{page_path}{anchor}");
  }

  let (path, fragment) = split_fragment(anchor);
  let dir = page_path.rsplit_once('/').map_or("", |(dir, _)| dir);
  format!("{}{fragment}", normalize(&format!("{dir}/{path}")))
}

/// File name component of an href, fragment stripped.
#[must_use]
pub fn file_name(href: &str) -> &str {
  let (path, _) = split_fragment(href);
  path.rsplit_once('/').map_or(path, |(_, name)| name)
}

/// Convert a relative filesystem path into a `/`-separated href.
#[must_use]
pub fn path_to_href(path: &Path) -> String {
  let parts: Vec<_> = path
    .components()
    .filter_map(|c| {
      match c {
        Component::Normal(part) => Some(part.to_string_lossy()),
        _ => None,
      }
    })
    .collect();
  parts.join("/")
}
