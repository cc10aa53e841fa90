//! `qtchm-toc`.
//!
//! Reconciles the two descriptions Qt documentation gives of its own
//! structure: the section tree declared in each module's QHP project file,
//! and the leveled navigation list embedded in each rendered page. The
//! result is one navigation tree and one keyword index per module, ready to
//! be appended to a [`ProjectSink`].
//!
//! # Example
//!
//! ```no_run
//! use qtchm_toc::{Context, TocRules, reconcile_module};
//!
//! let ctx = Context::new("qt-docs", "out", TocRules::default());
//! let module = reconcile_module(&ctx, "qt-docs/qtcore".as_ref()).unwrap();
//! for node in &module.toc {
//!   println!("{} -> {}", node.title, node.href);
//! }
//! ```

pub mod error;
pub mod href;
pub mod html;
mod keywords;
pub mod qhp;
pub mod rules;
mod sink;
mod types;
mod walker;

use std::path::Path;

pub use error::TocError;
pub use href::Context;
pub use keywords::build_index;
pub use rules::{OverrideAction, SectionOverride, TocRules};
pub use sink::ProjectSink;
pub use types::{
  IndexEntry,
  Keyword,
  LeveledEntry,
  ModuleOutput,
  QhpDocument,
  Section,
  TocNode,
};
pub use walker::walk_sections;

/// Reconcile one module directory.
///
/// A module without a QHP file contributes nothing.
///
/// # Errors
///
/// Returns an error if the QHP file cannot be read or parsed, or if it
/// contains a section without a reference that no override covers.
pub fn reconcile_module(
  ctx: &Context,
  module_dir: &Path,
) -> Result<ModuleOutput, TocError> {
  let name = module_dir
    .file_name()
    .map(|name| name.to_string_lossy().into_owned())
    .unwrap_or_default();

  match qhp::find_qhp(module_dir)? {
    Some(path) => {
      log::debug!("Reading {}", path.display());
      let document = qhp::read_qhp(&path)?;
      reconcile_document(ctx, &name, &document)
    },
    None => {
      Ok(ModuleOutput {
        name,
        ..ModuleOutput::default()
      })
    },
  }
}

/// Reconcile an already parsed QHP document of `module`.
///
/// # Errors
///
/// See [`walk_sections`].
pub fn reconcile_document(
  ctx: &Context,
  module: &str,
  document: &QhpDocument,
) -> Result<ModuleOutput, TocError> {
  Ok(ModuleOutput {
    name:  module.to_string(),
    toc:   walk_sections(ctx, module, &document.sections)?,
    index: build_index(ctx, module, &document.keywords),
  })
}
