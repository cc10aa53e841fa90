//! HTML Help Workshop output.
//!
//! [`HelpProject`] collects the reconciled contents tree, keyword index and
//! file list, then writes the `.hhp`, `.hhc` and `.hhk` files that the HTML
//! Help compiler turns into a CHM.
pub mod project;
pub mod sitemap;

use std::{
  fs,
  path::{Path, PathBuf},
};

use color_eyre::eyre::{self, WrapErr};
use log::info;
use qtchm_toc::ProjectSink;

pub use project::{Project, Window};
pub use sitemap::{Index, Toc, TocHandle};

/// A documentation help project named `name`, written into `output_dir`.
#[derive(Debug, Clone)]
pub struct HelpProject {
  name:       String,
  output_dir: PathBuf,
  project:    Project,
  toc:        Toc,
  index:      Index,
}

impl HelpProject {
  /// Create a project with the documentation window defaults: menu shown in
  /// the navigation pane, and toolbar buttons enabled so that the font size
  /// menu works.
  #[must_use]
  pub fn new(
    output_dir: impl Into<PathBuf>,
    name: &str,
    default_topic: &str,
    title: &str,
  ) -> Self {
    let mut project = Project::new(name);
    project.set("default_topic", default_topic);
    project.set("contents_file", format!("{name}.hhc"));
    project.set("index_file", format!("{name}.hhk"));

    let window = project.window_mut();
    window.set("title", title);
    window.set("navigation_pane_styles", "0x12120");
    window.set("buttons", "0x10184e");

    Self {
      name: name.to_string(),
      output_dir: output_dir.into(),
      project,
      toc: Toc::default(),
      index: Index::default(),
    }
  }

  #[must_use]
  pub fn name(&self) -> &str {
    &self.name
  }

  #[must_use]
  pub const fn project(&self) -> &Project {
    &self.project
  }

  #[must_use]
  pub const fn toc(&self) -> &Toc {
    &self.toc
  }

  #[must_use]
  pub const fn index(&self) -> &Index {
    &self.index
  }

  /// Paths of the project, contents and index files.
  #[must_use]
  pub fn output_files(&self) -> [PathBuf; 3] {
    ["hhp", "hhc", "hhk"]
      .map(|ext| self.output_dir.join(format!("{}.{ext}", self.name)))
  }
}

fn write_file(path: &Path, content: &str) -> eyre::Result<()> {
  info!("Writing {}", path.display());
  fs::write(path, content)
    .wrap_err_with(|| format!("Failed to write {}", path.display()))
}

impl ProjectSink for HelpProject {
  type Error = eyre::Report;
  type Handle = TocHandle;

  fn toc_root(&self) -> Self::Handle {
    TocHandle::ROOT
  }

  fn add_toc_entry(
    &mut self,
    parent: Self::Handle,
    title: &str,
    href: &str,
  ) -> Self::Handle {
    self.toc.append(parent, title, href)
  }

  fn add_file(&mut self, href: &str) {
    self.project.append(href);
  }

  fn add_index_entry(&mut self, name: &str, href: &str, title: &str) {
    self.index.append(name, href, title);
  }

  fn finalize(&mut self) -> eyre::Result<()> {
    fs::create_dir_all(&self.output_dir).wrap_err_with(|| {
      format!("Failed to create {}", self.output_dir.display())
    })?;

    let [hhp, hhc, hhk] = self.output_files();
    write_file(&hhp, &self.project.serialize())?;
    write_file(&hhc, &self.toc.serialize())?;
    write_file(&hhk, &self.index.serialize())?;
    Ok(())
  }
}
