pub mod pages;
pub mod resources;

use std::{
  fs,
  path::{Path, PathBuf},
  sync::LazyLock,
};

use color_eyre::eyre::{Context, Result, bail};
use log::error;
use regex::Regex;

use crate::config::Config;

static INDEX_VERSION: LazyLock<Option<Regex>> = LazyLock::new(|| {
  Regex::new(r#"<INDEX.*version="(.*?)""#)
    .inspect_err(|e| error!("Failed to compile INDEX_VERSION regex: {e}"))
    .ok()
});

/// Read the Qt version from the landing module's `.index` file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or carries no version.
pub fn qt_version(config: &Config) -> Result<String> {
  let landing = &config.landing_module;
  let path = config
    .source_dir
    .join(landing)
    .join(format!("{landing}.index"));
  let content = fs::read_to_string(&path)
    .wrap_err_with(|| format!("Failed to read {}", path.display()))?;

  match parse_version(&content) {
    Some(version) => Ok(version),
    None => bail!("Failed to parse Qt docs version from {}", path.display()),
  }
}

fn parse_version(index: &str) -> Option<String> {
  let captures = INDEX_VERSION.as_ref()?.captures(index)?;
  Some(captures.get(1)?.as_str().to_string())
}

/// Module directories in processing order: the landing module first, then
/// every other source directory in sorted order.
///
/// # Errors
///
/// Returns an error if the source directory cannot be listed.
pub fn module_dirs(config: &Config) -> Result<Vec<PathBuf>> {
  let mut modules = Vec::new();
  let landing = config.source_dir.join(&config.landing_module);
  if landing.is_dir() {
    modules.push(landing);
  }

  let mut rest = sorted_entries(&config.source_dir)?
    .into_iter()
    .filter(|path| path.is_dir())
    .filter(|path| {
      path
        .file_name()
        .is_some_and(|name| !config.is_excluded(&name.to_string_lossy()))
    })
    .collect();
  modules.append(&mut rest);
  Ok(modules)
}

/// Entries of `dir`, sorted by file name.
///
/// # Errors
///
/// Returns an error if the directory cannot be read.
pub fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>> {
  let mut entries = fs::read_dir(dir)
    .wrap_err_with(|| format!("Failed to read directory {}", dir.display()))?
    .map(|entry| entry.map(|entry| entry.path()))
    .collect::<Result<Vec<_>, _>>()
    .wrap_err_with(|| format!("Failed to read directory {}", dir.display()))?;
  entries.sort();
  Ok(entries)
}

/// Copy the stylesheet images from `<landing_module>/images` to
/// `<out>/images`.
///
/// # Errors
///
/// Returns an error if an image is missing or cannot be copied.
pub fn copy_style_images(config: &Config) -> Result<()> {
  let source = config.source_dir.join(&config.landing_module).join("images");
  let target = config.output_dir.join("images");
  fs::create_dir_all(&target)
    .wrap_err_with(|| format!("Failed to create {}", target.display()))?;

  for image in &config.style_images {
    let from = source.join(image);
    fs::copy(&from, target.join(image)).wrap_err_with(|| {
      format!("Failed to copy style image {}", from.display())
    })?;
  }
  Ok(())
}
