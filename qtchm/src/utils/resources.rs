//! Resource directories shipped next to the pages: images, scripts and
//! example sources.
use std::{fs, path::Path};

use color_eyre::eyre::{Context, Result};
use log::debug;
use qtchm_toc::{ProjectSink, href::path_to_href};
use walkdir::WalkDir;

use crate::utils::sorted_entries;

const STYLE_DIR: &str = "style";
const IMAGES_DIR: &str = "images";

/// Copy every resource directory of `module_dir` into `output_dir` and
/// register the copied files.
///
/// The `style` directory is replaced by the shared stylesheet and never
/// copied. Style images are removed from a module's `images` directory, and
/// an `images` directory left without files is removed. Directories already
/// present in `output_dir` are not copied again.
///
/// # Errors
///
/// Returns an error if a directory cannot be copied, listed or cleaned up.
pub fn process_resources<S: ProjectSink>(
  module_dir: &Path,
  output_dir: &Path,
  output_root: &Path,
  style_images: &[String],
  sink: &mut S,
) -> Result<()> {
  for dir in sorted_entries(module_dir)? {
    if !dir.is_dir() {
      continue;
    }
    let Some(name) = dir.file_name() else {
      continue;
    };
    if name == STYLE_DIR {
      continue;
    }

    let target = output_dir.join(name);
    if target.exists() {
      debug!("Keeping existing {}", target.display());
    } else {
      let options = fs_extra::dir::CopyOptions::new();
      fs_extra::dir::copy(&dir, output_dir, &options).wrap_err_with(|| {
        format!(
          "Failed to copy {} to {}",
          dir.display(),
          output_dir.display()
        )
      })?;
    }

    let is_images = name == IMAGES_DIR;
    if is_images {
      remove_style_images(&target, style_images)?;
    }

    register_files(&target, output_root, sink)?;

    if is_images && is_empty_dir(&target)? {
      debug!("Removing {}, it only held style images", target.display());
      fs::remove_dir(&target)
        .wrap_err_with(|| format!("Failed to remove {}", target.display()))?;
    }
  }

  Ok(())
}

fn remove_style_images(
  images_dir: &Path,
  style_images: &[String],
) -> Result<()> {
  for image in style_images {
    let path = images_dir.join(image);
    if path.is_file() {
      fs::remove_file(&path)
        .wrap_err_with(|| format!("Failed to remove {}", path.display()))?;
    }
  }
  Ok(())
}

fn register_files<S: ProjectSink>(
  dir: &Path,
  output_root: &Path,
  sink: &mut S,
) -> Result<()> {
  for entry in WalkDir::new(dir).sort_by_file_name() {
    let entry =
      entry.wrap_err_with(|| format!("Failed to walk {}", dir.display()))?;
    if !entry.file_type().is_file() {
      continue;
    }
    if let Ok(rel) = entry.path().strip_prefix(output_root) {
      sink.add_file(&path_to_href(rel));
    }
  }
  Ok(())
}

fn is_empty_dir(dir: &Path) -> Result<bool> {
  let mut entries = fs::read_dir(dir)
    .wrap_err_with(|| format!("Failed to read directory {}", dir.display()))?;
  Ok(entries.next().is_none())
}
