//! Rewriting of the rendered HTML pages.
use std::{fs, path::Path, sync::LazyLock};

use color_eyre::eyre::{Context, Result};
use log::{debug, error};
use qtchm_toc::ProjectSink;
use regex::Regex;

use crate::utils::sorted_entries;

// Stylesheet link followed by the script that swaps it at runtime
static STYLE_BLOCK: LazyLock<Option<Regex>> = LazyLock::new(|| {
  Regex::new(r"(?s)<link.*?</script>")
    .inspect_err(|e| error!("Failed to compile STYLE_BLOCK regex: {e}"))
    .ok()
});

// Root cell of the navigation bar, left without a link by qdoc
static ROOT_CELL: LazyLock<Option<Regex>> = LazyLock::new(|| {
  Regex::new(
    r#"(?m)(<div class="navigationbar">\s*<table><tr>\s*)<td >([^<]*?)</td>"#,
  )
  .inspect_err(|e| error!("Failed to compile ROOT_CELL regex: {e}"))
  .ok()
});

/// Rewrite one page for offline viewing.
///
/// The first stylesheet block is replaced with a plain link to `style_name`
/// one level up, the navigation bar root gets a link to the landing page,
/// and the empty paragraph after navigation buttons is removed.
#[must_use]
pub fn rewrite_page(
  content: &str,
  style_name: &str,
  landing_module: &str,
) -> String {
  let mut content = content.to_string();

  if let Some(re) = STYLE_BLOCK.as_ref() {
    let link = format!(
      r#"<link rel="stylesheet" type="text/css" href="../{style_name}" />"#
    );
    content = re.replacen(&content, 1, regex::NoExpand(&link)).into_owned();
  }

  if let Some(re) = ROOT_CELL.as_ref() {
    let replacement = format!(
      r#"${{1}}<td ><a href="../{landing_module}/index.html">${{2}}</a></td>"#
    );
    content = re.replacen(&content, 1, replacement.as_str()).into_owned();
  }

  content.replace("</p><p/>", "</p>")
}

/// Rewrite every page of `module_dir` into `output_dir` and register it.
///
/// Pages already present in `output_dir` are left untouched, so a rerun
/// only rebuilds the project files.
///
/// # Errors
///
/// Returns an error if a page cannot be read or written.
pub fn process_pages<S: ProjectSink>(
  module_dir: &Path,
  output_dir: &Path,
  style_name: &str,
  landing_module: &str,
  sink: &mut S,
) -> Result<usize> {
  let module = output_dir
    .file_name()
    .map(|name| name.to_string_lossy().into_owned())
    .unwrap_or_default();
  let mut count = 0;

  for page in sorted_entries(module_dir)? {
    if !page.is_file()
      || page
        .extension()
        .is_none_or(|ext| !ext.eq_ignore_ascii_case("html"))
    {
      continue;
    }
    let Some(file_name) = page.file_name() else {
      continue;
    };

    let target = output_dir.join(file_name);
    if target.exists() {
      debug!("Keeping existing {}", target.display());
    } else {
      let content = fs::read_to_string(&page)
        .wrap_err_with(|| format!("Failed to read {}", page.display()))?;
      fs::write(&target, rewrite_page(&content, style_name, landing_module))
        .wrap_err_with(|| format!("Failed to write {}", target.display()))?;
    }

    sink.add_file(&format!("{module}/{}", file_name.to_string_lossy()));
    count += 1;
  }

  Ok(count)
}
