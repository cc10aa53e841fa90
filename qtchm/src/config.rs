use std::{
  fs,
  path::{Path, PathBuf},
};

use log::info;
use qtchm_toc::TocRules;
use serde::{Deserialize, Serialize};

use crate::{cli::Cli, error::ConfigError};

/// Name of the configuration file looked up in the current directory.
pub const CONFIG_FILE_NAME: &str = "qtchm.toml";

/// Images used by the stylesheet. They are collected once under
/// `<out>/images` instead of being copied into every module.
const STYLE_IMAGES: [&str; 11] = [
  "ico_out.png",
  "ico_note.png",
  "ico_note_attention.png",
  "btn_prev.png",
  "btn_next.png",
  "home.png",
  "arrow_bc.png",
  "bgrContent.png",
  "bullet_dn.png",
  "bullet_sq.png",
  "logo.png",
];

/// Configuration for a qtchm run.
///
/// The file-backed fields come from an optional TOML file; the paths always
/// come from the command line.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
  /// Qt docs source directory.
  #[serde(skip)]
  pub source_dir: PathBuf,

  /// Output directory for the project and the rewritten pages.
  #[serde(skip)]
  pub output_dir: PathBuf,

  /// Stylesheet copied to the output root and linked from every page.
  #[serde(skip)]
  pub style: PathBuf,

  /// Module processed first. Its `index.html` is the default topic and its
  /// `<module>.index` file carries the Qt version.
  pub landing_module: String,

  /// Source directories that are not documentation modules.
  pub excluded_dirs: Vec<String>,

  /// Stylesheet images, copied from `<landing_module>/images`.
  pub style_images: Vec<String>,

  /// Number of threads to use for module reconciliation.
  pub jobs: Option<usize>,

  /// Table of contents rules.
  pub toc: TocRules,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      source_dir:     PathBuf::new(),
      output_dir:     PathBuf::new(),
      style:          PathBuf::new(),
      landing_module: "qtdoc".to_string(),
      excluded_dirs:  vec!["config".to_string(), "global".to_string()],
      style_images:   STYLE_IMAGES.iter().map(ToString::to_string).collect(),
      jobs:           None,
      toc:            TocRules::default(),
    }
  }
}

impl Config {
  /// Load configuration from a TOML file.
  ///
  /// # Errors
  ///
  /// Returns an error if the file cannot be read or parsed, or if it is not
  /// a `.toml` file.
  pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
    let path = path.as_ref();
    let is_toml = path
      .extension()
      .and_then(|ext| ext.to_str())
      .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
    if !is_toml {
      return Err(ConfigError::Format(path.to_path_buf()));
    }

    let content =
      fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
      })?;
    toml::from_str(&content).map_err(|source| ConfigError::Parse {
      path: path.to_path_buf(),
      source,
    })
  }

  /// Look for [`CONFIG_FILE_NAME`] in the current directory.
  #[must_use]
  pub fn find_config_file() -> Option<PathBuf> {
    let path = std::env::current_dir().ok()?.join(CONFIG_FILE_NAME);
    path.is_file().then_some(path)
  }

  /// Load the configuration file named on the command line, or a discovered
  /// one, and merge the command line into it.
  ///
  /// # Errors
  ///
  /// Returns an error if a configuration file exists but cannot be loaded.
  pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
    let mut config = if let Some(path) = &cli.config_file {
      Self::from_file(path)?
    } else if let Some(discovered) = Self::find_config_file() {
      info!("Using discovered config file: {}", discovered.display());
      Self::from_file(&discovered)?
    } else {
      Self::default()
    };

    config.merge_with_cli(cli);
    Ok(config)
  }

  /// Apply command line values. The command line wins over the file.
  pub fn merge_with_cli(&mut self, cli: &Cli) {
    self.source_dir.clone_from(&cli.docs_source);
    self.output_dir.clone_from(&cli.docs_out);
    self.style.clone_from(&cli.style);
    if cli.jobs.is_some() {
      self.jobs = cli.jobs;
    }
  }

  /// Whether `name` is a source directory other than a regular module.
  #[must_use]
  pub fn is_excluded(&self, name: &str) -> bool {
    name == self.landing_module
      || self.excluded_dirs.iter().any(|excluded| excluded == name)
  }

  /// File name of the stylesheet, as linked from pages and registered in
  /// the project.
  #[must_use]
  pub fn style_name(&self) -> String {
    self
      .style
      .file_name()
      .map(|name| name.to_string_lossy().into_owned())
      .unwrap_or_default()
  }
}
