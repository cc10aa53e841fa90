use std::path::PathBuf;

use clap::Parser;

/// Command line interface for qtchm
#[derive(Parser, Debug)]
#[command(
  author,
  version,
  about = "qtchm: prepare Qt documentation for CHM compilation"
)]
pub struct Cli {
  /// Enable verbose debug logging
  #[arg(short, long)]
  pub verbose: bool,

  /// Path to a TOML configuration file. Without it, `qtchm.toml` in the
  /// current directory is used when present.
  #[arg(short = 'c', long = "config-file")]
  pub config_file: Option<PathBuf>,

  /// Number of threads to use for module reconciliation.
  #[arg(short = 'p', long = "jobs")]
  pub jobs: Option<usize>,

  /// Style sheet for docs
  #[arg(short, long, required = true)]
  pub style: PathBuf,

  /// Qt docs source directory
  pub docs_source: PathBuf,

  /// Output directory for chm files
  pub docs_out: PathBuf,
}

impl Cli {
  /// Parse command line arguments into a [`Cli`] struct.
  #[must_use]
  pub fn parse_args() -> Self {
    Self::parse()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_positional_and_flags() {
    let cli = Cli::try_parse_from([
      "qtchm", "-v", "-p", "4", "-s", "qt.css", "docs", "out",
    ])
    .expect("valid arguments");
    assert!(cli.verbose);
    assert_eq!(cli.jobs, Some(4));
    assert_eq!(cli.style, PathBuf::from("qt.css"));
    assert_eq!(cli.docs_source, PathBuf::from("docs"));
    assert_eq!(cli.docs_out, PathBuf::from("out"));
    assert!(cli.config_file.is_none());
  }

  #[test]
  fn style_is_required() {
    assert!(Cli::try_parse_from(["qtchm", "docs", "out"]).is_err());
  }
}
