use std::{
  fs,
  path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate_to};
use clap_mangen::Man;
use qtchm::config::{CONFIG_FILE_NAME, Config};

const BIN_NAME: &str = "qtchm";

#[derive(Parser)]
#[command(author, version, about)]
struct Xtask {
  #[command(subcommand)]
  command: Commands,
}

/// Artifacts produced by `dist`.
#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Artifact {
  Completions,
  Manpage,
  Config,
}

#[derive(Subcommand)]
enum Commands {
  /// Build distribution artifacts for the qtchm CLI
  Dist {
    /// Output directory for generated files.
    #[arg(short, long, default_value = "dist")]
    output_dir: PathBuf,

    /// Only generate these artifacts. Defaults to all of them.
    #[arg(long, value_enum, value_delimiter = ',')]
    only: Vec<Artifact>,
  },
}

fn main() -> Result<()> {
  let xtask = Xtask::parse();

  match xtask.command {
    Commands::Dist { output_dir, only } => {
      let wanted = |artifact| only.is_empty() || only.contains(&artifact);
      if wanted(Artifact::Completions) {
        generate_completions(&output_dir)?;
      }
      if wanted(Artifact::Manpage) {
        generate_manpage(&output_dir)?;
      }
      if wanted(Artifact::Config) {
        generate_config(&output_dir)?;
      }
    },
  }

  Ok(())
}

/// Generate shell completions for various shells.
fn generate_completions(output_dir: &Path) -> Result<()> {
  let completions_dir = output_dir.join("completions");
  fs::create_dir_all(&completions_dir).with_context(|| {
    format!("Failed to create {}", completions_dir.display())
  })?;
  let mut cmd = qtchm::cli::Cli::command();
  for shell in [Shell::Bash, Shell::Zsh, Shell::Fish, Shell::PowerShell] {
    generate_to(shell, &mut cmd, BIN_NAME, &completions_dir)?;
  }
  println!(
    "Shell completions generated in {}",
    completions_dir.display()
  );
  Ok(())
}

/// Generate the qtchm(1) manpage.
fn generate_manpage(output_dir: &Path) -> Result<()> {
  let man_dir = output_dir.join("man");
  fs::create_dir_all(&man_dir)?;
  let man = Man::new(qtchm::cli::Cli::command().name(BIN_NAME));
  let file_path = man_dir.join(format!("{BIN_NAME}.1"));
  let mut file = fs::File::create(&file_path).with_context(|| {
    format!("Failed to create manpage file at {}", file_path.display())
  })?;
  man
    .render(&mut file)
    .with_context(|| "Failed to render manpage")?;
  println!("Manpage generated in {}", man_dir.display());
  Ok(())
}

/// Write the default configuration as a starting point for `qtchm.toml`.
fn generate_config(output_dir: &Path) -> Result<()> {
  fs::create_dir_all(output_dir)?;
  let content = toml::to_string_pretty(&Config::default())
    .context("Failed to serialize default configuration")?;
  let file_path = output_dir.join(CONFIG_FILE_NAME);
  fs::write(&file_path, content).with_context(|| {
    format!("Failed to write {}", file_path.display())
  })?;
  println!("Default configuration written to {}", file_path.display());
  Ok(())
}
