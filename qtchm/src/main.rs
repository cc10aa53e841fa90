use color_eyre::eyre::Result;
use log::LevelFilter;
use qtchm::{cli::Cli, config::Config};

fn main() -> Result<()> {
  color_eyre::install()?;

  let cli = Cli::parse_args();

  env_logger::Builder::new()
    .filter_level(if cli.verbose {
      LevelFilter::Debug
    } else {
      LevelFilter::Info
    })
    .write_style(env_logger::WriteStyle::Always)
    .init();

  let config = Config::load(&cli)?;
  qtchm::run(&config)?;
  Ok(())
}
