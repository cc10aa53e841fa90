//! Prepare rendered Qt documentation for CHM compilation.
//!
//! The binary is a thin wrapper around [`run`]; the modules are public so
//! that integration tests can drive the pipeline directly.
pub mod cli;
pub mod config;
pub mod error;
pub mod utils;

use std::{fs, path::PathBuf};

use color_eyre::eyre::{Context, Result};
use log::info;
use qtchm_hhp::HelpProject;
use qtchm_toc::{ModuleOutput, ProjectSink, reconcile_module};
use rayon::prelude::*;

use crate::config::Config;

/// Build the HTML Help Workshop project for the documentation described by
/// `config`.
///
/// Module trees are reconciled in parallel from the source pages, then every
/// module is written out in order: pages, contents, index and resources.
/// Returns the path of the written `.hhp` file.
///
/// # Errors
///
/// Returns an error if the Qt version cannot be determined, a module fails
/// to reconcile, or any file cannot be copied or written.
pub fn run(config: &Config) -> Result<PathBuf> {
  let version = utils::qt_version(config)?;
  info!("Preparing Qt docs v.{version}");

  fs::create_dir_all(&config.output_dir).wrap_err_with(|| {
    format!("Failed to create {}", config.output_dir.display())
  })?;
  utils::copy_style_images(config)?;

  let modules = utils::module_dirs(config)?;
  let ctx = qtchm_toc::Context::new(
    &config.source_dir,
    &config.output_dir,
    config.toc.clone(),
  );

  let thread_count = config.jobs.unwrap_or_else(num_cpus::get);
  let pool = rayon::ThreadPoolBuilder::new()
    .num_threads(thread_count)
    .build()
    .wrap_err("Failed to build thread pool")?;
  let outputs: Vec<ModuleOutput> = pool.install(|| {
    modules
      .par_iter()
      .map(|dir| reconcile_module(&ctx, dir))
      .collect::<Result<_, _>>()
  })?;

  let landing = &config.landing_module;
  let style_name = config.style_name();
  let mut project = HelpProject::new(
    &config.output_dir,
    &format!("Qt-{version}"),
    &format!("{landing}/index.html"),
    &format!("Qt {version}"),
  );

  for (dir, module) in modules.iter().zip(&outputs) {
    info!("Processing module {}", module.name);
    let output_dir = config.output_dir.join(&module.name);
    fs::create_dir_all(&output_dir)
      .wrap_err_with(|| format!("Failed to create {}", output_dir.display()))?;

    let pages = utils::pages::process_pages(
      dir,
      &output_dir,
      &style_name,
      landing,
      &mut project,
    )?;
    module.append_to(&mut project);
    utils::resources::process_resources(
      dir,
      &output_dir,
      &config.output_dir,
      &config.style_images,
      &mut project,
    )?;

    info!(
      "Module {}: {pages} pages, {} TOC entries, {} keywords",
      module.name,
      module.toc.iter().map(qtchm_toc::TocNode::node_count).sum::<usize>(),
      module.index.len()
    );
  }

  let style_target = config.output_dir.join(&style_name);
  fs::copy(&config.style, &style_target).wrap_err_with(|| {
    format!("Failed to copy stylesheet {}", config.style.display())
  })?;

  for image in &config.style_images {
    project.add_file(&format!("images/{image}"));
  }
  project.add_file(&style_name);
  project.finalize()?;

  info!("Qt Docs v.{version} are ready for CHM compilation");
  let [hhp, ..] = project.output_files();
  Ok(hhp)
}
