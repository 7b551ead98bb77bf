pub mod controller;
pub mod datetime;
pub mod error;
pub mod model;
pub mod persistence;
pub mod state;
pub mod storage;
pub mod view;

#[cfg(feature = "cli")]
pub mod cli;
#[cfg(feature = "cli")]
pub mod commands;
#[cfg(feature = "cli")]
pub mod config;
#[cfg(feature = "cli")]
pub mod datastore;
#[cfg(feature = "cli")]
pub mod render;

pub use controller::{
  Controller,
  Event,
  Notice,
  NoticeLevel,
  Outcome,
  Refresh
};
pub use error::ChecklistError;
pub use model::{
  List,
  Task
};
pub use state::AppState;
pub use storage::{
  KeyValueStorage,
  MemoryStorage
};
pub use view::{
  View,
  render
};

#[cfg(feature = "cli")]
use std::ffi::OsString;

#[cfg(feature = "cli")]
use anyhow::Context;
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use tracing::{
  debug,
  info
};

/// Terminal entry point. Returns the
/// process exit status.
#[cfg(feature = "cli")]
#[tracing::instrument(skip_all)]
pub fn run(
  raw_args: Vec<OsString>
) -> anyhow::Result<i32> {
  let pre =
    cli::preprocess_args(&raw_args)?;
  let cli = cli::GlobalCli::parse_from(
    pre.cleaned_args
  );

  cli::init_tracing(
    cli.verbose,
    cli.quiet
  )?;

  info!(
    verbose = cli.verbose,
    quiet = cli.quiet,
    "starting checklist CLI"
  );
  debug!(?pre.rc_overrides, "preprocessed rc overrides");

  let mut cfg = config::Config::load(
    cli.config.as_deref()
  )?;
  cfg.apply_overrides(
    pre.rc_overrides.into_iter().chain(
      cli
        .rc_overrides
        .into_iter()
        .map(|kv| (kv.key, kv.value))
    )
  )?;

  let data_dir = cfg
    .data_dir(cli.data.as_deref())
    .context(
      "failed to resolve data \
       directory"
    )?;

  let storage =
    datastore::FileStorage::open(
      &data_dir
    )
    .with_context(|| {
      format!(
        "failed to open storage at {}",
        data_dir.display()
      )
    })?;

  let mut controller =
    Controller::load(storage);
  let renderer =
    render::TextRenderer::new(&cfg);

  let code = commands::dispatch(
    &mut controller,
    &renderer,
    cli.command.unwrap_or(
      cli::Command::Show
    )
  )?;

  info!(code, "done");
  Ok(code)
}
