use std::path::PathBuf;

use clap::Args;

use crate::types::{insert_at::InsertAt, source_map::SourceMap};

#[derive(Args)]
pub struct InputArgs {
  #[clap(long)]
  pub cwd: Option<PathBuf>,

  #[clap(long, short, action = clap::ArgAction::Append)]
  pub input: Option<Vec<PathBuf>>,
}

#[derive(Args)]
pub struct OutputArgs {
  #[clap(long, short = 'd', conflicts_with = "file")]
  pub dir: Option<String>,

  #[clap(long, short = 'o')]
  pub file: Option<String>,

  #[clap(long)]
  pub entry_filenames: Option<String>,
}

#[derive(Args)]
pub struct StyleArgs {
  /// Write CSS to a file instead of injecting it. Takes an optional path.
  #[clap(long, num_args = 0..=1, default_missing_value = "true")]
  pub extract: Option<String>,

  #[clap(long)]
  pub no_inject: bool,

  #[clap(long)]
  pub insert_at: Option<InsertAt>,

  #[clap(long)]
  pub source_map: Option<SourceMap>,

  #[clap(long)]
  pub modules: bool,

  #[clap(long)]
  pub named_exports: bool,

  #[clap(long)]
  pub multi_entry: bool,
}

#[derive(Args)]
pub struct EnhanceArgs {
  #[clap(long, short = 'm')]
  pub minimize: bool,

  #[clap(long, short = 's')]
  pub silent: bool,
}
