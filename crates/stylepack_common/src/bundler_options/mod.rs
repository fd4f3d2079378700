pub mod filename_template;
pub mod input_item;
pub mod normalized_bundler_options;

use std::path::PathBuf;

use crate::InputItem;

#[derive(Default, Debug, Clone)]
pub struct BundlerOptions {
  // --- Input
  pub input: Option<Vec<InputItem>>,
  pub cwd: Option<PathBuf>,

  // --- Output
  pub entry_filenames: Option<String>,
  pub dir: Option<String>,
  pub file: Option<String>,
}
