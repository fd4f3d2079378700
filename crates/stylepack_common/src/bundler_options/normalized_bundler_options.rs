use std::path::{Path, PathBuf};

use sugar_path::SugarPath;

use crate::InputItem;

#[derive(Debug)]
pub struct NormalizedBundlerOptions {
  // --- Input
  pub input: Vec<InputItem>,
  pub cwd: PathBuf,

  // --- Output
  pub entry_filenames: String,
  /// Output directory, relative to `cwd` unless absolute. With `file` set it is the file's parent.
  pub dir: String,
  pub file: Option<String>,
}

impl NormalizedBundlerOptions {
  /// Absolute, normalized output directory.
  pub fn out_dir(&self) -> PathBuf {
    self.cwd.join(&self.dir).normalize()
  }

  /// Absolute path of an output file name relative to `out_dir`.
  pub fn resolve_output_path(&self, filename: &str) -> PathBuf {
    self.out_dir().join(filename).normalize()
  }

  /// Whether `file` is set, meaning a single output file instead of a directory of chunks.
  pub fn is_single_file(&self) -> bool {
    self.file.is_some()
  }

  pub fn file_name(&self) -> Option<&str> {
    self.file.as_deref().and_then(|file| Path::new(file).file_name()).and_then(|name| name.to_str())
  }
}
