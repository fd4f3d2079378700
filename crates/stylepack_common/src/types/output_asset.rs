#[derive(Debug, Clone)]
pub struct OutputAsset {
  /// Relative to the output directory. May start with `../` for files written outside of it.
  pub filename: String,
  pub source: String,
  /// Names of the entries the asset was produced for.
  pub names: Vec<String>,
}

impl OutputAsset {
  pub fn filename(&self) -> &str {
    &self.filename
  }

  pub fn content_as_bytes(&self) -> &[u8] {
    self.source.as_bytes()
  }
}
