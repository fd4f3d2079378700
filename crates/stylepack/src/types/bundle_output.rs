use stylepack_common::Output;

#[derive(Debug, Default)]
pub struct BundleOutput {
  /// Entry chunks first, then assets, each group ordered by file name.
  pub assets: Vec<Output>,
  pub warnings: Vec<anyhow::Error>,
}
