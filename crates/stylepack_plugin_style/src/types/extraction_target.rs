/// A stylesheet file of the bundle. Written at most once per build.
#[derive(Debug, Clone)]
pub struct ExtractionTarget {
  /// Final file name relative to the output directory.
  pub path: String,
  pub content_hash: String,
  pub finalized: bool,
}
