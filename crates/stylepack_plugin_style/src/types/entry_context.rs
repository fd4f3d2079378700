use std::sync::Arc;

use crate::StyleResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
  /// The CSS lives in the module code and is applied at runtime.
  Injected,
  Extracted,
  /// Extraction was vetoed by `on_extract`.
  Dropped,
}

/// The stylesheets of one entry chunk and where they end up.
#[derive(Debug)]
pub struct EntryContext {
  pub entry_name: String,
  pub output_kind: OutputKind,
  /// In module execution order.
  pub accumulated_results: Vec<Arc<StyleResult>>,
  /// File name template, relative to the output directory. Only set for `Extracted`.
  pub resolved_output_path: Option<String>,
}
