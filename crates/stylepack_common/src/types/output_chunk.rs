use arcstr::ArcStr;

use crate::ModuleId;

#[derive(Debug, Clone)]
pub struct OutputChunk {
  pub name: ArcStr,
  pub filename: ArcStr,
  pub code: String,
  pub is_entry: bool,
  pub facade_module_id: Option<ModuleId>,
  /// Modules of the chunk in execution order.
  pub module_ids: Vec<ModuleId>,
}
