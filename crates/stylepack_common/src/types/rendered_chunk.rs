use arcstr::ArcStr;

use crate::ModuleId;

/// A chunk whose code is rendered but whose file name is not decided yet.
#[derive(Debug, Clone)]
pub struct RenderedChunk {
  pub name: ArcStr,
  pub is_entry: bool,
  pub facade_module_id: Option<ModuleId>,
  /// Modules of the chunk in execution order.
  pub module_ids: Vec<ModuleId>,
}
