use super::module_idx::ModuleIdx;

#[derive(Debug, Clone)]
pub struct EntryPoint {
  /// Name given in `input`, if any.
  pub name: Option<String>,
  pub idx: ModuleIdx,
}
