use stylepack_common::ModuleId;
use stylepack_ecmascript::ModuleScan;

use super::module_idx::ModuleIdx;

/// A loaded, transformed and scanned module.
#[derive(Debug)]
pub struct Module {
  pub idx: ModuleIdx,
  pub id: ModuleId,
  pub stable_id: String,
  /// Code returned by the last `transform` hook.
  pub code: String,
  pub scan: ModuleScan,
  /// Target of each entry in `scan.import_records`, in the same order.
  pub dependencies: Vec<ModuleIdx>,
}
