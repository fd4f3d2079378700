mod ecma_compiler;
mod module_scan;

pub use crate::{
  ecma_compiler::EcmaCompiler,
  module_scan::{
    Edit, ImportBinding, ImportRecord, LocalExport, ModuleScan, Replacement, DEFAULT_EXPORT_LOCAL,
  },
};
