pub mod bundle_output;
pub mod entry_point;
pub mod module;
pub mod module_idx;

use std::sync::Arc;

use oxc_index::IndexVec;
use stylepack_common::NormalizedBundlerOptions;
use stylepack_resolver::Resolver;

use self::{module::Module, module_idx::ModuleIdx};

pub type IndexModules = IndexVec<ModuleIdx, Module>;

pub type SharedResolver = Arc<Resolver>;
pub type SharedOptions = Arc<NormalizedBundlerOptions>;
