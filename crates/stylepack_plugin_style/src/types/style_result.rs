use stylepack_common::ModuleId;
use stylepack_sourcemap::SourceMap;
use stylepack_utils::indexmap::FxIndexMap;

/// Original class name to the generated one(s), ordered by original name.
pub type ClassMap = FxIndexMap<String, String>;

/// Output of the loader chain for one stylesheet module. Created once per module and build.
#[derive(Debug)]
pub struct StyleResult {
  pub source_text: String,
  pub transformed_text: String,
  pub source_map: Option<SourceMap>,
  pub class_map: Option<ClassMap>,
  pub owner_module_id: ModuleId,
}
