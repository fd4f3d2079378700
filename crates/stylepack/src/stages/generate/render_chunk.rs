use itertools::Itertools;
use rustc_hash::FxHashMap;
use stylepack_ecmascript::{ImportBinding, ImportRecord};
use stylepack_utils::{
  concat_string,
  ecmascript::{is_validate_identifier_name, property_access_str, to_js_string_literal},
};

use crate::{
  stages::link::ChunkPlan,
  types::{module::Module, module_idx::ModuleIdx, IndexModules},
};

fn module_binding(position: usize) -> String {
  format!("__module_{position}")
}

/// Renders a CommonJS chunk. Every module becomes a function scope evaluated once, in execution
/// order, whose result is its exports object.
pub fn render_chunk(modules: &IndexModules, chunk: &ChunkPlan) -> String {
  // Positions inside the chunk keep the output independent of module discovery order.
  let positions = chunk
    .modules
    .iter()
    .enumerate()
    .map(|(position, idx)| (*idx, position))
    .collect::<FxHashMap<ModuleIdx, usize>>();

  let mut code = String::from("'use strict';\n");
  for (position, idx) in chunk.modules.iter().enumerate() {
    code.push('\n');
    code.push_str(&render_module(&modules[*idx], position, &positions));
  }

  let entry = module_binding(positions[&chunk.entry]);
  code.push_str(&concat_string!("\nmodule.exports = ", entry, ";\n"));
  code
}

fn render_module(
  module: &Module,
  position: usize,
  positions: &FxHashMap<ModuleIdx, usize>,
) -> String {
  let body = module.scan.render(&module.code, |record_idx, record| {
    let dependency = module_binding(positions[&module.dependencies[record_idx]]);
    render_import(record, &dependency)
  });

  let exports = module
    .scan
    .exports
    .iter()
    .map(|export| {
      let key = if is_validate_identifier_name(&export.exported) {
        export.exported.clone()
      } else {
        to_js_string_literal(&export.exported)
      };
      concat_string!(key, ": ", export.local)
    })
    .join(", ");

  let binding = module_binding(position);
  let mut rendered =
    concat_string!("// ", module.stable_id, "\nvar ", binding, " = (function () {\n", body);
  if !rendered.ends_with('\n') {
    rendered.push('\n');
  }
  let separator = if exports.is_empty() { "" } else { ", " };
  rendered.push_str(&concat_string!("return { __proto__: null", separator, exports, " };\n})();\n"));
  rendered
}

/// Kept on a single line so the module's line numbers survive.
fn render_import(record: &ImportRecord, dependency: &str) -> String {
  record
    .bindings
    .iter()
    .map(|binding| match binding {
      ImportBinding::Default { local } => {
        concat_string!("var ", local, " = ", property_access_str(dependency, "default"), ";")
      }
      ImportBinding::Named { imported, local } => {
        concat_string!("var ", local, " = ", property_access_str(dependency, imported), ";")
      }
      ImportBinding::Namespace { local } => concat_string!("var ", local, " = ", dependency, ";"),
    })
    .join(" ")
}
