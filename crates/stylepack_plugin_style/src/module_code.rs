use stylepack_plugin::PluginContext;
use stylepack_utils::{
  concat_string,
  ecmascript::{is_reserved_word, is_validate_identifier_name, json_to_js, to_js_string_literal},
  xxhash::xxhash_with_base,
};

use crate::{
  class_name::ensure_class_name, runtime::STYLE_INJECT_ID, ClassMap, InjectOption,
  NamedExportsOption, NormalizedStylePluginOptions,
};

/// What a stylesheet module exposes to the script that imports it.
#[derive(Debug)]
pub struct ModuleCode<'a> {
  pub id: &'a str,
  pub stable_id: &'a str,
  /// The CSS as injected, source map comment included.
  pub css: &'a str,
  pub class_map: Option<&'a ClassMap>,
}

/// Name of the variable holding the CSS. Stable across machines.
fn css_variable_name(stable_id: &str) -> String {
  let hash = xxhash_with_base(stable_id.as_bytes(), 36);
  concat_string!("css_", &hash[..6])
}

fn render_class_map(class_map: &ClassMap) -> String {
  if class_map.is_empty() {
    return "{}".to_string();
  }
  let mut object = String::from("{\n");
  for (index, (name, value)) in class_map.iter().enumerate() {
    if index > 0 {
      object.push_str(",\n");
    }
    object.push_str(&concat_string!("  ", to_js_string_literal(name), ": ", to_js_string_literal(value)));
  }
  object.push_str("\n}");
  object
}

pub fn render_module_code(
  ctx: &PluginContext,
  options: &NormalizedStylePluginOptions,
  module: &ModuleCode,
) -> String {
  let mut code = String::new();

  let inject = !options.is_extract() && matches!(options.inject, InjectOption::Enabled { .. });
  if inject {
    code.push_str(&concat_string!(
      "import styleInject from ",
      to_js_string_literal(STYLE_INJECT_ID),
      ";\n"
    ));
  }

  if let Some(class_map) = module.class_map {
    render_named_exports(ctx, &options.named_exports, module.stable_id, class_map, &mut code);
  }

  let default_export = module.class_map.map(render_class_map);

  if options.is_extract() {
    // Extracted CSS never ends up in the script.
    code.push_str(&concat_string!(
      "export default ",
      default_export.as_deref().unwrap_or("undefined"),
      ";\n"
    ));
    return code;
  }

  let variable_name = css_variable_name(module.stable_id);
  code.push_str(&concat_string!("var ", variable_name, " = ", to_js_string_literal(module.css), ";\n"));
  code.push_str(&concat_string!(
    "export default ",
    default_export.as_deref().unwrap_or(&variable_name),
    ";\n"
  ));
  code.push_str(&concat_string!("export var stylesheet = ", variable_name, ";\n"));

  match &options.inject {
    InjectOption::Enabled { insert_at: Some(insert_at) } => {
      let inject_options = json_to_js(&serde_json::json!({ "insertAt": insert_at }));
      code.push_str(&concat_string!("styleInject(", variable_name, ", ", inject_options, ");\n"));
    }
    InjectOption::Enabled { insert_at: None } => {
      code.push_str(&concat_string!("styleInject(", variable_name, ");\n"));
    }
    InjectOption::Custom(inject) => {
      code.push_str(&inject(&variable_name, module.id));
      code.push('\n');
    }
    InjectOption::Disabled => {}
  }

  code
}

fn render_named_exports(
  ctx: &PluginContext,
  named_exports: &NamedExportsOption,
  stable_id: &str,
  class_map: &ClassMap,
  code: &mut String,
) {
  if matches!(named_exports, NamedExportsOption::Disabled) {
    return;
  }
  for (name, value) in class_map {
    let export_name = match named_exports {
      NamedExportsOption::Custom(rename) => rename(name),
      _ => ensure_class_name(name),
    };
    if !is_validate_identifier_name(&export_name) || is_reserved_word(&export_name) {
      ctx.warn(anyhow::anyhow!(
        "Skipped exporting \"{name}\" in {stable_id}: \"{export_name}\" is not a valid identifier"
      ));
      continue;
    }
    if export_name != *name {
      ctx.warn(anyhow::anyhow!("Exported \"{name}\" as \"{export_name}\" in {stable_id}"));
    }
    code.push_str(&concat_string!("export var ", export_name, " = ", to_js_string_literal(value), ";\n"));
  }
}
