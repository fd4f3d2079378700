use std::path::Path;

use serde::Deserialize;
use stylepack_error::{ConfigurationError, TransformError};
use stylepack_utils::concat_string;

use super::{Loader, LoaderContext, LoaderResult};

pub const SASS_LOADER_NAME: &str = "sass";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct SassLoaderOptions {
  /// Prepended to every file, e.g. `@import 'variables';`.
  data: Option<String>,
  /// Extra load paths, relative to the working directory.
  #[serde(default)]
  include_paths: Vec<String>,
}

/// Compiles `.scss` and `.sass` files with `grass`.
#[derive(Debug, Default)]
pub struct SassLoader {
  options: SassLoaderOptions,
}

impl SassLoader {
  pub fn from_options(options: &serde_json::Value) -> Result<Self, ConfigurationError> {
    if options.is_null() {
      return Ok(Self::default());
    }
    let options = SassLoaderOptions::deserialize(options).map_err(|err| {
      ConfigurationError::InvalidLoaderOptions {
        loader: SASS_LOADER_NAME.to_string(),
        reason: err.to_string(),
      }
    })?;
    Ok(Self { options })
  }
}

impl Loader for SassLoader {
  fn name(&self) -> &str {
    SASS_LOADER_NAME
  }

  fn test(&self, id: &str) -> bool {
    matches!(Path::new(id).extension().and_then(|ext| ext.to_str()), Some("sass" | "scss"))
  }

  fn process(&self, input: LoaderResult, ctx: &LoaderContext) -> anyhow::Result<LoaderResult> {
    let path = Path::new(ctx.id);
    let syntax = if path.extension().is_some_and(|ext| ext == "sass") {
      grass::InputSyntax::Sass
    } else {
      grass::InputSyntax::Scss
    };

    let source = match &self.options.data {
      Some(data) => concat_string!(data, "\n", input.code),
      None => input.code,
    };

    let mut options = grass::Options::default().input_syntax(syntax);
    if let Some(dir) = path.parent() {
      options = options.load_path(dir);
    }
    for include_path in &self.options.include_paths {
      options = options.load_path(ctx.cwd.join(include_path));
    }
    options = options.load_path(ctx.cwd.join("node_modules"));

    let code = grass::from_string(source, &options)
      .map_err(|err| TransformError::new(ctx.id, err.to_string()))?;

    Ok(LoaderResult { code, map: None, class_map: None })
  }
}

#[cfg(test)]
mod tests {
  use std::path::Path;

  use super::SassLoader;
  use crate::loaders::{Loader, LoaderContext, LoaderResult};

  #[test]
  fn compiles_with_prepended_data() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("_prepend.scss"), "$color: red;").unwrap();
    let id = dir.path().join("style.scss");
    let id = id.to_str().unwrap();

    let loader =
      SassLoader::from_options(&serde_json::json!({ "data": "@import 'prepend';" })).unwrap();
    assert!(loader.test(id));
    assert!(!loader.test("/a.css"));

    let null = serde_json::Value::Null;
    let ctx = LoaderContext {
      id,
      stable_id: "style.scss",
      cwd: Path::new("/"),
      source_map: false,
      preprocessed: false,
      modules: None,
      options: &null,
    };
    let input = LoaderResult { code: ".a { .b { color: $color; } }".to_string(), ..Default::default() };
    let result = loader.process(input, &ctx).unwrap();
    assert!(result.code.contains(".a .b"));
    assert!(result.code.contains("color: red"));
  }
}
