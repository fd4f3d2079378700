use itertools::Itertools;
use lightningcss::{
  css_modules::{Config, CssModuleExports, CssModuleReference, Pattern},
  error::Error,
  stylesheet::{MinifyOptions, ParserOptions, PrinterOptions, StyleSheet},
  targets::Targets,
};
use stylepack_error::TransformError;
use stylepack_sourcemap::SourceMap;

use crate::{ClassMap, StyleTransformer, TransformOptions, TransformOutput};

/// Parses, optionally minifies and prints CSS with `lightningcss`.
#[derive(Debug, Default)]
pub struct LightningTransformer;

impl StyleTransformer for LightningTransformer {
  fn transform(
    &self,
    source: &str,
    module_id: &str,
    options: &TransformOptions,
  ) -> Result<TransformOutput, TransformError> {
    let css_modules = match options.css_modules {
      Some(Some(pattern)) => Some(Config {
        pattern: Pattern::parse(pattern).map_err(|err| {
          TransformError::new(module_id, format!("Invalid CSS modules pattern \"{pattern}\": {err}"))
        })?,
        ..Config::default()
      }),
      Some(None) => Some(Config::default()),
      None => None,
    };

    let parser_options = ParserOptions {
      filename: options.filename.to_string(),
      css_modules,
      ..ParserOptions::default()
    };
    let mut stylesheet = StyleSheet::parse(source, parser_options)
      .map_err(|err| to_transform_error(module_id, source, &err))?;

    let targets = Targets { browsers: options.targets, ..Targets::default() };
    // Prefixing happens while minifying.
    if options.minify || options.targets.is_some() {
      stylesheet
        .minify(MinifyOptions { targets, ..MinifyOptions::default() })
        .map_err(|err| to_transform_error(module_id, source, &err))?;
    }

    let mut source_map = None;
    if options.source_map {
      let mut map = parcel_sourcemap::SourceMap::new("/");
      let source_index = map.add_source(options.filename);
      if !options.preprocessed {
        map.set_source_content(source_index as usize, source).map_err(|err| {
          TransformError::new(module_id, format!("Failed to generate source map: {err:?}"))
        })?;
      }
      source_map = Some(map);
    }

    let printed = stylesheet
      .to_css(PrinterOptions {
        minify: options.minify,
        source_map: source_map.as_mut(),
        targets,
        ..PrinterOptions::default()
      })
      .map_err(|err| to_transform_error(module_id, source, &err))?;

    let map = match source_map.as_mut() {
      Some(map) => {
        let json = map.to_json(None).map_err(|err| {
          TransformError::new(module_id, format!("Failed to generate source map: {err:?}"))
        })?;
        let map = SourceMap::from_json_string(&json).map_err(|err| {
          TransformError::new(module_id, format!("Failed to read source map: {err:?}"))
        })?;
        Some(map)
      }
      None => None,
    };

    Ok(TransformOutput { code: printed.code, map, class_map: printed.exports.map(to_class_map) })
  }
}

fn to_transform_error<T: std::fmt::Display>(
  module_id: &str,
  source: &str,
  error: &Error<T>,
) -> TransformError {
  let transform_error = TransformError::new(module_id, error.kind.to_string());
  match &error.loc {
    Some(loc) => transform_error.with_location(source, loc.line, loc.column),
    None => transform_error,
  }
}

/// Composed classes follow the generated name, separated by spaces.
fn to_class_map(exports: CssModuleExports) -> ClassMap {
  exports
    .into_iter()
    .sorted_by(|(a, _), (b, _)| a.cmp(b))
    .map(|(original, export)| {
      let mut generated = export.name;
      for reference in export.composes {
        match reference {
          CssModuleReference::Local { name } | CssModuleReference::Global { name } => {
            generated.push(' ');
            generated.push_str(&name);
          }
          CssModuleReference::Dependency { .. } => {}
        }
      }
      (original, generated)
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use lightningcss::targets::Browsers;
  use stylepack_error::TransformError;

  use super::LightningTransformer;
  use crate::{StyleTransformer, TransformOptions};

  fn transform(
    source: &str,
    options: &TransformOptions,
  ) -> Result<crate::TransformOutput, TransformError> {
    LightningTransformer.transform(source, "/project/src/style.css", options)
  }

  #[test]
  fn prints_css() {
    let options = TransformOptions { filename: "src/style.css", ..Default::default() };
    let output = transform(".a { color: red; }", &options).unwrap();
    assert_eq!(output.code, ".a {\n  color: red;\n}\n");
    assert!(output.map.is_none());
    assert!(output.class_map.is_none());
  }

  #[test]
  fn minifies() {
    let output = transform(
      ".a { color: #ff0000; }\n.b { margin: 0px 0px; }",
      &TransformOptions { filename: "src/style.css", minify: true, ..Default::default() },
    )
    .unwrap();
    assert!(!output.code.contains('\n'));
    assert!(output.code.starts_with(".a{color:red}"));
  }

  #[test]
  fn produces_source_map() {
    let output = transform(
      ".a { color: red; }",
      &TransformOptions { filename: "src/style.css", source_map: true, ..Default::default() },
    )
    .unwrap();
    let map = output.map.unwrap();
    let sources = map.get_sources().map(|source| source.to_string()).collect::<Vec<_>>();
    assert_eq!(sources.len(), 1);
    assert!(sources[0].ends_with("style.css"));
  }

  #[test]
  fn preprocessed_source_is_left_out_of_the_map() {
    let options = |preprocessed| TransformOptions {
      filename: "src/style.scss",
      source_map: true,
      preprocessed,
      ..Default::default()
    };
    let map_json = |preprocessed| {
      let output = transform(".a { color: red; }", &options(preprocessed)).unwrap();
      serde_json::from_str::<serde_json::Value>(&output.map.unwrap().to_json_string()).unwrap()
    };

    assert_eq!(map_json(false)["sourcesContent"][0], ".a { color: red; }");
    assert_ne!(map_json(true)["sourcesContent"][0], ".a { color: red; }");
  }

  #[test]
  fn prefixes_for_targets() {
    let output = transform(
      ".a { user-select: none; }",
      &TransformOptions {
        filename: "src/style.css",
        targets: Some(Browsers { safari: Some(13 << 16), ..Browsers::default() }),
        ..Default::default()
      },
    )
    .unwrap();
    assert!(output.code.contains("-webkit-user-select: none"));

    let options = TransformOptions { filename: "src/style.css", ..Default::default() };
    let output = transform(".a { user-select: none; }", &options).unwrap();
    assert!(!output.code.contains("-webkit-"));
  }

  #[test]
  fn css_modules_export_sorted_class_map() {
    let output = transform(
      ".title { color: red; }\n.body { composes: title; }",
      &TransformOptions {
        filename: "src/style.css",
        css_modules: Some(Some("[local]_x")),
        ..Default::default()
      },
    )
    .unwrap();
    let class_map = output.class_map.unwrap();
    let entries = class_map.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect::<Vec<_>>();
    assert_eq!(entries, vec![("body", "body_x title_x"), ("title", "title_x")]);
    assert!(output.code.contains(".title_x"));
  }

  #[test]
  fn reports_location_of_syntax_errors() {
    let error = transform(
      ".a {\n  color: red;\n}\n.b > > .c { color: blue; }\n",
      &TransformOptions { filename: "src/style.css", ..Default::default() },
    )
    .unwrap_err();
    assert_eq!(error.id, "/project/src/style.css");
    assert!(error.frame.is_some());
  }
}
