mod custom;
mod sass;
mod style;

use std::{path::Path, sync::Arc};

use stylepack_error::ConfigurationError;
use stylepack_sourcemap::SourceMap;

use crate::{ClassMap, ModulesConfig, UseLoader};

pub use self::{
  custom::{CustomLoader, ProcessFn},
  sass::SassLoader,
  style::{StyleLoader, STYLE_LOADER_NAME},
};

/// Code flowing through the loader chain.
#[derive(Debug, Default)]
pub struct LoaderResult {
  pub code: String,
  pub map: Option<SourceMap>,
  pub class_map: Option<ClassMap>,
}

#[derive(Debug)]
pub struct LoaderContext<'a> {
  pub id: &'a str,
  /// `id` relative to `cwd`.
  pub stable_id: &'a str,
  pub cwd: &'a Path,
  pub source_map: bool,
  /// Set once an earlier loader of the chain produced the code.
  pub preprocessed: bool,
  /// Set when the module is compiled as a CSS module.
  pub modules: Option<&'a ModulesConfig>,
  /// Options given to this loader in `use`, `null` otherwise.
  pub options: &'a serde_json::Value,
}

pub trait Loader: Send + Sync {
  fn name(&self) -> &str;

  fn test(&self, id: &str) -> bool;

  /// Run even when `test` doesn't match.
  fn always_process(&self) -> bool {
    false
  }

  fn process(&self, input: LoaderResult, ctx: &LoaderContext) -> anyhow::Result<LoaderResult>;
}

/// Registered loaders and the chain selected by `use`.
pub struct Loaders {
  registered: Vec<Arc<dyn Loader>>,
  /// `[style, ...use]` with the options of each entry.
  chain: Vec<(Arc<dyn Loader>, serde_json::Value)>,
}

impl Loaders {
  pub fn new(
    style: StyleLoader,
    use_loaders: Vec<UseLoader>,
    custom_loaders: Vec<CustomLoader>,
  ) -> Result<Self, ConfigurationError> {
    let style: Arc<dyn Loader> = Arc::new(style);
    let mut registered = vec![Arc::clone(&style)];

    let sass_options = use_loaders.iter().find(|loader| loader.name == sass::SASS_LOADER_NAME);
    let sass = match sass_options {
      Some(UseLoader { options, .. }) => SassLoader::from_options(options)?,
      None => SassLoader::default(),
    };
    registered.push(Arc::new(sass));

    for loader in custom_loaders {
      if registered.iter().any(|registered| registered.name() == loader.name) {
        return Err(ConfigurationError::DuplicateLoader(loader.name));
      }
      registered.push(Arc::new(loader));
    }

    let mut chain = vec![(style, serde_json::Value::Null)];
    for UseLoader { name, options } in use_loaders {
      if name == STYLE_LOADER_NAME {
        return Err(ConfigurationError::Invalid(format!(
          "\"{STYLE_LOADER_NAME}\" always runs last and can't be listed in `use`"
        )));
      }
      let Some(loader) = registered.iter().find(|loader| loader.name() == name) else {
        return Err(ConfigurationError::UnknownLoader(name));
      };
      chain.push((Arc::clone(loader), options));
    }

    Ok(Self { registered, chain })
  }

  /// Whether any registered loader understands `id`.
  pub fn is_supported(&self, id: &str) -> bool {
    self.registered.iter().any(|loader| loader.test(id))
  }

  /// Runs the chain from the last `use` entry to the style loader.
  pub fn process(&self, code: String, ctx: &LoaderContext) -> anyhow::Result<LoaderResult> {
    let mut result = LoaderResult { code, ..LoaderResult::default() };
    let mut preprocessed = false;
    for (loader, options) in self.chain.iter().rev() {
      if !loader.always_process() && !loader.test(ctx.id) {
        continue;
      }
      tracing::trace!(loader = loader.name(), id = ctx.id, preprocessed, "process");
      let ctx = LoaderContext { options, preprocessed, ..*ctx };
      result = loader.process(result, &ctx)?;
      preprocessed = true;
    }
    Ok(result)
  }
}

#[cfg(test)]
mod tests {
  use std::{
    path::Path,
    sync::{Arc, Mutex},
  };

  use regex::Regex;
  use stylepack_error::{ConfigurationError, TransformError};

  use super::{CustomLoader, LoaderContext, LoaderResult, Loaders, StyleLoader};
  use crate::{LightningTransformer, StyleTransformer, TransformOptions, TransformOutput, UseLoader};

  fn style(minimize: bool) -> StyleLoader {
    StyleLoader::new(Arc::new(LightningTransformer), minimize, None)
  }

  fn banner_loader() -> CustomLoader {
    CustomLoader::new(
      "banner",
      Regex::new(r"\.banner$").unwrap(),
      Arc::new(|input: LoaderResult, _: &LoaderContext| {
        Ok(LoaderResult { code: format!(".banner {{ margin: 0 }}\n{}", input.code), ..input })
      }),
    )
  }

  fn ctx<'a>(id: &'a str, options: &'a serde_json::Value) -> LoaderContext<'a> {
    LoaderContext {
      id,
      stable_id: id,
      cwd: Path::new("/"),
      source_map: false,
      preprocessed: false,
      modules: None,
      options,
    }
  }

  #[test]
  fn unknown_loader_is_a_configuration_error() {
    let err = Loaders::new(style(false), vec!["stylus".into()], vec![]).err().unwrap();
    assert!(matches!(err, ConfigurationError::UnknownLoader(name) if name == "stylus"));
  }

  #[test]
  fn invalid_sass_options_are_a_configuration_error() {
    let err = Loaders::new(
      style(false),
      vec![UseLoader::with_options("sass", serde_json::json!({ "data": 1 }))],
      vec![],
    )
    .err()
    .unwrap();
    assert!(matches!(err, ConfigurationError::InvalidLoaderOptions { .. }));
  }

  #[test]
  fn custom_loader_runs_before_style_loader_on_matching_files() {
    let loaders = Loaders::new(style(true), vec!["banner".into()], vec![banner_loader()]).unwrap();
    assert!(loaders.is_supported("/a.banner"));
    assert!(loaders.is_supported("/a.css"));
    assert!(!loaders.is_supported("/a.js"));

    let null = serde_json::Value::Null;
    let result = loaders.process(".a { color: red }".to_string(), &ctx("/a.banner", &null)).unwrap();
    assert_eq!(result.code, ".banner{margin:0}.a{color:red}");

    let result = loaders.process(".a { color: red }".to_string(), &ctx("/a.css", &null)).unwrap();
    assert_eq!(result.code, ".a{color:red}");
  }

  #[test]
  fn duplicate_loader_names_are_rejected() {
    let err =
      Loaders::new(style(false), vec![], vec![banner_loader(), banner_loader()]).err().unwrap();
    assert!(matches!(err, ConfigurationError::DuplicateLoader(_)));
  }

  #[derive(Default)]
  struct RecordingTransformer {
    preprocessed: Mutex<Vec<bool>>,
  }

  impl StyleTransformer for RecordingTransformer {
    fn transform(
      &self,
      source: &str,
      _module_id: &str,
      options: &TransformOptions,
    ) -> Result<TransformOutput, TransformError> {
      self.preprocessed.lock().unwrap().push(options.preprocessed);
      Ok(TransformOutput { code: source.to_string(), ..Default::default() })
    }
  }

  #[test]
  fn style_loader_knows_when_input_was_preprocessed() {
    let transformer = Arc::new(RecordingTransformer::default());
    let style = StyleLoader::new(Arc::clone(&transformer) as Arc<dyn StyleTransformer>, false, None);
    let loaders = Loaders::new(style, vec!["banner".into()], vec![banner_loader()]).unwrap();

    let null = serde_json::Value::Null;
    loaders.process(".a {}".to_string(), &ctx("/a.css", &null)).unwrap();
    loaders.process(".a {}".to_string(), &ctx("/a.banner", &null)).unwrap();
    assert_eq!(*transformer.preprocessed.lock().unwrap(), vec![false, true]);
  }
}
