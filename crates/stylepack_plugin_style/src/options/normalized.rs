use std::{fmt, path::Path, sync::Arc};

use lightningcss::targets::Browsers;
use stylepack_error::ConfigurationError;

use crate::{
  loaders::CustomLoader, ExtractOption, InjectOption, LightningTransformer, ModulesConfig,
  ModulesOption, NamedExportsOption, OnExtractFn, SourceMapOption, StylePluginOptions,
  StyleTransformer, UseLoader,
};

const DEFAULT_INCLUDE_EXTENSIONS: [&str; 5] = [".css", ".sss", ".pcss", ".sass", ".scss"];

static AUTO_MODULES: ModulesConfig = ModulesConfig { pattern: None, get_json: None };

pub struct NormalizedStylePluginOptions {
  pub extract: ExtractOption,
  pub inject: InjectOption,
  pub source_map: SourceMapOption,
  pub on_extract: Option<OnExtractFn>,
  pub multi_entry: bool,
  pub modules: Option<ModulesConfig>,
  pub auto_modules: bool,
  pub named_exports: NamedExportsOption,
  pub minimize: bool,
  pub targets: Option<Browsers>,
  /// Lowercase, with the leading dot.
  pub include_extensions: Vec<String>,
}

impl fmt::Debug for NormalizedStylePluginOptions {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("NormalizedStylePluginOptions")
      .field("extract", &self.extract)
      .field("inject", &self.inject)
      .field("source_map", &self.source_map)
      .field("on_extract", &self.on_extract.is_some())
      .field("multi_entry", &self.multi_entry)
      .field("modules", &self.modules)
      .field("auto_modules", &self.auto_modules)
      .field("named_exports", &self.named_exports)
      .field("minimize", &self.minimize)
      .field("targets", &self.targets)
      .field("include_extensions", &self.include_extensions)
      .finish()
  }
}

impl NormalizedStylePluginOptions {
  pub fn is_extract(&self) -> bool {
    !matches!(self.extract, ExtractOption::Disabled)
  }

  /// CSS modules config for `id`, if it should be compiled as a CSS module.
  pub fn modules_for(&self, id: &str) -> Option<&ModulesConfig> {
    self.modules.as_ref().or_else(|| (self.auto_modules && is_auto_module(id)).then_some(&AUTO_MODULES))
  }

  pub fn is_included_extension(&self, id: &str) -> bool {
    Path::new(id).extension().and_then(|ext| ext.to_str()).is_some_and(|ext| {
      let ext = ext.to_ascii_lowercase();
      self.include_extensions.iter().any(|included| included[1..] == ext)
    })
  }
}

fn is_auto_module(id: &str) -> bool {
  Path::new(id)
    .file_stem()
    .and_then(|stem| stem.to_str())
    .is_some_and(|stem| stem.ends_with(".module"))
}

pub struct NormalizeOptionsReturn {
  pub options: NormalizedStylePluginOptions,
  pub use_loaders: Vec<UseLoader>,
  pub loaders: Vec<CustomLoader>,
  pub transformer: Arc<dyn StyleTransformer>,
}

pub fn normalize_options(
  raw_options: StylePluginOptions,
) -> Result<NormalizeOptionsReturn, ConfigurationError> {
  let extract = raw_options.extract.unwrap_or(ExtractOption::Disabled);
  if matches!(&extract, ExtractOption::Path(path) if path.trim().is_empty()) {
    return Err(ConfigurationError::EmptyExtractPath);
  }

  let modules = match raw_options.modules {
    Some(ModulesOption::Enabled(true)) => Some(ModulesConfig::default()),
    Some(ModulesOption::Config(config)) => Some(config),
    Some(ModulesOption::Enabled(false)) | None => None,
  };

  let include_extensions = raw_options.include_extensions.map_or_else(
    || DEFAULT_INCLUDE_EXTENSIONS.iter().map(ToString::to_string).collect(),
    |extensions| {
      extensions
        .into_iter()
        .map(|ext| {
          let ext = ext.to_ascii_lowercase();
          if ext.starts_with('.') {
            ext
          } else {
            format!(".{ext}")
          }
        })
        .collect()
    },
  );

  let options = NormalizedStylePluginOptions {
    extract,
    inject: raw_options.inject.unwrap_or(InjectOption::Enabled { insert_at: None }),
    source_map: raw_options.source_map.unwrap_or(SourceMapOption::Disabled),
    on_extract: raw_options.on_extract,
    multi_entry: raw_options.multi_entry.unwrap_or(false),
    modules,
    auto_modules: raw_options.auto_modules.unwrap_or(true),
    named_exports: raw_options.named_exports.unwrap_or(NamedExportsOption::Disabled),
    minimize: raw_options.minimize.unwrap_or(false),
    targets: raw_options.targets,
    include_extensions,
  };

  Ok(NormalizeOptionsReturn {
    options,
    use_loaders: raw_options.use_loaders.unwrap_or_else(|| vec![UseLoader::new("sass")]),
    loaders: raw_options.loaders.unwrap_or_default(),
    transformer: raw_options.transformer.unwrap_or_else(|| Arc::new(LightningTransformer)),
  })
}
