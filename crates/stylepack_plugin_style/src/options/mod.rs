pub mod normalized;

use std::{fmt, sync::Arc};

use lightningcss::targets::Browsers;
use serde::Serialize;

use crate::{loaders::CustomLoader, ClassMap, StyleTransformer};

/// `fn(variable_name, module_id) -> code`, replacing the default `styleInject(...)` call.
pub type InjectFn = Arc<dyn Fn(&str, &str) -> String + Send + Sync>;
/// Maps a class name to the name of its export.
pub type NamedExportsFn = Arc<dyn Fn(&str) -> String + Send + Sync>;
/// Receives the class map of every CSS module, with the module id.
pub type GetJsonFn = Arc<dyn Fn(&str, &ClassMap) + Send + Sync>;
/// Asked once per stylesheet file; returning `false` drops it.
pub type OnExtractFn = Arc<dyn Fn(&ExtractInfo) -> bool + Send + Sync>;

#[derive(Debug)]
pub struct ExtractInfo<'a> {
  /// The entry chunk the file is named after.
  pub entry_name: &'a str,
  /// Planned file name relative to the output directory, before `[hash]` is substituted.
  pub file_name: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractOption {
  Disabled,
  /// Next to the entry chunk, named after it.
  Auto,
  /// Absolute, or relative to the output directory.
  Path(String),
}

impl From<bool> for ExtractOption {
  fn from(value: bool) -> Self {
    if value {
      Self::Auto
    } else {
      Self::Disabled
    }
  }
}

impl From<&str> for ExtractOption {
  fn from(value: &str) -> Self {
    Self::Path(value.to_string())
  }
}

impl From<String> for ExtractOption {
  fn from(value: String) -> Self {
    Self::Path(value)
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InsertAt {
  Top,
  Bottom,
}

#[derive(Clone)]
pub enum InjectOption {
  Disabled,
  Enabled { insert_at: Option<InsertAt> },
  Custom(InjectFn),
}

impl From<bool> for InjectOption {
  fn from(value: bool) -> Self {
    if value {
      Self::Enabled { insert_at: None }
    } else {
      Self::Disabled
    }
  }
}

impl fmt::Debug for InjectOption {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Disabled => f.write_str("Disabled"),
      Self::Enabled { insert_at } => f.debug_struct("Enabled").field("insert_at", insert_at).finish(),
      Self::Custom(_) => f.write_str("Custom(..)"),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceMapOption {
  Disabled,
  /// A sibling `.map` file for extracted CSS, a data URI for injected CSS.
  Enabled,
  /// Always a data URI inside the CSS.
  Inline,
}

impl From<bool> for SourceMapOption {
  fn from(value: bool) -> Self {
    if value {
      Self::Enabled
    } else {
      Self::Disabled
    }
  }
}

#[derive(Clone, Default)]
pub struct ModulesConfig {
  /// Class name pattern, e.g. `[name]_[local]_[hash]`.
  pub pattern: Option<String>,
  pub get_json: Option<GetJsonFn>,
}

impl fmt::Debug for ModulesConfig {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("ModulesConfig")
      .field("pattern", &self.pattern)
      .field("get_json", &self.get_json.is_some())
      .finish()
  }
}

#[derive(Debug, Clone)]
pub enum ModulesOption {
  Enabled(bool),
  Config(ModulesConfig),
}

impl From<bool> for ModulesOption {
  fn from(value: bool) -> Self {
    Self::Enabled(value)
  }
}

#[derive(Clone)]
pub enum NamedExportsOption {
  Disabled,
  /// Class names are turned into safe identifiers.
  Escape,
  Custom(NamedExportsFn),
}

impl From<bool> for NamedExportsOption {
  fn from(value: bool) -> Self {
    if value {
      Self::Escape
    } else {
      Self::Disabled
    }
  }
}

impl fmt::Debug for NamedExportsOption {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Disabled => f.write_str("Disabled"),
      Self::Escape => f.write_str("Escape"),
      Self::Custom(_) => f.write_str("Custom(..)"),
    }
  }
}

/// A loader selected in `use`, with its options.
#[derive(Debug, Clone)]
pub struct UseLoader {
  pub name: String,
  pub options: serde_json::Value,
}

impl UseLoader {
  pub fn new(name: impl Into<String>) -> Self {
    Self { name: name.into(), options: serde_json::Value::Null }
  }

  pub fn with_options(name: impl Into<String>, options: serde_json::Value) -> Self {
    Self { name: name.into(), options }
  }
}

impl From<&str> for UseLoader {
  fn from(name: &str) -> Self {
    Self::new(name)
  }
}

#[derive(Default)]
pub struct StylePluginOptions {
  // --- Output
  /// Defaults to `Disabled`.
  pub extract: Option<ExtractOption>,
  /// Defaults to `Enabled` without options. Ignored when extracting.
  pub inject: Option<InjectOption>,
  pub source_map: Option<SourceMapOption>,
  pub on_extract: Option<OnExtractFn>,
  /// One stylesheet per entry chunk instead of one for the whole build.
  pub multi_entry: Option<bool>,

  // --- CSS modules
  pub modules: Option<ModulesOption>,
  /// Treat `*.module.*` files as CSS modules. Defaults to `true`.
  pub auto_modules: Option<bool>,
  pub named_exports: Option<NamedExportsOption>,

  // --- Processing
  pub minimize: Option<bool>,
  /// Browsers the CSS is prefixed and lowered for. Versions are encoded as
  /// `major << 16 | minor << 8 | patch`.
  pub targets: Option<Browsers>,
  /// Defaults to `["sass"]`.
  pub use_loaders: Option<Vec<UseLoader>>,
  pub loaders: Option<Vec<CustomLoader>>,
  /// Defaults to `.css`, `.sss`, `.pcss`, `.sass` and `.scss`.
  pub include_extensions: Option<Vec<String>>,
  pub transformer: Option<Arc<dyn StyleTransformer>>,
}
