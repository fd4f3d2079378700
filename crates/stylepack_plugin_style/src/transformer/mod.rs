pub mod lightning;

use lightningcss::targets::Browsers;
use stylepack_error::TransformError;
use stylepack_sourcemap::SourceMap;

use crate::ClassMap;

#[derive(Debug, Default)]
pub struct TransformOptions<'a> {
  /// Name recorded in source maps and used for CSS module hashes.
  pub filename: &'a str,
  pub minify: bool,
  pub source_map: bool,
  /// Compile as a CSS module with this class name pattern, or the transformer's default one.
  pub css_modules: Option<Option<&'a str>>,
  /// Browsers to add vendor prefixes and syntax fallbacks for.
  pub targets: Option<Browsers>,
  /// The source is the output of an earlier loader, so it is left out of `sourcesContent`.
  pub preprocessed: bool,
}

#[derive(Debug, Default)]
pub struct TransformOutput {
  pub code: String,
  pub map: Option<SourceMap>,
  pub class_map: Option<ClassMap>,
}

/// Turns stylesheet text into plain CSS.
pub trait StyleTransformer: Send + Sync {
  fn transform(
    &self,
    source: &str,
    module_id: &str,
    options: &TransformOptions,
  ) -> Result<TransformOutput, TransformError>;
}
