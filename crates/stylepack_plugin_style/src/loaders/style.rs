use std::{path::Path, sync::Arc};

use lightningcss::targets::Browsers;

use super::{Loader, LoaderContext, LoaderResult};
use crate::{StyleTransformer, TransformOptions};

pub const STYLE_LOADER_NAME: &str = "css";

/// Last loader of every chain: hands plain CSS to the transformer.
pub struct StyleLoader {
  transformer: Arc<dyn StyleTransformer>,
  minimize: bool,
  targets: Option<Browsers>,
}

impl StyleLoader {
  pub fn new(
    transformer: Arc<dyn StyleTransformer>,
    minimize: bool,
    targets: Option<Browsers>,
  ) -> Self {
    Self { transformer, minimize, targets }
  }
}

impl Loader for StyleLoader {
  fn name(&self) -> &str {
    STYLE_LOADER_NAME
  }

  fn test(&self, id: &str) -> bool {
    matches!(Path::new(id).extension().and_then(|ext| ext.to_str()), Some("css" | "sss" | "pcss"))
  }

  fn always_process(&self) -> bool {
    true
  }

  fn process(&self, input: LoaderResult, ctx: &LoaderContext) -> anyhow::Result<LoaderResult> {
    let options = TransformOptions {
      filename: ctx.stable_id,
      minify: self.minimize,
      source_map: ctx.source_map,
      css_modules: ctx.modules.map(|config| config.pattern.as_deref()),
      targets: self.targets,
      // Maps of preprocessed input describe the intermediate CSS, not the file on disk.
      preprocessed: ctx.preprocessed,
    };
    let output = self.transformer.transform(&input.code, ctx.id, &options)?;
    Ok(LoaderResult { code: output.code, map: output.map, class_map: output.class_map })
  }
}
