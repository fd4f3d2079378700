use std::sync::Arc;

use stylepack_common::{NormalizedBundlerOptions, Output, RenderedChunk};
use stylepack_error::BuildResult;

use crate::{
  HookBuildEndArgs, HookGenerateBundleArgs, HookLoadArgs, HookLoadOutput, HookResolveIdArgs,
  HookResolveIdOutput, HookTransformArgs, PluginContext, SharedPlugin,
};

pub type SharedPluginDriver = Arc<PluginDriver>;

/// Runs hooks of all plugins in registration order.
#[derive(Debug)]
pub struct PluginDriver {
  plugins: Vec<SharedPlugin>,
  ctx: PluginContext,
}

impl PluginDriver {
  pub fn new_shared(
    plugins: Vec<SharedPlugin>,
    options: Arc<NormalizedBundlerOptions>,
  ) -> SharedPluginDriver {
    Arc::new(Self { plugins, ctx: PluginContext::new(options) })
  }

  pub fn context(&self) -> &PluginContext {
    &self.ctx
  }

  pub fn build_start(&self) -> BuildResult<()> {
    for plugin in &self.plugins {
      plugin.build_start(&self.ctx)?;
    }
    Ok(())
  }

  /// First plugin returning an id wins.
  pub fn resolve_id(&self, args: &HookResolveIdArgs) -> BuildResult<Option<HookResolveIdOutput>> {
    for plugin in &self.plugins {
      if let Some(output) = plugin.resolve_id(&self.ctx, args)? {
        return Ok(Some(output));
      }
    }
    Ok(None)
  }

  /// First plugin returning code wins.
  pub fn load(&self, args: &HookLoadArgs) -> BuildResult<Option<HookLoadOutput>> {
    for plugin in &self.plugins {
      if let Some(output) = plugin.load(&self.ctx, args)? {
        return Ok(Some(output));
      }
    }
    Ok(None)
  }

  /// Threads the code through every plugin's `transform`.
  pub fn transform(&self, id: &str, stable_id: &str, code: String) -> BuildResult<String> {
    let mut code = code;
    for plugin in &self.plugins {
      let args = HookTransformArgs { id, stable_id, code: &code };
      if let Some(output) = plugin.transform(&self.ctx, &args)? {
        tracing::trace!(plugin = %plugin.name(), id, "transformed");
        code = output.code;
      }
    }
    Ok(code)
  }

  pub fn augment_chunk_hash(&self, chunk: &RenderedChunk) -> BuildResult<Option<String>> {
    let mut augmented: Option<String> = None;
    for plugin in &self.plugins {
      if let Some(hash) = plugin.augment_chunk_hash(&self.ctx, chunk)? {
        augmented.get_or_insert_with(String::new).push_str(&hash);
      }
    }
    Ok(augmented)
  }

  pub fn generate_bundle(&self, bundle: &mut Vec<Output>) -> BuildResult<()> {
    let mut args = HookGenerateBundleArgs { options: self.ctx.options(), bundle };
    for plugin in &self.plugins {
      plugin.generate_bundle(&self.ctx, &mut args)?;
    }
    Ok(())
  }

  pub fn build_end(&self, args: Option<&HookBuildEndArgs>) -> BuildResult<()> {
    for plugin in &self.plugins {
      plugin.build_end(&self.ctx, args)?;
    }
    Ok(())
  }

  pub fn take_warnings(&self) -> Vec<anyhow::Error> {
    self.ctx.take_warnings()
  }
}
