use std::{any::Any, borrow::Cow, fmt::Debug, sync::Arc};

use stylepack_common::RenderedChunk;

use crate::{
  HookBuildEndArgs, HookGenerateBundleArgs, HookLoadArgs, HookLoadOutput, HookResolveIdArgs,
  HookResolveIdOutput, HookTransformArgs, HookTransformOutput, PluginContext,
};

pub type HookNoopReturn = anyhow::Result<()>;
pub type HookResolveIdReturn = anyhow::Result<Option<HookResolveIdOutput>>;
pub type HookLoadReturn = anyhow::Result<Option<HookLoadOutput>>;
pub type HookTransformReturn = anyhow::Result<Option<HookTransformOutput>>;
pub type HookAugmentChunkHashReturn = anyhow::Result<Option<String>>;

/// Lifecycle hooks of a build. Hooks are synchronous; the bundler calls `transform` from blocking
/// worker threads, so implementations must tolerate concurrent calls for different modules.
pub trait Plugin: Any + Debug + Send + Sync + 'static {
  fn name(&self) -> Cow<'static, str>;

  fn build_start(&self, _ctx: &PluginContext) -> HookNoopReturn {
    Ok(())
  }

  fn resolve_id(&self, _ctx: &PluginContext, _args: &HookResolveIdArgs) -> HookResolveIdReturn {
    Ok(None)
  }

  fn load(&self, _ctx: &PluginContext, _args: &HookLoadArgs) -> HookLoadReturn {
    Ok(None)
  }

  /// Called once per module. The returned code replaces the module source for later plugins.
  fn transform(&self, _ctx: &PluginContext, _args: &HookTransformArgs) -> HookTransformReturn {
    Ok(None)
  }

  /// Extra input for the hash of `chunk`, on top of its rendered code.
  fn augment_chunk_hash(
    &self,
    _ctx: &PluginContext,
    _chunk: &RenderedChunk,
  ) -> HookAugmentChunkHashReturn {
    Ok(None)
  }

  /// Runs once all chunks have their final file names. Plugins may add assets to the bundle.
  fn generate_bundle(
    &self,
    _ctx: &PluginContext,
    _args: &mut HookGenerateBundleArgs,
  ) -> HookNoopReturn {
    Ok(())
  }

  fn build_end(&self, _ctx: &PluginContext, _args: Option<&HookBuildEndArgs>) -> HookNoopReturn {
    Ok(())
  }
}

pub type SharedPlugin = Arc<dyn Plugin>;
