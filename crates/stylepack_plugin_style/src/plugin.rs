use std::{borrow::Cow, fmt, sync::Arc};

use itertools::Itertools;
use stylepack_common::{ModuleId, Output, RenderedChunk};
use stylepack_error::ConfigurationError;
use stylepack_plugin::{
  HookAugmentChunkHashReturn, HookBuildEndArgs, HookGenerateBundleArgs, HookLoadArgs,
  HookLoadOutput, HookLoadReturn, HookNoopReturn, HookResolveIdArgs, HookResolveIdOutput,
  HookResolveIdReturn, HookTransformArgs, HookTransformOutput, HookTransformReturn, Plugin,
  PluginContext,
};
use stylepack_sourcemap::inline_css_source_map_comment;
use stylepack_utils::{
  rayon::{IntoParallelRefIterator, ParallelIterator},
  xxhash::xxhash_with_base,
};

use crate::{
  accumulator::EntryAccumulator,
  dedup_merge::DedupMergeEngine,
  emitter::{HashStableEmitter, PreparedTarget},
  loaders::{LoaderContext, Loaders, StyleLoader},
  module_code::{render_module_code, ModuleCode},
  options::normalized::{normalize_options, NormalizeOptionsReturn},
  output_resolver::OutputResolver,
  runtime::{STYLE_INJECT_ID, STYLE_INJECT_SOURCE},
  session::BuildSession,
  NormalizedStylePluginOptions, SourceMapOption, StylePluginOptions, StyleResult,
};

/// Transforms stylesheet modules and injects or extracts the resulting CSS.
pub struct StylePlugin {
  options: NormalizedStylePluginOptions,
  loaders: Loaders,
  session: BuildSession,
}

impl StylePlugin {
  pub fn new(options: StylePluginOptions) -> Result<Self, ConfigurationError> {
    let NormalizeOptionsReturn { options, use_loaders, loaders, transformer } =
      normalize_options(options)?;
    let style = StyleLoader::new(transformer, options.minimize, options.targets);
    let loaders = Loaders::new(style, use_loaders, loaders)?;
    Ok(Self { options, loaders, session: BuildSession::default() })
  }

  pub fn options(&self) -> &NormalizedStylePluginOptions {
    &self.options
  }

  fn is_included(&self, id: &str) -> bool {
    !id.starts_with('\0') && self.options.is_included_extension(id) && self.loaders.is_supported(id)
  }

  /// Runs the loader chain and records the result in the session.
  fn transform_style(
    &self,
    ctx: &PluginContext,
    args: &HookTransformArgs,
  ) -> anyhow::Result<Arc<StyleResult>> {
    let modules = self.options.modules_for(args.id);
    let null = serde_json::Value::Null;
    let loader_ctx = LoaderContext {
      id: args.id,
      stable_id: args.stable_id,
      cwd: ctx.cwd(),
      source_map: !matches!(self.options.source_map, SourceMapOption::Disabled),
      preprocessed: false,
      modules,
      options: &null,
    };
    let output = self.loaders.process(args.code.clone(), &loader_ctx)?;

    if let (Some(get_json), Some(class_map)) =
      (modules.and_then(|config| config.get_json.as_ref()), &output.class_map)
    {
      get_json(args.id, class_map);
    }

    tracing::debug!(id = args.stable_id, modules = modules.is_some(), "transformed stylesheet");
    Ok(self.session.insert(StyleResult {
      source_text: args.code.clone(),
      transformed_text: output.code,
      source_map: output.map,
      class_map: output.class_map,
      owner_module_id: ModuleId::new(args.id),
    }))
  }

  /// CSS that ends up in the stylesheet file of `chunk`: the chunk's own stylesheets in
  /// multi-entry mode, every stylesheet of the build otherwise.
  fn extracted_css_of(&self, chunk: &RenderedChunk) -> Option<String> {
    let styles = if self.options.multi_entry {
      self.collect_styles(&chunk.module_ids)
    } else if chunk.module_ids.iter().any(|id| self.session.get(id).is_some()) {
      self.session.sorted_results()
    } else {
      vec![]
    };
    if styles.is_empty() {
      return None;
    }
    Some(styles.iter().map(|style| style.transformed_text.trim_end()).join("\n\n"))
  }

  /// Transformed stylesheets among `module_ids`, in the same order.
  fn collect_styles(&self, module_ids: &[ModuleId]) -> Vec<Arc<StyleResult>> {
    module_ids.iter().filter_map(|id| self.session.get(id)).collect()
  }
}

impl fmt::Debug for StylePlugin {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("StylePlugin").field("options", &self.options).finish_non_exhaustive()
  }
}

impl Plugin for StylePlugin {
  fn name(&self) -> Cow<'static, str> {
    Cow::Borrowed("stylepack:style")
  }

  fn build_start(&self, _ctx: &PluginContext) -> HookNoopReturn {
    self.session.clear();
    Ok(())
  }

  fn resolve_id(&self, _ctx: &PluginContext, args: &HookResolveIdArgs) -> HookResolveIdReturn {
    Ok(
      (args.specifier == STYLE_INJECT_ID)
        .then(|| HookResolveIdOutput { id: STYLE_INJECT_ID.to_string() }),
    )
  }

  fn load(&self, _ctx: &PluginContext, args: &HookLoadArgs) -> HookLoadReturn {
    Ok((args.id == STYLE_INJECT_ID).then(|| HookLoadOutput { code: STYLE_INJECT_SOURCE.to_string() }))
  }

  fn transform(&self, ctx: &PluginContext, args: &HookTransformArgs) -> HookTransformReturn {
    if !self.is_included(args.id) {
      return Ok(None);
    }

    let style = match self.session.get(args.id) {
      Some(style) if style.source_text == *args.code => {
        tracing::trace!(id = args.stable_id, "reused transformed stylesheet");
        style
      }
      _ => self.transform_style(ctx, args)?,
    };

    // Injected CSS always carries its map with it.
    let css = match &style.source_map {
      Some(map) if !self.options.is_extract() => {
        Cow::Owned(format!("{}\n{}", style.transformed_text, inline_css_source_map_comment(map)))
      }
      _ => Cow::Borrowed(style.transformed_text.as_str()),
    };

    let code = render_module_code(
      ctx,
      &self.options,
      &ModuleCode {
        id: args.id,
        stable_id: args.stable_id,
        css: &css,
        class_map: style.class_map.as_ref(),
      },
    );

    Ok(Some(HookTransformOutput { code }))
  }

  fn augment_chunk_hash(
    &self,
    _ctx: &PluginContext,
    chunk: &RenderedChunk,
  ) -> HookAugmentChunkHashReturn {
    if !self.options.is_extract() {
      return Ok(None);
    }
    Ok(self.extracted_css_of(chunk).map(|css| xxhash_with_base(css.as_bytes(), 64)))
  }

  fn generate_bundle(
    &self,
    _ctx: &PluginContext,
    args: &mut HookGenerateBundleArgs,
  ) -> HookNoopReturn {
    if !self.options.is_extract() {
      self.session.clear();
      return Ok(());
    }

    let entry_chunks = args
      .bundle
      .iter()
      .filter_map(Output::as_chunk)
      .filter(|chunk| chunk.is_entry)
      .map(|chunk| {
        let mut accumulator = EntryAccumulator::new(chunk.name.as_str());
        for style in self.collect_styles(&chunk.module_ids) {
          accumulator.append(style);
        }
        (chunk.name.to_string(), chunk.filename.to_string(), accumulator)
      })
      .collect::<Vec<_>>();

    let Some((first_name, first_filename, _)) = entry_chunks.first() else {
      return Ok(());
    };
    let (first_name, first_filename) = (first_name.clone(), first_filename.clone());

    let mut resolver = OutputResolver::new(&self.options, args.options);
    let contexts = entry_chunks
      .into_iter()
      .filter(|(_, _, accumulator)| !accumulator.is_empty())
      .map(|(name, filename, accumulator)| {
        let derive_from = if self.options.multi_entry {
          (name.as_str(), filename.as_str())
        } else {
          (first_name.as_str(), first_filename.as_str())
        };
        let (entry_name, results) = accumulator.finish();
        resolver.resolve(entry_name, derive_from, results)
      })
      .collect::<Vec<_>>();

    let targets = DedupMergeEngine::merge(contexts);
    tracing::debug!(targets = targets.len(), modules = self.session.len(), "extracting stylesheets");
    let prepared = targets.par_iter().map(PreparedTarget::new).collect::<Vec<_>>();

    let mut emitter = HashStableEmitter::new(self.options.source_map);
    for target in prepared {
      emitter.emit(target, args.bundle);
    }

    self.session.clear();
    Ok(())
  }

  fn build_end(&self, _ctx: &PluginContext, _args: Option<&HookBuildEndArgs>) -> HookNoopReturn {
    self.session.clear();
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use std::{
    path::PathBuf,
    sync::{
      atomic::{AtomicUsize, Ordering},
      Arc,
    },
  };

  use stylepack_common::{ModuleId, NormalizedBundlerOptions, RenderedChunk};
  use stylepack_error::TransformError;
  use stylepack_plugin::{HookTransformArgs, Plugin, PluginContext};

  use super::StylePlugin;
  use crate::{
    LightningTransformer, StylePluginOptions, StyleTransformer, TransformOptions, TransformOutput,
  };

  #[derive(Default)]
  struct CountingTransformer {
    calls: AtomicUsize,
  }

  impl StyleTransformer for CountingTransformer {
    fn transform(
      &self,
      source: &str,
      module_id: &str,
      options: &TransformOptions,
    ) -> Result<TransformOutput, TransformError> {
      self.calls.fetch_add(1, Ordering::SeqCst);
      LightningTransformer.transform(source, module_id, options)
    }
  }

  fn context() -> PluginContext {
    PluginContext::new(Arc::new(NormalizedBundlerOptions {
      input: vec![],
      cwd: PathBuf::from("/project"),
      entry_filenames: "[name].js".to_string(),
      dir: "dist".to_string(),
      file: None,
    }))
  }

  fn transform(plugin: &StylePlugin, ctx: &PluginContext, id: &str, code: &str) -> String {
    let code = code.to_string();
    let stable_id = id.trim_start_matches("/project/");
    let args = HookTransformArgs { id, stable_id, code: &code };
    plugin.transform(ctx, &args).unwrap().unwrap().code
  }

  #[test]
  fn stylesheet_is_transformed_once_per_build() {
    let transformer = Arc::new(CountingTransformer::default());
    let plugin = StylePlugin::new(StylePluginOptions {
      transformer: Some(Arc::clone(&transformer) as Arc<dyn StyleTransformer>),
      ..Default::default()
    })
    .unwrap();
    let ctx = context();

    plugin.build_start(&ctx).unwrap();
    let first = transform(&plugin, &ctx, "/project/src/a.css", ".a { color: red; }");
    let second = transform(&plugin, &ctx, "/project/src/a.css", ".a { color: red; }");
    assert_eq!(first, second);
    assert_eq!(transformer.calls.load(Ordering::SeqCst), 1);

    // Changed source and a new build both transform again.
    transform(&plugin, &ctx, "/project/src/a.css", ".a { color: blue; }");
    assert_eq!(transformer.calls.load(Ordering::SeqCst), 2);
    plugin.build_start(&ctx).unwrap();
    transform(&plugin, &ctx, "/project/src/a.css", ".a { color: blue; }");
    assert_eq!(transformer.calls.load(Ordering::SeqCst), 3);
  }

  #[test]
  fn chunk_hash_covers_the_extracted_file() {
    let chunk = |ids: &[&str]| RenderedChunk {
      name: "main".into(),
      is_entry: true,
      facade_module_id: None,
      module_ids: ids.iter().map(|id| ModuleId::new(*id)).collect(),
    };
    let build = |multi_entry: bool| {
      let plugin = StylePlugin::new(StylePluginOptions {
        extract: Some(true.into()),
        multi_entry: Some(multi_entry),
        minimize: Some(true),
        ..Default::default()
      })
      .unwrap();
      let ctx = context();
      transform(&plugin, &ctx, "/project/b.css", ".b { color: red }");
      transform(&plugin, &ctx, "/project/a.css", ".a { color: red }");
      (plugin, ctx)
    };

    let (plugin, ctx) = build(true);
    let css = plugin.extracted_css_of(&chunk(&["/project/b.css"]));
    assert_eq!(css.as_deref(), Some(".b{color:red}"));
    assert!(plugin.augment_chunk_hash(&ctx, &chunk(&["/project/b.css"])).unwrap().is_some());
    assert!(plugin.augment_chunk_hash(&ctx, &chunk(&["/project/c.js"])).unwrap().is_none());

    // One file for the whole build.
    let (plugin, ctx) = build(false);
    let css = plugin.extracted_css_of(&chunk(&["/project/b.css"]));
    assert_eq!(css.as_deref(), Some(".a{color:red}\n\n.b{color:red}"));
    assert_eq!(
      plugin.augment_chunk_hash(&ctx, &chunk(&["/project/b.css"])).unwrap(),
      plugin.augment_chunk_hash(&ctx, &chunk(&["/project/a.css"])).unwrap()
    );
  }
}
