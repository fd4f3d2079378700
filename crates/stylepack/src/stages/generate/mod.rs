mod render_chunk;

use std::cmp::Ordering;

use stylepack_common::{
  FileNameRenderOptions, FilenameTemplate, Output, OutputChunk, RenderedChunk,
};
use stylepack_error::BuildResult;
use stylepack_plugin::SharedPluginDriver;
use stylepack_utils::xxhash::xxhash_with_base;
use xxhash_rust::xxh3::Xxh3;

use super::link::{ChunkPlan, LinkStageOutput};
use crate::types::{bundle_output::BundleOutput, SharedOptions};

pub struct GenerateStage<'a> {
  link_output: &'a mut LinkStageOutput,
  options: &'a SharedOptions,
  plugin_driver: &'a SharedPluginDriver,
}

impl<'a> GenerateStage<'a> {
  pub fn new(
    link_output: &'a mut LinkStageOutput,
    options: &'a SharedOptions,
    plugin_driver: &'a SharedPluginDriver,
  ) -> Self {
    Self { link_output, options, plugin_driver }
  }

  pub fn generate(&mut self) -> BuildResult<BundleOutput> {
    let mut assets = Vec::with_capacity(self.link_output.chunks.len());

    for chunk in &self.link_output.chunks {
      let code = render_chunk::render_chunk(&self.link_output.modules, chunk);
      let rendered_chunk = RenderedChunk {
        name: chunk.name.clone(),
        is_entry: true,
        facade_module_id: Some(self.link_output.modules[chunk.entry].id.clone()),
        module_ids: chunk
          .modules
          .iter()
          .map(|idx| self.link_output.modules[*idx].id.clone())
          .collect(),
      };
      let filename = self.chunk_filename(chunk, &code, &rendered_chunk)?;
      tracing::debug!(name = %chunk.name, %filename, modules = chunk.modules.len(), "rendered chunk");

      let RenderedChunk { name, is_entry, facade_module_id, module_ids } = rendered_chunk;
      assets.push(Output::Chunk(Box::new(OutputChunk {
        name,
        filename: filename.into(),
        code,
        is_entry,
        facade_module_id,
        module_ids,
      })));
    }

    self.plugin_driver.generate_bundle(&mut assets)?;

    // Entry chunks first, assets last.
    assets.sort_by(|a, b| match (a, b) {
      (Output::Chunk(_), Output::Asset(_)) => Ordering::Less,
      (Output::Asset(_), Output::Chunk(_)) => Ordering::Greater,
      _ => a.filename().cmp(b.filename()),
    });

    Ok(BundleOutput { assets, warnings: std::mem::take(&mut self.link_output.warnings) })
  }

  /// Notices:
  /// - Should generate filenames that are stable cross builds and os.
  fn chunk_filename(
    &self,
    chunk: &ChunkPlan,
    code: &str,
    rendered_chunk: &RenderedChunk,
  ) -> BuildResult<String> {
    if let Some(file_name) = self.options.file_name() {
      return Ok(file_name.to_string());
    }

    let template = FilenameTemplate::new(self.options.entry_filenames.clone());
    let hash = if template.has_hash_pattern() {
      let mut hasher = Xxh3::default();
      hasher.update(code.as_bytes());
      if let Some(augmented) = self.plugin_driver.augment_chunk_hash(rendered_chunk)? {
        hasher.update(augmented.as_bytes());
      }
      Some(xxhash_with_base(&hasher.digest128().to_le_bytes(), 64))
    } else {
      None
    };

    Ok(template.render(&FileNameRenderOptions {
      name: Some(chunk.name.as_str()),
      hash: hash.as_deref(),
      ext: Some("js"),
    }))
  }
}
