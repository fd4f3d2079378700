mod bundler_options;
mod types;

pub use crate::{
  bundler_options::{
    filename_template::{FileNameRenderOptions, FilenameTemplate},
    input_item::InputItem,
    normalized_bundler_options::NormalizedBundlerOptions,
    BundlerOptions,
  },
  types::{
    module_id::ModuleId,
    output::Output,
    output_asset::OutputAsset,
    output_chunk::OutputChunk,
    rendered_chunk::RenderedChunk,
  },
};
