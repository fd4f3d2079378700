pub mod module_id;
pub mod output;
pub mod output_asset;
pub mod output_chunk;
pub mod rendered_chunk;
