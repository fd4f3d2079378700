pub mod entry_context;
pub mod extraction_target;
pub mod style_result;
