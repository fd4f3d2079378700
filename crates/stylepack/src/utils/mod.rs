pub mod make_unique_name;
pub mod normalize_options;
pub mod resolve_id;
pub mod validate_options;
pub mod write_output;
