pub mod insert_at;
pub mod source_map;
