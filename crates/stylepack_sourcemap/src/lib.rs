mod lines_count;
mod source;
mod source_joiner;

pub use crate::{
  lines_count::lines_count,
  source::{Source, SourceMapSource},
  source_joiner::SourceJoiner,
};
pub use oxc_sourcemap::{ConcatSourceMapBuilder, SourceMap};

/// `/*# sourceMappingURL=... */`, the only form of reference CSS understands.
pub fn css_source_mapping_url_comment(url: &str) -> String {
  stylepack_utils::concat_string!("/*# sourceMappingURL=", url, " */")
}

/// Embeds `map` into CSS as a base64 data URI comment.
pub fn inline_css_source_map_comment(map: &SourceMap) -> String {
  let url = stylepack_utils::concat_string!(
    "data:application/json;charset=utf-8;base64,",
    stylepack_utils::base64::to_standard_base64(map.to_json_string())
  );
  css_source_mapping_url_comment(&url)
}

#[test]
fn test_css_source_mapping_url_comment() {
  assert_eq!(css_source_mapping_url_comment("a.css.map"), "/*# sourceMappingURL=a.css.map */");
}
