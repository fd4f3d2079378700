use oxc_sourcemap::SourceMap;

use crate::lines_count::lines_count;

pub trait Source {
  fn content(&self) -> &str;

  fn sourcemap(&self) -> Option<&SourceMap> {
    None
  }

  fn lines_count(&self) -> u32 {
    lines_count(self.content())
  }
}

impl Source for &str {
  fn content(&self) -> &str {
    self
  }
}

impl Source for String {
  fn content(&self) -> &str {
    self
  }
}

/// Text with the map describing it. The map must be positionally consistent with `content`.
#[derive(Debug)]
pub struct SourceMapSource<'a> {
  content: &'a str,
  sourcemap: Option<&'a SourceMap>,
}

impl<'a> SourceMapSource<'a> {
  pub fn new(content: &'a str, sourcemap: Option<&'a SourceMap>) -> Self {
    Self { content, sourcemap }
  }
}

impl Source for SourceMapSource<'_> {
  fn content(&self) -> &str {
    self.content
  }

  fn sourcemap(&self) -> Option<&SourceMap> {
    self.sourcemap
  }
}
