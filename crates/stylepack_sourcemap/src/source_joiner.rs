use oxc_sourcemap::{ConcatSourceMapBuilder, SourceMap};

use crate::{lines_count::lines_count, source::Source};

/// Joins sources with a separator, shifting every source map by the lines written before it.
pub struct SourceJoiner<'source> {
  inner: Vec<Box<dyn Source + Send + 'source>>,
  separator: &'static str,
}

impl Default for SourceJoiner<'_> {
  fn default() -> Self {
    Self { inner: vec![], separator: "\n" }
  }
}

impl<'source> SourceJoiner<'source> {
  pub fn with_separator(separator: &'static str) -> Self {
    Self { inner: vec![], separator }
  }

  pub fn append_source<T: Source + Send + 'source>(&mut self, source: T) {
    self.inner.push(Box::new(source));
  }

  pub fn is_empty(&self) -> bool {
    self.inner.is_empty()
  }

  pub fn join(&self) -> (String, Option<SourceMap>) {
    let size_hint = self.inner.iter().map(|source| source.content().len()).sum::<usize>()
      + self.separator.len() * self.inner.len().saturating_sub(1);
    let mut ret_source = String::with_capacity(size_hint);

    let has_sourcemap = self.inner.iter().any(|source| source.sourcemap().is_some());
    let mut sourcemap_builder = has_sourcemap.then(ConcatSourceMapBuilder::default);
    let separator_lines = lines_count(self.separator);
    let mut line_offset = 0;

    for (index, source) in self.inner.iter().enumerate() {
      if index > 0 {
        ret_source.push_str(self.separator);
        line_offset += separator_lines;
      }

      if let (Some(builder), Some(sourcemap)) = (sourcemap_builder.as_mut(), source.sourcemap()) {
        builder.add_sourcemap(sourcemap, line_offset);
      }

      ret_source.push_str(source.content());
      line_offset += source.lines_count();
    }

    (ret_source, sourcemap_builder.map(ConcatSourceMapBuilder::into_sourcemap))
  }
}
