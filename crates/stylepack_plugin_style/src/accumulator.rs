use std::sync::Arc;

use crate::StyleResult;

/// Stylesheets reached from one entry chunk, in module execution order.
#[derive(Debug)]
pub struct EntryAccumulator {
  entry_name: String,
  results: Vec<Arc<StyleResult>>,
}

impl EntryAccumulator {
  pub fn new(entry_name: impl Into<String>) -> Self {
    Self { entry_name: entry_name.into(), results: vec![] }
  }

  pub fn append(&mut self, result: Arc<StyleResult>) {
    self.results.push(result);
  }

  pub fn is_empty(&self) -> bool {
    self.results.is_empty()
  }

  pub fn finish(self) -> (String, Vec<Arc<StyleResult>>) {
    (self.entry_name, self.results)
  }
}
