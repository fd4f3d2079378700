use std::sync::Arc;

use dashmap::DashMap;
use itertools::Itertools;
use stylepack_common::ModuleId;

use crate::StyleResult;

/// Transform results of the running build, keyed by module id.
#[derive(Debug, Default)]
pub struct BuildSession {
  results: DashMap<ModuleId, Arc<StyleResult>>,
}

impl BuildSession {
  pub fn insert(&self, result: StyleResult) -> Arc<StyleResult> {
    let result = Arc::new(result);
    self.results.insert(result.owner_module_id.clone(), Arc::clone(&result));
    result
  }

  pub fn get(&self, id: &str) -> Option<Arc<StyleResult>> {
    self.results.get(id).map(|result| Arc::clone(result.value()))
  }

  /// Every result of the build, ordered by module id.
  pub fn sorted_results(&self) -> Vec<Arc<StyleResult>> {
    self
      .results
      .iter()
      .map(|entry| Arc::clone(entry.value()))
      .sorted_by(|a, b| a.owner_module_id.cmp(&b.owner_module_id))
      .collect()
  }

  pub fn len(&self) -> usize {
    self.results.len()
  }

  pub fn is_empty(&self) -> bool {
    self.results.is_empty()
  }

  pub fn clear(&self) {
    self.results.clear();
  }
}

#[cfg(test)]
mod tests {
  use stylepack_common::ModuleId;

  use super::BuildSession;
  use crate::StyleResult;

  fn result(id: &str) -> StyleResult {
    StyleResult {
      source_text: String::new(),
      transformed_text: format!("/* {id} */"),
      source_map: None,
      class_map: None,
      owner_module_id: ModuleId::new(id),
    }
  }

  #[test]
  fn results_are_sorted_by_module_id() {
    let session = BuildSession::default();
    session.insert(result("/b.css"));
    session.insert(result("/a.css"));
    let ids =
      session.sorted_results().iter().map(|style| style.owner_module_id.to_string()).collect::<Vec<_>>();
    assert_eq!(ids, vec!["/a.css", "/b.css"]);

    session.clear();
    assert!(session.is_empty());
  }
}
