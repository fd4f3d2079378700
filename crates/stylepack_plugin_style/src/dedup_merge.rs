use std::sync::Arc;

use rustc_hash::FxHashSet;
use stylepack_common::ModuleId;
use stylepack_sourcemap::{SourceJoiner, SourceMap, SourceMapSource};
use stylepack_utils::indexmap::FxIndexMap;

use crate::{EntryContext, OutputKind, StyleResult};

/// Everything written to one stylesheet file.
#[derive(Debug)]
pub struct MergedTarget {
  /// File name template relative to the output directory.
  pub path: String,
  /// Entries contributing to the file, in entry order.
  pub entry_names: Vec<String>,
  pub results: Vec<Arc<StyleResult>>,
  seen: FxHashSet<ModuleId>,
}

impl MergedTarget {
  fn new(path: String) -> Self {
    Self { path, entry_names: vec![], results: vec![], seen: FxHashSet::default() }
  }

  /// Joins the results with a blank line, shifting their source maps accordingly.
  pub fn concat(&self) -> (String, Option<SourceMap>) {
    let mut joiner = SourceJoiner::with_separator("\n\n");
    for result in &self.results {
      let text = result.transformed_text.trim_end_matches(['\n', '\r']);
      joiner.append_source(SourceMapSource::new(text, result.source_map.as_ref()));
    }
    joiner.join()
  }
}

pub struct DedupMergeEngine;

impl DedupMergeEngine {
  /// Groups extracted entries by output path. A module reachable from several entries of the same
  /// group is kept at its first occurrence.
  pub fn merge(contexts: Vec<EntryContext>) -> Vec<MergedTarget> {
    let mut targets: FxIndexMap<String, MergedTarget> = FxIndexMap::default();

    for context in contexts {
      let (OutputKind::Extracted, Some(path)) = (context.output_kind, context.resolved_output_path)
      else {
        continue;
      };

      let target = targets.entry(path.clone()).or_insert_with(|| MergedTarget::new(path));
      target.entry_names.push(context.entry_name);
      for result in context.accumulated_results {
        if target.seen.insert(result.owner_module_id.clone()) {
          target.results.push(result);
        } else {
          tracing::trace!(module = %result.owner_module_id, file = %target.path, "deduplicated");
        }
      }
    }

    targets.into_values().collect()
  }
}
