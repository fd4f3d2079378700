mod sort_modules;

use std::{ffi::OsStr, path::Path};

use arcstr::ArcStr;
use itertools::Itertools;
use rustc_hash::FxHashMap;
use stylepack_utils::{indexmap::FxIndexSet, sanitize_file_name::sanitize_file_name};

use super::scan::ScanStageOutput;
use crate::{
  types::{entry_point::EntryPoint, module_idx::ModuleIdx, IndexModules},
  utils::make_unique_name::make_unique_name,
};

/// One output chunk per entry, holding every module reachable from it.
#[derive(Debug)]
pub struct ChunkPlan {
  pub name: ArcStr,
  pub entry: ModuleIdx,
  /// Execution order: dependencies before their importers, the entry last.
  pub modules: Vec<ModuleIdx>,
}

#[derive(Debug)]
pub struct LinkStageOutput {
  pub modules: IndexModules,
  pub chunks: Vec<ChunkPlan>,
  pub warnings: Vec<anyhow::Error>,
}

#[derive(Debug)]
pub struct LinkStage {
  modules: IndexModules,
  entry_points: Vec<EntryPoint>,
  circular_dependencies: FxIndexSet<Box<[ModuleIdx]>>,
}

impl LinkStage {
  pub fn new(scan_stage_output: ScanStageOutput) -> Self {
    Self {
      modules: scan_stage_output.modules,
      entry_points: scan_stage_output.entry_points,
      circular_dependencies: FxIndexSet::default(),
    }
  }

  pub fn link(mut self) -> LinkStageOutput {
    let mut used_names = FxHashMap::default();
    let entry_points = std::mem::take(&mut self.entry_points);

    let chunks = entry_points
      .iter()
      .map(|entry| {
        let name = entry.name.clone().unwrap_or_else(|| {
          let id = &self.modules[entry.idx].id;
          Path::new(&**id)
            .file_stem()
            .and_then(OsStr::to_str)
            .map_or_else(|| "input".to_string(), sanitize_file_name)
        });
        ChunkPlan {
          name: make_unique_name(&name, &mut used_names).into(),
          entry: entry.idx,
          modules: self.sort_modules(entry.idx),
        }
      })
      .collect::<Vec<_>>();

    let warnings = self
      .circular_dependencies
      .iter()
      .map(|cycle| {
        let path = cycle.iter().map(|idx| self.modules[*idx].stable_id.as_str()).join(" -> ");
        anyhow::anyhow!("Circular dependency: {path}")
      })
      .collect();

    LinkStageOutput { modules: self.modules, chunks, warnings }
  }
}
