mod module_task;
pub mod task_context;

use std::{collections::hash_map::Entry, sync::Arc};

use module_task::{ModuleTask, ModuleTaskResult};
use oxc_index::IndexVec;
use rustc_hash::FxHashMap;
use stylepack_common::ModuleId;
use stylepack_error::BuildResult;
use stylepack_fs::OsFileSystem;
use stylepack_plugin::SharedPluginDriver;
use task_context::TaskContext;
use tokio::sync::mpsc::Receiver;

use crate::types::{
  entry_point::EntryPoint, module::Module, module_idx::ModuleIdx, IndexModules, SharedOptions,
  SharedResolver,
};

pub enum ModuleLoaderMsg {
  ModuleDone(Box<ModuleTaskResult>),
  BuildErrors(Vec<anyhow::Error>),
}

pub struct ModuleLoader {
  rx: Receiver<ModuleLoaderMsg>,
  remaining: u32,
  shared_context: Arc<TaskContext>,
  modules: IndexVec<ModuleIdx, Option<Module>>,
  visited: FxHashMap<ModuleId, ModuleIdx>,
}

pub struct ModuleLoaderOutput {
  /// Indexed in the order modules were discovered.
  pub modules: IndexModules,
  pub entry_points: Vec<EntryPoint>,
}

impl ModuleLoader {
  pub fn new(
    fs: OsFileSystem,
    options: SharedOptions,
    resolver: SharedResolver,
    plugin_driver: SharedPluginDriver,
  ) -> Self {
    // 1024 should be enough for most cases
    // over 1024 pending tasks are insane
    let (tx, rx) = tokio::sync::mpsc::channel(1024);

    let shared_context = Arc::new(TaskContext { fs, options, resolver, plugin_driver, tx });

    Self {
      rx,
      remaining: 0,
      shared_context,
      modules: IndexVec::new(),
      visited: FxHashMap::default(),
    }
  }

  fn try_spawn_new_task(&mut self, id: ModuleId) -> ModuleIdx {
    match self.visited.entry(id) {
      Entry::Occupied(visited) => *visited.get(),
      Entry::Vacant(not_visited) => {
        let idx = self.modules.push(None);
        let task = ModuleTask::new(Arc::clone(&self.shared_context), idx, not_visited.key().clone());
        not_visited.insert(idx);
        self.remaining += 1;
        tokio::task::spawn_blocking(move || task.run());
        idx
      }
    }
  }

  pub async fn fetch_all_modules(
    mut self,
    user_defined_entries: Vec<(Option<String>, ModuleId)>,
  ) -> BuildResult<ModuleLoaderOutput> {
    let entry_points = user_defined_entries
      .into_iter()
      .map(|(name, id)| EntryPoint { name, idx: self.try_spawn_new_task(id) })
      .collect::<Vec<_>>();

    let mut errors = vec![];

    while self.remaining > 0 {
      let Some(msg) = self.rx.recv().await else {
        break;
      };
      match msg {
        ModuleLoaderMsg::ModuleDone(result) => {
          let ModuleTaskResult { idx, id, stable_id, code, scan, resolved_deps } = *result;
          let dependencies =
            resolved_deps.into_iter().map(|dep| self.try_spawn_new_task(dep)).collect();
          self.modules[idx] = Some(Module { idx, id, stable_id, code, scan, dependencies });
        }
        ModuleLoaderMsg::BuildErrors(errs) => {
          errors.extend(errs);
        }
      }
      self.remaining -= 1;
    }

    if !errors.is_empty() {
      Err(errors)?;
    }

    let modules = self
      .modules
      .into_iter()
      .collect::<Option<Vec<_>>>()
      .ok_or_else(|| anyhow::anyhow!("Some modules never finished loading"))?;

    tracing::debug!(modules = modules.len(), entries = entry_points.len(), "scanned module graph");

    Ok(ModuleLoaderOutput { modules: IndexVec::from_vec(modules), entry_points })
  }
}
