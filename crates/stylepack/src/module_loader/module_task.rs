use std::{path::Path, sync::Arc};

use stylepack_common::ModuleId;
use stylepack_ecmascript::{EcmaCompiler, ModuleScan};
use stylepack_error::{BuildError, BuildResult};
use stylepack_fs::FileSystem;
use stylepack_plugin::HookLoadArgs;

use super::{task_context::TaskContext, ModuleLoaderMsg};
use crate::{types::module_idx::ModuleIdx, utils::resolve_id::resolve_id};

pub struct ModuleTaskResult {
  pub idx: ModuleIdx,
  pub id: ModuleId,
  pub stable_id: String,
  pub code: String,
  pub scan: ModuleScan,
  /// Resolved id of each import record, in source order.
  pub resolved_deps: Vec<ModuleId>,
}

/// Loads, transforms and scans one module. Plugin hooks are synchronous, so the task runs on a
/// blocking thread.
pub struct ModuleTask {
  ctx: Arc<TaskContext>,
  idx: ModuleIdx,
  id: ModuleId,
}

impl ModuleTask {
  pub fn new(ctx: Arc<TaskContext>, idx: ModuleIdx, id: ModuleId) -> Self {
    Self { ctx, idx, id }
  }

  pub fn run(self) {
    let msg = match self.run_inner() {
      Ok(result) => ModuleLoaderMsg::ModuleDone(Box::new(result)),
      Err(errs) => ModuleLoaderMsg::BuildErrors(errs.0),
    };
    self.ctx.tx.blocking_send(msg).expect("Send should not fail");
  }

  fn run_inner(&self) -> BuildResult<ModuleTaskResult> {
    let stable_id = self.id.stabilize(&self.ctx.options.cwd);

    let source = self.load_source(&stable_id)?;
    let code = self.ctx.plugin_driver.transform(&self.id, &stable_id, source)?;
    let scan = EcmaCompiler::scan(&code, &stable_id)?;
    let resolved_deps = self.resolve_dependencies(&scan)?;

    tracing::trace!(id = %stable_id, dependencies = resolved_deps.len(), "module loaded");

    Ok(ModuleTaskResult {
      idx: self.idx,
      id: self.id.clone(),
      stable_id,
      code,
      scan,
      resolved_deps,
    })
  }

  fn load_source(&self, stable_id: &str) -> BuildResult<String> {
    if let Some(output) = self.ctx.plugin_driver.load(&HookLoadArgs { id: &self.id })? {
      return Ok(output.code);
    }

    if self.id.is_virtual() {
      Err(anyhow::anyhow!("Could not load {stable_id}: no plugin provides this module"))?;
    }

    self
      .ctx
      .fs
      .read_to_string(Path::new(&*self.id))
      .map_err(|err| BuildError::from(anyhow::anyhow!("Could not load {stable_id}: {err}")))
  }

  fn resolve_dependencies(&self, scan: &ModuleScan) -> BuildResult<Vec<ModuleId>> {
    let mut resolved = Vec::with_capacity(scan.import_records.len());
    let mut errors = vec![];

    for record in &scan.import_records {
      let importer = Some(&*self.id);
      match resolve_id(&self.ctx.plugin_driver, &self.ctx.resolver, &record.specifier, importer) {
        Ok(id) => resolved.push(id),
        Err(errs) => errors.extend(errs.0),
      }
    }

    if !errors.is_empty() {
      Err(errors)?;
    }

    Ok(resolved)
  }
}
