use std::sync::Arc;

use stylepack_common::ModuleId;
use stylepack_error::BuildResult;
use stylepack_fs::OsFileSystem;
use stylepack_plugin::SharedPluginDriver;

use crate::{
  module_loader::{ModuleLoader, ModuleLoaderOutput},
  types::{SharedOptions, SharedResolver},
  utils::resolve_id::resolve_id,
};

pub type ScanStageOutput = ModuleLoaderOutput;

pub struct ScanStage {
  fs: OsFileSystem,
  options: SharedOptions,
  resolver: SharedResolver,
  plugin_driver: SharedPluginDriver,
}

impl ScanStage {
  pub fn new(
    fs: OsFileSystem,
    options: SharedOptions,
    resolver: SharedResolver,
    plugin_driver: SharedPluginDriver,
  ) -> Self {
    Self { fs, options, resolver, plugin_driver }
  }

  pub async fn scan(&mut self) -> BuildResult<ScanStageOutput> {
    if self.options.input.is_empty() {
      Err(vec![anyhow::anyhow!("You must supply options.input to stylepack")])?;
    }

    let user_entries = self.resolve_user_defined_entries()?;

    let module_loader = ModuleLoader::new(
      self.fs,
      Arc::clone(&self.options),
      Arc::clone(&self.resolver),
      Arc::clone(&self.plugin_driver),
    );
    let output = module_loader.fetch_all_modules(user_entries).await?;

    Ok(output)
  }

  fn resolve_user_defined_entries(&self) -> BuildResult<Vec<(Option<String>, ModuleId)>> {
    let mut ret = Vec::with_capacity(self.options.input.len());
    let mut errors = vec![];

    for input_item in &self.options.input {
      match resolve_id(&self.plugin_driver, &self.resolver, &input_item.import, None) {
        Ok(id) => ret.push((input_item.name.clone(), id)),
        Err(errs) => errors.extend(errs.0),
      }
    }

    if !errors.is_empty() {
      Err(errors)?;
    }

    Ok(ret)
  }
}
