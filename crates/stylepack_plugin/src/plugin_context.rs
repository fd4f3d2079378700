use std::{
  path::Path,
  sync::{Arc, Mutex, PoisonError},
};

use stylepack_common::NormalizedBundlerOptions;

/// Shared by every hook of a build.
#[derive(Debug)]
pub struct PluginContext {
  options: Arc<NormalizedBundlerOptions>,
  warnings: Mutex<Vec<anyhow::Error>>,
}

impl PluginContext {
  pub fn new(options: Arc<NormalizedBundlerOptions>) -> Self {
    Self { options, warnings: Mutex::default() }
  }

  pub fn options(&self) -> &NormalizedBundlerOptions {
    &self.options
  }

  pub fn cwd(&self) -> &Path {
    &self.options.cwd
  }

  /// Reports a problem that doesn't fail the build.
  pub fn warn(&self, warning: anyhow::Error) {
    tracing::warn!("{warning}");
    self.warnings.lock().unwrap_or_else(PoisonError::into_inner).push(warning);
  }

  pub fn take_warnings(&self) -> Vec<anyhow::Error> {
    std::mem::take(&mut *self.warnings.lock().unwrap_or_else(PoisonError::into_inner))
  }
}
