use stylepack_fs::OsFileSystem;
use stylepack_plugin::SharedPluginDriver;
use tokio::sync::mpsc::Sender;

use super::ModuleLoaderMsg;
use crate::types::{SharedOptions, SharedResolver};

/// Used to store common data shared between all tasks.
pub struct TaskContext {
  pub fs: OsFileSystem,
  pub options: SharedOptions,
  pub resolver: SharedResolver,
  pub plugin_driver: SharedPluginDriver,
  pub tx: Sender<ModuleLoaderMsg>,
}
