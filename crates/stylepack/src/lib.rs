mod bundler;
mod module_loader;
mod stages;
mod types;
mod utils;

pub use crate::{bundler::Bundler, types::bundle_output::BundleOutput};
pub use stylepack_common::*;
pub use stylepack_error::{BuildError, BuildResult};
pub use stylepack_plugin::{Plugin, SharedPlugin};
