use std::sync::Arc;

use stylepack_common::BundlerOptions;
use stylepack_error::BuildResult;
use stylepack_fs::OsFileSystem;
use stylepack_plugin::{HookBuildEndArgs, PluginDriver, SharedPlugin, SharedPluginDriver};
use stylepack_resolver::Resolver;

use crate::{
  stages::{generate::GenerateStage, link::LinkStage, scan::ScanStage},
  types::{bundle_output::BundleOutput, SharedOptions, SharedResolver},
  utils::{
    normalize_options::{normalize_options, NormalizeOptionsReturn},
    validate_options::validate_options,
    write_output::write_output,
  },
};

pub struct Bundler {
  pub(crate) fs: OsFileSystem,
  pub(crate) options: SharedOptions,
  pub(crate) resolver: SharedResolver,
  pub(crate) plugin_driver: SharedPluginDriver,
}

impl Bundler {
  pub fn new(options: BundlerOptions, plugins: Vec<SharedPlugin>) -> Self {
    let NormalizeOptionsReturn { options } = normalize_options(options);
    let options = Arc::new(options);

    let resolver: SharedResolver = Resolver::new(options.cwd.clone()).into();
    let plugin_driver = PluginDriver::new_shared(plugins, Arc::clone(&options));

    Bundler { fs: OsFileSystem, options, resolver, plugin_driver }
  }

  /// Builds in memory.
  pub async fn generate(&mut self) -> BuildResult<BundleOutput> {
    self.build(false).await
  }

  /// Builds and writes every output below the output directory.
  pub async fn write(&mut self) -> BuildResult<BundleOutput> {
    self.build(true).await
  }

  pub async fn build(&mut self, is_write: bool) -> BuildResult<BundleOutput> {
    let result = self.try_build(is_write).await;

    let build_end_args =
      result.as_ref().err().map(|errors| HookBuildEndArgs { error: errors.to_string() });
    let build_end = self.plugin_driver.build_end(build_end_args.as_ref());

    let mut output = result?;
    build_end?;
    output.warnings.extend(self.plugin_driver.take_warnings());
    Ok(output)
  }

  async fn try_build(&mut self, is_write: bool) -> BuildResult<BundleOutput> {
    validate_options(&self.options)?;

    self.plugin_driver.build_start()?;

    let scan_stage_output = ScanStage::new(
      self.fs,
      Arc::clone(&self.options),
      Arc::clone(&self.resolver),
      Arc::clone(&self.plugin_driver),
    )
    .scan()
    .await?;

    let mut link_stage_output = LinkStage::new(scan_stage_output).link();

    let mut output =
      GenerateStage::new(&mut link_stage_output, &self.options, &self.plugin_driver).generate()?;

    if is_write {
      let warnings = write_output(self.fs, &self.options.out_dir(), &output.assets).await?;
      output.warnings.extend(warnings);
    }

    Ok(output)
  }
}
