#![allow(dead_code)]

use std::{
  fs,
  path::{Path, PathBuf},
  sync::Arc,
};

use stylepack::{BuildResult, BundleOutput, Bundler, BundlerOptions, Output};
use stylepack_plugin_style::{StylePlugin, StylePluginOptions};
use tempfile::TempDir;

/// A temporary project directory used as `cwd` of a build.
pub struct Fixture {
  dir: TempDir,
}

impl Fixture {
  pub fn new(files: &[(&str, &str)]) -> Self {
    let dir = tempfile::tempdir().unwrap();
    for (path, content) in files {
      let path = dir.path().join(path);
      fs::create_dir_all(path.parent().unwrap()).unwrap();
      fs::write(path, content).unwrap();
    }
    Self { dir }
  }

  pub fn path(&self) -> &Path {
    self.dir.path()
  }

  pub fn dist(&self) -> PathBuf {
    self.dir.path().join("dist")
  }

  pub fn read(&self, path: &str) -> String {
    fs::read_to_string(self.dir.path().join(path)).unwrap()
  }

  pub fn exists(&self, path: &str) -> bool {
    self.dir.path().join(path).exists()
  }

  pub async fn write(
    &self,
    input: &[&str],
    plugin_options: StylePluginOptions,
  ) -> BuildResult<BundleOutput> {
    self
      .write_with(
        BundlerOptions {
          input: Some(input.iter().map(|input| (*input).into()).collect()),
          ..Default::default()
        },
        plugin_options,
      )
      .await
  }

  pub async fn write_with(
    &self,
    options: BundlerOptions,
    plugin_options: StylePluginOptions,
  ) -> BuildResult<BundleOutput> {
    let plugin = StylePlugin::new(plugin_options).unwrap();
    let mut bundler = Bundler::new(
      BundlerOptions { cwd: Some(self.path().to_path_buf()), ..options },
      vec![Arc::new(plugin)],
    );
    bundler.write().await
  }

  /// Every `.css` file written below `dist`, relative to it.
  pub fn css_files(&self) -> Vec<String> {
    fn walk(dir: &Path, root: &Path, found: &mut Vec<String>) {
      let Ok(entries) = fs::read_dir(dir) else {
        return;
      };
      for entry in entries {
        let path = entry.unwrap().path();
        if path.is_dir() {
          walk(&path, root, found);
        } else if path.extension().is_some_and(|ext| ext == "css") {
          found.push(path.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"));
        }
      }
    }

    let mut found = vec![];
    walk(&self.dist(), &self.dist(), &mut found);
    found.sort();
    found
  }
}

pub fn first_chunk_code(output: &BundleOutput) -> &str {
  output.assets.iter().find_map(Output::as_chunk).map(|chunk| chunk.code.as_str()).unwrap()
}

pub fn asset_names(output: &BundleOutput) -> Vec<&str> {
  output.assets.iter().filter_map(Output::as_asset).map(|asset| asset.filename.as_str()).collect()
}
