use std::{
  collections::hash_map::Entry,
  path::{Path, PathBuf},
};

use futures::future::try_join_all;
use rustc_hash::FxHashMap;
use stylepack_common::Output;
use stylepack_error::{BuildResult, WriteConflict};
use stylepack_fs::{FileSystem, OsFileSystem};
use sugar_path::SugarPath;

/// Writes `assets` below `out_dir` concurrently and returns the warnings it produced.
///
/// Each path is written once. The first output claiming a path wins, a later one with different
/// bytes is reported as [`WriteConflict`].
pub async fn write_output(
  fs: OsFileSystem,
  out_dir: &Path,
  assets: &[Output],
) -> BuildResult<Vec<anyhow::Error>> {
  let mut claimed: FxHashMap<PathBuf, &[u8]> = FxHashMap::default();
  let mut warnings = vec![];
  let mut pending = vec![];

  for output in assets {
    let content = output.content_as_bytes();
    match claimed.entry(out_dir.join(output.filename()).normalize()) {
      Entry::Occupied(entry) => {
        if *entry.get() != content {
          warnings.push(WriteConflict { path: output.filename().to_string() }.into());
        }
      }
      Entry::Vacant(entry) => {
        pending.push((entry.key().clone(), content.to_vec()));
        entry.insert(content);
      }
    }
  }

  let handles = pending.into_iter().map(|(path, content)| {
    tokio::task::spawn_blocking(move || {
      tracing::debug!(path = %path.display(), size = content.len(), "writing output");
      fs.write(&path, &content)
        .map_err(|err| anyhow::anyhow!("Failed to write {}: {err}", path.display()))
    })
  });

  let results = try_join_all(handles).await.map_err(anyhow::Error::from)?;
  let errors = results.into_iter().filter_map(Result::err).collect::<Vec<_>>();
  if !errors.is_empty() {
    Err(errors)?;
  }

  Ok(warnings)
}

#[cfg(test)]
mod tests {
  use stylepack_common::{Output, OutputAsset};
  use stylepack_error::WriteConflict;
  use stylepack_fs::OsFileSystem;

  use super::write_output;

  fn asset(filename: &str, source: &str) -> Output {
    Output::Asset(Box::new(OutputAsset {
      filename: filename.to_string(),
      source: source.to_string(),
      names: vec![],
    }))
  }

  #[tokio::test]
  async fn first_writer_wins() {
    let dir = tempfile::tempdir().unwrap();
    let assets = vec![asset("a.css", "a{}"), asset("./a.css", "b{}"), asset("nested/b.css", "b{}")];

    let warnings = write_output(OsFileSystem, dir.path(), &assets).await.unwrap();

    assert_eq!(std::fs::read_to_string(dir.path().join("a.css")).unwrap(), "a{}");
    assert!(dir.path().join("nested/b.css").exists());
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].downcast_ref::<WriteConflict>().unwrap().path, "./a.css");
  }

  #[tokio::test]
  async fn identical_content_is_not_a_conflict() {
    let dir = tempfile::tempdir().unwrap();
    let assets = vec![asset("a.css", "a{}"), asset("a.css", "a{}")];
    let warnings = write_output(OsFileSystem, dir.path(), &assets).await.unwrap();
    assert!(warnings.is_empty());
  }
}
