use std::path::Path;

use stylepack_common::{BundlerOptions, NormalizedBundlerOptions};

pub struct NormalizeOptionsReturn {
  pub options: NormalizedBundlerOptions,
}

pub fn normalize_options(raw_options: BundlerOptions) -> NormalizeOptionsReturn {
  let dir = raw_options.file.as_ref().map_or(
    raw_options.dir.unwrap_or_else(|| "dist".to_string()),
    |file| {
      Path::new(file.as_str())
        .parent()
        .map(|parent| parent.to_string_lossy().to_string())
        .unwrap_or_default()
    },
  );

  let normalized = NormalizedBundlerOptions {
    input: raw_options.input.unwrap_or_default(),
    cwd: raw_options
      .cwd
      .unwrap_or_else(|| std::env::current_dir().expect("Failed to get current dir")),
    entry_filenames: raw_options.entry_filenames.unwrap_or_else(|| "[name].js".to_string()),
    dir,
    file: raw_options.file,
  };

  NormalizeOptionsReturn { options: normalized }
}

#[test]
fn test_file_decides_dir() {
  let NormalizeOptionsReturn { options } = normalize_options(BundlerOptions {
    cwd: Some("/project".into()),
    file: Some("build/bundle.js".to_string()),
    dir: Some("ignored".to_string()),
    ..Default::default()
  });
  assert_eq!(options.dir, "build");
  assert_eq!(options.entry_filenames, "[name].js");

  let NormalizeOptionsReturn { options } =
    normalize_options(BundlerOptions { cwd: Some("/project".into()), ..Default::default() });
  assert_eq!(options.dir, "dist");
  assert!(options.file.is_none());
}
