use std::path::{Path, PathBuf};

use oxc_resolver::{ResolveError, ResolveOptions, Resolver as OxcResolver};
use sugar_path::SugarPath;

use stylepack_common::ModuleId;

/// Extensions tried for extension-less specifiers, scripts first.
const EXTENSIONS: [&str; 8] = [".js", ".mjs", ".ts", ".css", ".scss", ".sass", ".pcss", ".sss"];

#[derive(Debug)]
pub struct Resolver {
  cwd: PathBuf,
  inner: OxcResolver,
}

impl Resolver {
  pub fn new(cwd: PathBuf) -> Self {
    let options = ResolveOptions {
      extensions: EXTENSIONS.iter().map(ToString::to_string).collect(),
      // Stylesheet packages usually point at their CSS through `style`.
      main_fields: vec!["style".to_string(), "module".to_string(), "main".to_string()],
      condition_names: vec!["style".to_string(), "import".to_string(), "default".to_string()],
      ..ResolveOptions::default()
    };
    Self { cwd, inner: OxcResolver::new(options) }
  }

  pub fn cwd(&self) -> &Path {
    &self.cwd
  }

  /// Resolves `specifier` relative to the directory of `importer`, or to `cwd` for entries.
  pub fn resolve(&self, specifier: &str, importer: Option<&str>) -> Result<ModuleId, ResolveError> {
    let dir = importer
      .map(Path::new)
      .and_then(Path::parent)
      .map_or_else(|| self.cwd.clone(), Path::to_path_buf);

    self
      .inner
      .resolve(&dir, specifier)
      .map(|resolution| ModuleId::new(resolution.full_path().normalize().to_string_lossy().as_ref()))
  }
}

#[cfg(test)]
mod tests {
  use super::Resolver;

  #[test]
  fn resolves_relative_to_importer() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("src")).unwrap();
    std::fs::write(dir.path().join("src/index.js"), "import './style.css'").unwrap();
    std::fs::write(dir.path().join("src/style.css"), "a {}").unwrap();

    let resolver = Resolver::new(dir.path().to_path_buf());
    let entry = resolver.resolve("./src/index.js", None).unwrap();
    assert!(entry.ends_with("index.js"));

    let style = resolver.resolve("./style", Some(entry.as_ref())).unwrap();
    assert!(style.ends_with("style.css"));
    assert!(resolver.resolve("./missing.css", Some(entry.as_ref())).is_err());
  }
}
