use std::{path::Path, sync::Arc};

use rustc_hash::FxHashMap;
use stylepack_common::NormalizedBundlerOptions;
use stylepack_utils::path_ext::PathExt;
use sugar_path::SugarPath;

use crate::{
  EntryContext, ExtractInfo, ExtractOption, NormalizedStylePluginOptions, OutputKind, StyleResult,
};

/// Decides per entry whether its stylesheets are injected, extracted or dropped, and where
/// extracted ones go.
pub struct OutputResolver<'a> {
  options: &'a NormalizedStylePluginOptions,
  bundler_options: &'a NormalizedBundlerOptions,
  /// `on_extract` answers, asked once per target path.
  extract_decisions: FxHashMap<String, bool>,
}

impl<'a> OutputResolver<'a> {
  pub fn new(
    options: &'a NormalizedStylePluginOptions,
    bundler_options: &'a NormalizedBundlerOptions,
  ) -> Self {
    Self { options, bundler_options, extract_decisions: FxHashMap::default() }
  }

  /// `derive_from` is the name and file name of the chunk the output path is named after: the
  /// entry's own chunk in multi-entry mode, the first entry chunk otherwise. Entries sharing a
  /// target share the `on_extract` answer given for the first of them.
  pub fn resolve(
    &mut self,
    entry_name: String,
    derive_from: (&str, &str),
    accumulated_results: Vec<Arc<StyleResult>>,
  ) -> EntryContext {
    let (chunk_name, chunk_filename) = derive_from;
    let Some(path) = self.output_path(chunk_filename).map(|path| path.replace("[name]", chunk_name))
    else {
      return EntryContext {
        entry_name,
        output_kind: OutputKind::Injected,
        accumulated_results,
        resolved_output_path: None,
      };
    };

    if !self.allows_extract(chunk_name, &path) {
      tracing::debug!(entry = %entry_name, file = %path, "extraction vetoed by on_extract");
      return EntryContext {
        entry_name,
        output_kind: OutputKind::Dropped,
        accumulated_results,
        resolved_output_path: None,
      };
    }

    tracing::debug!(entry = %entry_name, file = %path, "extract");
    EntryContext {
      entry_name,
      output_kind: OutputKind::Extracted,
      accumulated_results,
      resolved_output_path: Some(path),
    }
  }

  fn allows_extract(&mut self, chunk_name: &str, path: &str) -> bool {
    let Some(on_extract) = &self.options.on_extract else {
      return true;
    };
    if let Some(allowed) = self.extract_decisions.get(path) {
      return *allowed;
    }
    let allowed = on_extract(&ExtractInfo { entry_name: chunk_name, file_name: path });
    self.extract_decisions.insert(path.to_string(), allowed);
    allowed
  }

  /// File name template relative to the output directory, `None` when not extracting.
  fn output_path(&self, chunk_filename: &str) -> Option<String> {
    let out_dir = self.bundler_options.out_dir();
    let path = match &self.options.extract {
      ExtractOption::Disabled => return None,
      ExtractOption::Auto => match self.bundler_options.file_name() {
        Some(file_name) => Path::new(file_name).with_replaced_extension("css"),
        None => {
          let chunk = Path::new(chunk_filename);
          let name = chunk.file_name().and_then(|name| name.to_str()).unwrap_or(chunk_filename);
          // `[name].[hash].js` keeps `[name].[hash]`.
          let stem = Path::new(name).with_replaced_extension("css");
          match chunk.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            Some(dir) => dir.join(stem).to_slash_lossy().into_owned(),
            None => stem,
          }
        }
      },
      ExtractOption::Path(path) => {
        let path = Path::new(path);
        let absolute =
          if path.is_absolute() { path.normalize() } else { out_dir.join(path).normalize() };
        absolute.relative(&out_dir).to_slash_lossy().into_owned()
      }
    };
    Some(path)
  }
}

#[cfg(test)]
mod tests {
  use std::{
    path::PathBuf,
    sync::{Arc, Mutex},
  };

  use stylepack_common::NormalizedBundlerOptions;

  use super::OutputResolver;
  use crate::{
    options::normalized::normalize_options, ExtractInfo, ExtractOption, OutputKind,
    StylePluginOptions,
  };

  fn bundler_options(file: Option<&str>) -> NormalizedBundlerOptions {
    NormalizedBundlerOptions {
      input: vec![],
      cwd: PathBuf::from("/project"),
      entry_filenames: "[name].js".to_string(),
      dir: "dist".to_string(),
      file: file.map(ToString::to_string),
    }
  }

  fn resolve_path(extract: ExtractOption, file: Option<&str>, chunk: &str) -> Option<String> {
    let options =
      normalize_options(StylePluginOptions { extract: Some(extract), ..Default::default() })
        .unwrap()
        .options;
    let bundler_options = bundler_options(file);
    OutputResolver::new(&options, &bundler_options)
      .resolve("main".to_string(), ("main", chunk), vec![])
      .resolved_output_path
  }

  #[test]
  fn derives_path_from_chunk_or_file() {
    assert_eq!(resolve_path(ExtractOption::Disabled, None, "main.js"), None);
    assert_eq!(resolve_path(ExtractOption::Auto, None, "main.js").as_deref(), Some("main.css"));
    assert_eq!(
      resolve_path(ExtractOption::Auto, None, "nested/foo.[hash].js").as_deref(),
      Some("nested/foo.[hash].css")
    );
    assert_eq!(
      resolve_path(ExtractOption::Auto, Some("dist/bundle.js"), "bundle.js").as_deref(),
      Some("bundle.css")
    );
  }

  #[cfg(unix)]
  #[test]
  fn explicit_paths() {
    assert_eq!(
      resolve_path(ExtractOption::from("this/is/extracted.css"), None, "main.js").as_deref(),
      Some("this/is/extracted.css")
    );
    assert_eq!(
      resolve_path(ExtractOption::from("/project/dist/a/b.css"), None, "main.js").as_deref(),
      Some("a/b.css")
    );
    assert_eq!(
      resolve_path(ExtractOption::from("/project/styles/b.css"), None, "main.js").as_deref(),
      Some("../styles/b.css")
    );
    assert_eq!(
      resolve_path(ExtractOption::from("css/[name]-[hash].css"), None, "main.js").as_deref(),
      Some("css/main-[hash].css")
    );
  }

  #[test]
  fn on_extract_veto_drops_the_entry() {
    let options = normalize_options(StylePluginOptions {
      extract: Some(ExtractOption::Auto),
      on_extract: Some(Arc::new(|info: &ExtractInfo| info.entry_name != "main")),
      ..Default::default()
    })
    .unwrap()
    .options;
    let bundler_options = bundler_options(None);
    let mut resolver = OutputResolver::new(&options, &bundler_options);

    let dropped = resolver.resolve("main".to_string(), ("main", "main.js"), vec![]);
    assert_eq!(dropped.output_kind, OutputKind::Dropped);
    assert!(dropped.resolved_output_path.is_none());

    let kept = resolver.resolve("other".to_string(), ("other", "other.js"), vec![]);
    assert_eq!(kept.output_kind, OutputKind::Extracted);
  }

  #[test]
  fn on_extract_is_asked_once_per_target() {
    let asked = Arc::new(Mutex::new(vec![]));
    let on_extract_asked = Arc::clone(&asked);
    let options = normalize_options(StylePluginOptions {
      extract: Some(ExtractOption::Auto),
      on_extract: Some(Arc::new(move |info: &ExtractInfo| {
        on_extract_asked.lock().unwrap().push(info.entry_name.to_string());
        info.entry_name != "a"
      })),
      ..Default::default()
    })
    .unwrap()
    .options;
    let bundler_options = bundler_options(None);
    let mut resolver = OutputResolver::new(&options, &bundler_options);

    // Both entries are named after the first chunk.
    let a = resolver.resolve("a".to_string(), ("a", "a.js"), vec![]);
    let b = resolver.resolve("b".to_string(), ("a", "a.js"), vec![]);
    assert_eq!(a.output_kind, OutputKind::Dropped);
    assert_eq!(b.output_kind, OutputKind::Dropped);
    assert_eq!(*asked.lock().unwrap(), vec!["a".to_string()]);

    let c = resolver.resolve("c".to_string(), ("c", "c.js"), vec![]);
    assert_eq!(c.output_kind, OutputKind::Extracted);
    assert_eq!(asked.lock().unwrap().len(), 2);
  }
}
