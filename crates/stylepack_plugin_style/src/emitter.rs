use std::path::Path;

use rustc_hash::FxHashMap;
use stylepack_common::{FileNameRenderOptions, FilenameTemplate, Output, OutputAsset};
use stylepack_sourcemap::{css_source_mapping_url_comment, inline_css_source_map_comment, SourceMap};
use stylepack_utils::{concat_string, xxhash::xxhash_with_base};

use crate::{dedup_merge::MergedTarget, ExtractionTarget, SourceMapOption};

/// A merged stylesheet with its final text and hash, ready to be emitted.
#[derive(Debug)]
pub struct PreparedTarget {
  pub path: String,
  pub entry_names: Vec<String>,
  pub code: String,
  pub map: Option<SourceMap>,
  pub content_hash: String,
}

impl PreparedTarget {
  pub fn new(target: &MergedTarget) -> Self {
    let (code, map) = target.concat();
    let content_hash = xxhash_with_base(code.as_bytes(), 64);
    Self {
      path: target.path.clone(),
      entry_names: target.entry_names.clone(),
      code,
      map,
      content_hash,
    }
  }
}

/// Names stylesheet files after their content and emits each (template, content) pair once.
#[derive(Debug)]
pub struct HashStableEmitter {
  source_map: SourceMapOption,
  emitted: FxHashMap<(String, String), ExtractionTarget>,
}

impl HashStableEmitter {
  pub fn new(source_map: SourceMapOption) -> Self {
    Self { source_map, emitted: FxHashMap::default() }
  }

  /// Adds the stylesheet (and its map) to `bundle`, returning its file name.
  pub fn emit(&mut self, target: PreparedTarget, bundle: &mut Vec<Output>) -> String {
    let key = (target.path, target.content_hash);
    if let Some(emitted) = self.emitted.get(&key) {
      tracing::debug!(file = %emitted.path, "already emitted");
      return emitted.path.clone();
    }
    let (template, content_hash) = &key;

    let filename = FilenameTemplate::new(template.clone()).render(&FileNameRenderOptions {
      hash: Some(content_hash),
      ext: Some("css"),
      ..FileNameRenderOptions::default()
    });

    let mut code = target.code;
    match (self.source_map, &target.map) {
      (SourceMapOption::Enabled, Some(map)) => {
        let map_filename = concat_string!(filename, ".map");
        let map_basename =
          Path::new(&map_filename).file_name().map_or(map_filename.as_str(), |name| {
            name.to_str().unwrap_or(map_filename.as_str())
          });
        code.push('\n');
        code.push_str(&css_source_mapping_url_comment(map_basename));
        bundle.push(Output::Asset(Box::new(OutputAsset {
          filename: map_filename.clone(),
          source: map.to_json_string(),
          names: target.entry_names.clone(),
        })));
      }
      (SourceMapOption::Inline, Some(map)) => {
        code.push('\n');
        code.push_str(&inline_css_source_map_comment(map));
      }
      _ => {}
    }

    tracing::debug!(file = %filename, hash = %content_hash, "emit stylesheet");
    bundle.push(Output::Asset(Box::new(OutputAsset {
      filename: filename.clone(),
      source: code,
      names: target.entry_names,
    })));

    let emitted =
      ExtractionTarget { path: filename.clone(), content_hash: content_hash.clone(), finalized: true };
    self.emitted.insert(key, emitted);
    filename
  }
}

#[cfg(test)]
mod tests {
  use stylepack_sourcemap::SourceMap;

  use super::{HashStableEmitter, PreparedTarget};
  use crate::SourceMapOption;

  fn prepared(path: &str, code: &str, map: Option<SourceMap>) -> PreparedTarget {
    PreparedTarget {
      path: path.to_string(),
      entry_names: vec!["main".to_string()],
      code: code.to_string(),
      map,
      content_hash: stylepack_utils::xxhash::xxhash_with_base(code.as_bytes(), 64),
    }
  }

  fn map() -> SourceMap {
    SourceMap::from_json_string(
      r#"{"version":3,"sources":["src/a.css"],"names":[],"mappings":"AAAA","sourcesContent":[".a{}"]}"#,
    )
    .unwrap()
  }

  #[test]
  fn hash_depends_on_content_only() {
    let mut emitter = HashStableEmitter::new(SourceMapOption::Disabled);
    let mut bundle = vec![];
    let foo = emitter.emit(prepared("foo.[hash].css", ".foo{}", None), &mut bundle);
    let foo_again = emitter.emit(prepared("foo.[hash].css", ".foo{}", None), &mut bundle);
    let bar = emitter.emit(prepared("foo.[hash].css", ".bar{}", None), &mut bundle);
    let short = emitter.emit(prepared("x.[hash:4].css", ".foo{}", None), &mut bundle);

    assert_eq!(foo, foo_again);
    assert_ne!(foo, bar);
    assert_eq!(foo.len(), "foo..css".len() + 8);
    assert_eq!(&short[2..6], &foo[4..8]);
    // The second request for the same content is not emitted again.
    assert_eq!(bundle.len(), 3);
  }

  #[test]
  fn sibling_map_file() {
    let mut emitter = HashStableEmitter::new(SourceMapOption::Enabled);
    let mut bundle = vec![];
    let filename = emitter.emit(prepared("styles/main.css", ".a{}", Some(map())), &mut bundle);
    assert_eq!(filename, "styles/main.css");
    let filenames = bundle.iter().map(|output| output.filename().to_string()).collect::<Vec<_>>();
    assert_eq!(filenames, vec!["styles/main.css.map", "styles/main.css"]);
    let css = bundle[1].as_asset().unwrap();
    assert_eq!(css.source, ".a{}\n/*# sourceMappingURL=main.css.map */");
  }

  #[test]
  fn inline_map() {
    let mut emitter = HashStableEmitter::new(SourceMapOption::Inline);
    let mut bundle = vec![];
    emitter.emit(prepared("main.css", ".a{}", Some(map())), &mut bundle);
    assert_eq!(bundle.len(), 1);
    let css = bundle[0].as_asset().unwrap();
    assert!(css
      .source
      .starts_with(".a{}\n/*# sourceMappingURL=data:application/json;charset=utf-8;base64,"));
  }
}
