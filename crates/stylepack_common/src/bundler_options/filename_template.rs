use stylepack_utils::extract_hash_pattern::{extract_hash_pattern, replace_hash_patterns};

#[derive(Debug, Default)]
pub struct FileNameRenderOptions<'me> {
  pub name: Option<&'me str>,
  pub hash: Option<&'me str>,
  /// Extension without the leading dot.
  pub ext: Option<&'me str>,
}

/// An output file name pattern such as `[name]-[hash].js`.
///
/// Supported placeholders: `[name]`, `[hash]`, `[hash:N]`, `[ext]` and `[extname]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FilenameTemplate {
  template: String,
}

impl FilenameTemplate {
  pub fn new(template: String) -> Self {
    Self { template }
  }

  pub fn template(&self) -> &str {
    &self.template
  }

  pub fn has_hash_pattern(&self) -> bool {
    extract_hash_pattern(&self.template).is_some()
  }

  /// Placeholders without a value in `options` are left untouched.
  pub fn render(&self, options: &FileNameRenderOptions) -> String {
    let mut rendered = self.template.clone();
    if let Some(name) = options.name {
      rendered = rendered.replace("[name]", name);
    }
    if let Some(ext) = options.ext {
      let extname = if ext.is_empty() { String::new() } else { format!(".{ext}") };
      rendered = rendered.replace("[extname]", &extname).replace("[ext]", ext);
    }
    if let Some(hash) = options.hash {
      rendered = replace_hash_patterns(&rendered, |len| hash[..len.min(hash.len())].to_string());
    }
    rendered
  }
}

impl From<String> for FilenameTemplate {
  fn from(template: String) -> Self {
    Self::new(template)
  }
}

impl From<&str> for FilenameTemplate {
  fn from(template: &str) -> Self {
    Self::new(template.to_string())
  }
}

#[test]
fn test_render() {
  let template = FilenameTemplate::new("assets/[name]-[hash:4][extname]".to_string());
  assert!(template.has_hash_pattern());
  assert_eq!(
    template.render(&FileNameRenderOptions {
      name: Some("entry"),
      hash: Some("abcdefgh"),
      ext: Some("css")
    }),
    "assets/entry-abcd.css"
  );

  let template = FilenameTemplate::new("[name].js".to_string());
  assert!(!template.has_hash_pattern());
  assert_eq!(
    template.render(&FileNameRenderOptions { name: Some("main"), ..Default::default() }),
    "main.js"
  );
}
