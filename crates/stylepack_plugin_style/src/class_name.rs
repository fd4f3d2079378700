use std::sync::LazyLock;

use regex::Regex;
use stylepack_utils::ecmascript::is_reserved_word;

static DASHES_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new("-+").expect("valid regex"));

/// `foo-bar` → `foo$_$bar`, `a--b` → `a$__$b`.
fn escape_class_name_dashes(name: &str) -> String {
  DASHES_RE
    .replace_all(name, |captures: &regex::Captures| format!("${}$", "_".repeat(captures[0].len())))
    .into_owned()
}

/// Turns a class name into an identifier usable as a named export.
pub fn ensure_class_name(name: &str) -> String {
  let name = escape_class_name_dashes(name);
  if is_reserved_word(&name) {
    format!("${name}$")
  } else {
    name
  }
}

#[test]
fn test_ensure_class_name() {
  assert_eq!(ensure_class_name("title"), "title");
  assert_eq!(ensure_class_name("foo-bar"), "foo$_$bar");
  assert_eq!(ensure_class_name("a--b-c"), "a$__$b$_$c");
  assert_eq!(ensure_class_name("default"), "$default$");
  assert_eq!(ensure_class_name("class"), "$class$");
}
