use std::sync::LazyLock;

use regex::Regex;

static HASH_PATTERN_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"\[hash(?::(\d+))?\]").expect("valid regex"));

pub const DEFAULT_HASH_LEN: usize = 8;
pub const MAX_HASH_LEN: usize = 21;

#[derive(Debug, PartialEq, Eq)]
pub struct HashPattern<'a> {
  pub pattern: &'a str,
  pub len: Option<usize>,
}

/// Finds the first `[hash]` or `[hash:N]` in `template`.
pub fn extract_hash_pattern(template: &str) -> Option<HashPattern<'_>> {
  let captures = HASH_PATTERN_RE.captures(template)?;
  let pattern = captures.get(0)?.as_str();
  let len = captures.get(1).and_then(|len| len.as_str().parse::<usize>().ok());
  Some(HashPattern { pattern, len })
}

/// Replaces every hash pattern in `template`, asking `hash_for_len` for a hash of the requested
/// length.
pub fn replace_hash_patterns(template: &str, mut hash_for_len: impl FnMut(usize) -> String) -> String {
  HASH_PATTERN_RE
    .replace_all(template, |captures: &regex::Captures| {
      let len = captures
        .get(1)
        .and_then(|len| len.as_str().parse::<usize>().ok())
        .unwrap_or(DEFAULT_HASH_LEN)
        .clamp(1, MAX_HASH_LEN);
      hash_for_len(len)
    })
    .into_owned()
}

#[test]
fn test_extract_hash_pattern() {
  assert_eq!(
    extract_hash_pattern("[name]-[hash].js"),
    Some(HashPattern { pattern: "[hash]", len: None })
  );
  assert_eq!(
    extract_hash_pattern("[name]-[hash:4].js"),
    Some(HashPattern { pattern: "[hash:4]", len: Some(4) })
  );
  assert_eq!(extract_hash_pattern("[name].js"), None);
}

#[test]
fn test_replace_hash_patterns() {
  let hash = "abcdefghijklmnopqrstu";
  assert_eq!(replace_hash_patterns("a.[hash].css", |len| hash[..len].to_string()), "a.abcdefgh.css");
  assert_eq!(replace_hash_patterns("a.[hash:3].css", |len| hash[..len].to_string()), "a.abc.css");
}
