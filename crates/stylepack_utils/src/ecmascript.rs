use oxc::syntax::identifier;
use phf::{phf_set, Set};

use crate::concat_string;

static RESERVED_WORDS: Set<&'static str> = phf_set! {
  "await", "break", "case", "catch", "class", "const", "continue", "debugger", "default",
  "delete", "do", "else", "enum", "export", "extends", "false", "finally", "for", "function",
  "if", "implements", "import", "in", "instanceof", "interface", "let", "new", "null", "package",
  "private", "protected", "public", "return", "static", "super", "switch", "this", "throw",
  "true", "try", "typeof", "var", "void", "while", "with", "yield", "arguments", "eval",
  "undefined", "NaN", "Infinity",
};

pub fn is_validate_identifier_name(name: &str) -> bool {
  identifier::is_identifier_name(name)
}

pub fn is_reserved_word(name: &str) -> bool {
  RESERVED_WORDS.contains(name)
}

pub fn property_access_str(obj: &str, prop: &str) -> String {
  if is_validate_identifier_name(prop) && !is_reserved_word(prop) {
    concat_string!(obj, ".", prop)
  } else {
    concat_string!(obj, "[", to_js_string_literal(prop), "]")
  }
}

/// Quotes `value` as a JavaScript string literal. JSON strings are valid JavaScript.
pub fn to_js_string_literal(value: &str) -> String {
  let mut quoted = String::with_capacity(value.len() + 2);
  quoted.push('"');
  for char in value.chars() {
    match char {
      '"' => quoted.push_str("\\\""),
      '\\' => quoted.push_str("\\\\"),
      '\n' => quoted.push_str("\\n"),
      '\r' => quoted.push_str("\\r"),
      '\t' => quoted.push_str("\\t"),
      // Line terminators in JavaScript that JSON allows raw.
      '\u{2028}' => quoted.push_str("\\u2028"),
      '\u{2029}' => quoted.push_str("\\u2029"),
      char if (char as u32) < 0x20 => {
        quoted.push_str(&format!("\\u{:04x}", char as u32));
      }
      char => quoted.push(char),
    }
  }
  quoted.push('"');
  quoted
}

/// Renders a JSON value as a JavaScript expression.
pub fn json_to_js(value: &serde_json::Value) -> String {
  // `serde_json` never fails to serialize a `Value`.
  let json = serde_json::to_string(value).unwrap_or_default();
  json.replace('\u{2028}', "\\u2028").replace('\u{2029}', "\\u2029")
}

#[test]
fn test_is_validate_identifier_name() {
  assert!(is_validate_identifier_name("foo"));
  assert!(!is_validate_identifier_name("1aaaa"));
  assert!(!is_validate_identifier_name("😈"));
}

#[test]
fn test_property_access_str() {
  assert_eq!(property_access_str("m", "foo"), "m.foo");
  assert_eq!(property_access_str("m", "default"), "m[\"default\"]");
  assert_eq!(property_access_str("m", "foo-bar"), "m[\"foo-bar\"]");
}

#[test]
fn test_to_js_string_literal() {
  assert_eq!(to_js_string_literal("a{content:\"x\"}\n"), r#""a{content:\"x\"}\n""#);
  assert_eq!(to_js_string_literal("\0style"), r#""\u0000style""#);
}
