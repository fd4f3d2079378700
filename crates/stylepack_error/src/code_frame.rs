const CONTEXT_LINES: usize = 2;

/// Renders the lines around `line` (zero-based) with a caret under `column` (one-based).
pub fn code_frame(source: &str, line: usize, column: usize) -> Option<String> {
  let lines = source.lines().collect::<Vec<_>>();
  if line >= lines.len() {
    return None;
  }

  let start = line.saturating_sub(CONTEXT_LINES);
  let end = (line + CONTEXT_LINES + 1).min(lines.len());
  let gutter_width = end.to_string().len();

  let mut frame = String::new();
  for (index, text) in lines.iter().enumerate().take(end).skip(start) {
    let marker = if index == line { '>' } else { ' ' };
    frame.push_str(&format!("{marker} {:>gutter_width$} | {text}\n", index + 1));
    if index == line {
      let padding = " ".repeat(column.saturating_sub(1));
      frame.push_str(&format!("  {} | {padding}^\n", " ".repeat(gutter_width)));
    }
  }
  Some(frame)
}

#[test]
fn test_code_frame() {
  let source = ".a {\n  color: red\n  .b {\n}\n";
  let frame = code_frame(source, 1, 3).unwrap();
  assert_eq!(frame, "  1 | .a {\n> 2 |   color: red\n    |   ^\n  3 |   .b {\n  4 | }\n");
  assert!(code_frame(source, 10, 1).is_none());
}
