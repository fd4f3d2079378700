/// Virtual module providing `styleInject(css, { insertAt })`.
pub const STYLE_INJECT_ID: &str = "\0style-inject";

pub const STYLE_INJECT_SOURCE: &str = include_str!("./style_inject.js");
