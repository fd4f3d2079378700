use std::fmt;

use crate::code_frame::code_frame;

/// The stylesheet pipeline rejected a module.
#[derive(Debug)]
pub struct TransformError {
  pub id: String,
  pub message: String,
  /// Source excerpt with a caret under the failing position.
  pub frame: Option<String>,
}

impl TransformError {
  pub fn new(id: impl Into<String>, message: impl Into<String>) -> Self {
    Self { id: id.into(), message: message.into(), frame: None }
  }

  /// `line` is zero-based, `column` one-based.
  #[must_use]
  pub fn with_location(mut self, source: &str, line: u32, column: u32) -> Self {
    self.frame = code_frame(source, line as usize, column as usize);
    self
  }
}

impl fmt::Display for TransformError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Failed to transform {}: {}", self.id, self.message)?;
    if let Some(frame) = &self.frame {
      write!(f, "\n\n{frame}")?;
    }
    Ok(())
  }
}

impl std::error::Error for TransformError {}

/// Invalid option combinations, surfaced before any module is transformed.
#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
  #[error("Unknown loader \"{0}\" in `use`")]
  UnknownLoader(String),
  #[error("Invalid options for loader \"{loader}\": {reason}")]
  InvalidLoaderOptions { loader: String, reason: String },
  #[error("Loader \"{0}\" is registered more than once")]
  DuplicateLoader(String),
  #[error("`extract` must not be an empty path")]
  EmptyExtractPath,
  #[error("{0}")]
  Invalid(String),
}

/// Two outputs resolved to the same path with different bytes. The first write is kept.
#[derive(Debug, thiserror::Error)]
#[error("\"{path}\" was emitted more than once with different content, keeping the first one")]
pub struct WriteConflict {
  pub path: String,
}
