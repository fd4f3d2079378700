mod code_frame;
mod kinds;

use std::ops::{Deref, DerefMut};

pub use crate::{
  code_frame::code_frame,
  kinds::{ConfigurationError, TransformError, WriteConflict},
};

#[derive(Debug)]
pub struct BuildError(pub Vec<anyhow::Error>);

impl BuildError {
  /// Returns the first error that downcasts to `E`, if any.
  pub fn find<E>(&self) -> Option<&E>
  where
    E: std::fmt::Display + std::fmt::Debug + Send + Sync + 'static,
  {
    self.0.iter().find_map(|error| error.downcast_ref::<E>())
  }
}

impl Deref for BuildError {
  type Target = Vec<anyhow::Error>;

  fn deref(&self) -> &Self::Target {
    &self.0
  }
}

impl DerefMut for BuildError {
  fn deref_mut(&mut self) -> &mut Self::Target {
    &mut self.0
  }
}

impl std::fmt::Display for BuildError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    for (index, error) in self.0.iter().enumerate() {
      if index > 0 {
        writeln!(f)?;
      }
      write!(f, "{error}")?;
    }
    Ok(())
  }
}

impl From<anyhow::Error> for BuildError {
  fn from(error: anyhow::Error) -> Self {
    Self(vec![error])
  }
}

impl From<Vec<anyhow::Error>> for BuildError {
  fn from(errors: Vec<anyhow::Error>) -> Self {
    Self(errors)
  }
}

impl From<TransformError> for BuildError {
  fn from(error: TransformError) -> Self {
    Self(vec![error.into()])
  }
}

impl From<ConfigurationError> for BuildError {
  fn from(error: ConfigurationError) -> Self {
    Self(vec![error.into()])
  }
}

pub type BuildResult<T> = anyhow::Result<T, BuildError>;

#[test]
fn test_find_typed_error() {
  let error = BuildError::from(vec![
    anyhow::anyhow!("plain"),
    ConfigurationError::UnknownLoader("stylus".to_string()).into(),
  ]);
  assert!(matches!(error.find::<ConfigurationError>(), Some(ConfigurationError::UnknownLoader(_))));
  assert!(error.find::<TransformError>().is_none());
  assert_eq!(error.to_string(), "plain\nUnknown loader \"stylus\" in `use`");
}
