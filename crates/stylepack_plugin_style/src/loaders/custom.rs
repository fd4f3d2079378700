use std::{fmt, sync::Arc};

use regex::Regex;

use super::{Loader, LoaderContext, LoaderResult};

pub type ProcessFn =
  Arc<dyn Fn(LoaderResult, &LoaderContext) -> anyhow::Result<LoaderResult> + Send + Sync>;

/// A user supplied loader, selected in `use` by its name.
pub struct CustomLoader {
  pub name: String,
  pub test: Regex,
  pub process: ProcessFn,
}

impl CustomLoader {
  pub fn new(name: impl Into<String>, test: Regex, process: ProcessFn) -> Self {
    Self { name: name.into(), test, process }
  }
}

impl fmt::Debug for CustomLoader {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("CustomLoader").field("name", &self.name).field("test", &self.test).finish()
  }
}

impl Loader for CustomLoader {
  fn name(&self) -> &str {
    &self.name
  }

  fn test(&self, id: &str) -> bool {
    self.test.is_match(id)
  }

  fn process(&self, input: LoaderResult, ctx: &LoaderContext) -> anyhow::Result<LoaderResult> {
    (self.process)(input, ctx)
  }
}
