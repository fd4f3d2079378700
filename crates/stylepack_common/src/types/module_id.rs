use std::path::Path;

use arcstr::ArcStr;
use sugar_path::SugarPath;

/// `ModuleId` is the unique string identifier for each module.
/// - It is the absolute path of the module, or a `\0`-prefixed id for modules provided by plugins.
/// - Plugins could store the `ModuleId` to track the module in different hooks.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone)]
pub struct ModuleId(ArcStr);

impl ModuleId {
  pub fn new(value: impl Into<ArcStr>) -> Self {
    Self(value.into())
  }

  /// Modules that only exist in memory, provided by a plugin's `load` hook.
  pub fn is_virtual(&self) -> bool {
    self.0.starts_with('\0')
  }

  /// A representation that doesn't depend on the machine the build runs on.
  pub fn stabilize(&self, cwd: &Path) -> String {
    if self.is_virtual() {
      self.0.replace('\0', "\\0")
    } else if self.as_path().is_absolute() {
      self.relative(cwd).as_path().to_slash_lossy().into_owned()
    } else {
      self.to_string()
    }
  }

  pub fn inner(&self) -> &ArcStr {
    &self.0
  }
}

impl std::ops::Deref for ModuleId {
  type Target = str;

  fn deref(&self) -> &Self::Target {
    &self.0
  }
}

impl std::borrow::Borrow<str> for ModuleId {
  fn borrow(&self) -> &str {
    &self.0
  }
}

impl AsRef<str> for ModuleId {
  fn as_ref(&self) -> &str {
    self
  }
}

impl std::fmt::Display for ModuleId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(&self.0)
  }
}

impl From<ArcStr> for ModuleId {
  fn from(value: ArcStr) -> Self {
    Self::new(value)
  }
}

impl From<&str> for ModuleId {
  fn from(value: &str) -> Self {
    Self::new(value)
  }
}

impl From<String> for ModuleId {
  fn from(value: String) -> Self {
    Self::new(value)
  }
}

#[test]
fn test_stabilize() {
  let cwd = std::env::temp_dir().join("project");
  let id = ModuleId::new(cwd.join("src").join("style.css").to_string_lossy().as_ref());
  assert_eq!(id.stabilize(&cwd), "src/style.css");
  assert_eq!(ModuleId::new("\0style-inject").stabilize(&cwd), "\\0style-inject");
  assert!(ModuleId::new("\0style-inject").is_virtual());
}
