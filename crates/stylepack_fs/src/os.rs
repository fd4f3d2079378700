use std::{io, path::Path};

use crate::FileSystem;

#[derive(Debug, Default, Clone, Copy)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
  fn read_to_string(&self, path: &Path) -> io::Result<String> {
    std::fs::read_to_string(path)
  }

  fn write(&self, path: &Path, content: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)
  }

  fn exists(&self, path: &Path) -> bool {
    path.exists()
  }
}

#[test]
fn test_write_creates_parent_dirs() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("this/is/extracted.css");
  OsFileSystem.write(&path, b"a{}").unwrap();
  assert!(OsFileSystem.exists(&path));
  assert_eq!(OsFileSystem.read_to_string(&path).unwrap(), "a{}");
}
