//! File helpers shared by the migration steps

use std::fs;
use std::path::Path;

use crate::error::CompatError;

/// Whether something exists at `path`, surfacing permission errors
pub(crate) fn file_exists(path: &Path) -> Result<bool, CompatError> {
    path.try_exists().map_err(|e| CompatError::fs(path, e))
}

/// Write `contents` to `path`, creating parent directories and truncating
pub(crate) fn write_file(path: &Path, contents: &str) -> Result<(), CompatError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| CompatError::fs(parent, e))?;
    }
    fs::write(path, contents).map_err(|e| CompatError::fs(path, e))
}

/// Copy a file, creating the destination's parent directories
pub(crate) fn copy_file(from: &Path, to: &Path) -> Result<(), CompatError> {
    if let Some(parent) = to.parent() {
        fs::create_dir_all(parent).map_err(|e| CompatError::fs(parent, e))?;
    }
    fs::copy(from, to).map_err(|e| CompatError::fs(from, e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_file_creates_parents() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("a").join("b").join("c.txt");

        write_file(&path, "first").unwrap();
        write_file(&path, "second").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
    }

    #[test]
    fn test_copy_file_leaves_source() {
        let temp = TempDir::new().unwrap();
        let from = temp.path().join("from.ini");
        let to = temp.path().join("nested").join("to.ini");
        fs::write(&from, "memory_limit=1G").unwrap();

        copy_file(&from, &to).unwrap();

        assert!(from.is_file());
        assert_eq!(fs::read_to_string(&to).unwrap(), "memory_limit=1G");
    }

    #[test]
    fn test_file_exists() {
        let temp = TempDir::new().unwrap();
        assert!(file_exists(temp.path()).unwrap());
        assert!(!file_exists(&temp.path().join("missing")).unwrap());
    }
}
