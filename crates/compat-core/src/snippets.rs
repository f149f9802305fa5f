//! Relocation of PHP configuration snippets
//!
//! `.bp-config/php/php.ini.d/*.ini` moved to `.php.ini.d/` and
//! `.bp-config/php/fpm.d/*.conf` moved to `.php.fpm.d/`.

use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::CompatError;
use crate::fsutil::{copy_file, file_exists};
use crate::options::LEGACY_CONFIG_DIR;
use crate::outcome::Outcome;

/// Copy matching snippets from `.bp-config/php/<legacy_subfolder>` to `<new_folder>`
///
/// Only files directly inside the legacy folder whose name ends in
/// `.<extension_no_dot>` are copied. The originals stay where they are.
pub fn migrate_php_snippets(
    app_root: &Path,
    label: &str,
    legacy_subfolder: &str,
    new_folder: &str,
    extension_no_dot: &str,
) -> Result<Outcome, CompatError> {
    let legacy_folder = app_root.join(LEGACY_CONFIG_DIR).join("php").join(legacy_subfolder);
    let pattern = Regex::new(&format!(r"^.*\.{}$", regex::escape(extension_no_dot)))?;

    let snippets = find_files(&legacy_folder, &pattern)?;
    if snippets.is_empty() {
        return Ok(Outcome::Proceed);
    }

    let target = app_root.join(new_folder);
    for snippet in &snippets {
        if let Some(name) = snippet.file_name() {
            copy_file(snippet, &target.join(name))?;
        }
    }

    Ok(Outcome::Warn(format!(
        "Found {} {} snippets under `{}/php/{}/`. This location has changed. Moving files to `{}/`",
        snippets.len(),
        label,
        LEGACY_CONFIG_DIR,
        legacy_subfolder,
        new_folder
    )))
}

/// Files directly inside `dir` whose name matches `pattern`, sorted by name
fn find_files(dir: &Path, pattern: &Regex) -> Result<Vec<PathBuf>, CompatError> {
    if !file_exists(dir)? {
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| CompatError::fs(dir, e))? {
        let entry = entry.map_err(|e| CompatError::fs(dir, e))?;
        let path = entry.path();
        // follows symlinks, so linked snippets are copied by content
        if path.is_file() && pattern.is_match(&entry.file_name().to_string_lossy()) {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}
