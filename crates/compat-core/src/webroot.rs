//! Moving application files into a newly configured web root
//!
//! Legacy apps could set `WEBDIR` without having that directory; the old
//! buildpack created it at staging time. The new layout expects the files to
//! already live there.

use std::fs;
use std::path::{Component, Path};

use crate::error::CompatError;
use crate::fsutil::file_exists;
use crate::options::{PhpOptions, LEGACY_CONFIG_DIR};
use crate::outcome::Outcome;

/// Top-level entries that are never moved into the web root
pub const RESERVED_PATHS: &[&str] = &[LEGACY_CONFIG_DIR, ".extensions", ".profile"];

/// `LIBDIR` when the legacy options did not set one
pub const DEFAULT_LIB_DIR: &str = "lib";

/// Move every top-level entry of `app_root` into `php.web_dir`
///
/// Does nothing when no web directory is configured or it already exists.
/// Reserved paths, the first segment of the web directory, and the library
/// directory stay at the root. Each entry is moved as a unit; nested trees are
/// not merged. A web directory outside the app root is rejected before
/// anything moves.
pub fn move_web_files_to_web_dir(app_root: &Path, php: &PhpOptions) -> Result<Outcome, CompatError> {
    if php.web_dir.is_empty() {
        return Ok(Outcome::Proceed);
    }

    let web_dir_top = top_level_segment(&php.web_dir)?;
    let web_dir = app_root.join(&php.web_dir);
    if file_exists(&web_dir)? {
        return Ok(Outcome::Proceed);
    }

    let lib_dir = if php.lib_dir.is_empty() {
        DEFAULT_LIB_DIR
    } else {
        php.lib_dir.as_str()
    };

    // Collect first; the web dir is created inside the directory being listed
    let mut entries = Vec::new();
    for entry in fs::read_dir(app_root).map_err(|e| CompatError::fs(app_root, e))? {
        let entry = entry.map_err(|e| CompatError::fs(app_root, e))?;
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if is_kept_at_root(&name, &web_dir_top, lib_dir) {
            continue;
        }
        entries.push(entry.file_name());
    }
    entries.sort();

    fs::create_dir_all(&web_dir).map_err(|e| CompatError::fs(&web_dir, e))?;

    for name in &entries {
        let from = app_root.join(name);
        fs::rename(&from, web_dir.join(name)).map_err(|e| CompatError::fs(&from, e))?;
    }

    if entries.is_empty() {
        return Ok(Outcome::Proceed);
    }

    Ok(Outcome::Warn(format!(
        "WEBDIR `{}` did not exist. Moved {} application entries into it",
        php.web_dir,
        entries.len()
    )))
}

fn is_kept_at_root(name: &str, web_dir_top: &str, lib_dir: &str) -> bool {
    RESERVED_PATHS.contains(&name) || name == web_dir_top || name == lib_dir
}

/// First path segment of a relative web directory such as `public/html`
fn top_level_segment(web_dir: &str) -> Result<String, CompatError> {
    let invalid = |reason: &'static str| CompatError::InvalidWebDir {
        web_dir: web_dir.to_string(),
        reason,
    };

    let mut first = None;
    for component in Path::new(web_dir).components() {
        match component {
            Component::Normal(segment) => {
                if first.is_none() {
                    first = Some(segment.to_string_lossy().into_owned());
                }
            }
            Component::CurDir => {}
            Component::ParentDir => return Err(invalid("it must not contain `..`")),
            Component::RootDir | Component::Prefix(_) => {
                return Err(invalid("it must be relative to the application root"))
            }
        }
    }

    first.ok_or_else(|| invalid("it must name a directory below the application root"))
}
