//! Rejection of custom web server configuration
//!
//! Legacy apps could drop `*.conf` files under `.bp-config/httpd` or
//! `.bp-config/nginx`. Those have no equivalent in the new layout, so the
//! build must stop before anything is migrated.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::CompatError;
use crate::fsutil::file_exists;
use crate::options::LEGACY_CONFIG_DIR;

/// Fail if `.bp-config/<folder_name>` holds any file ending in `extension`
///
/// `extension` includes the leading dot, e.g. `".conf"`. The folder is walked
/// recursively. A missing folder is fine.
pub fn error_on_custom_server_config(
    app_root: &Path,
    server_label: &str,
    folder_name: &str,
    extension: &str,
) -> Result<(), CompatError> {
    let server_path = app_root.join(LEGACY_CONFIG_DIR).join(folder_name);
    if !file_exists(&server_path)? {
        return Ok(());
    }

    let files = find_files_with_extension(&server_path, extension)?;
    if !files.is_empty() {
        return Err(CompatError::UnsupportedCustomConfig {
            server: server_label.to_string(),
            folder: folder_name.to_string(),
            files,
        });
    }

    Ok(())
}

/// Collect non-directory entries below `root` whose extension matches `extension`
///
/// A walk error is returned rather than skipped so that an unreadable
/// directory is never mistaken for an empty one.
fn find_files_with_extension(root: &Path, extension: &str) -> Result<Vec<PathBuf>, CompatError> {
    let wanted = extension.trim_start_matches('.');
    let mut files = Vec::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(root).to_path_buf();
            CompatError::fs(path, e.into())
        })?;

        // Symlinks count unless they resolve to a directory
        if !entry.path().is_dir() && entry.path().extension().is_some_and(|ext| ext == wanted) {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(app_root: &Path, relative: &str, contents: &str) {
        let path = app_root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    #[test]
    fn test_httpd_conf_files_rejected() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), ".bp-config/httpd/test.conf", "contents");
        write(temp.path(), ".bp-config/httpd/another.conf", "more contents");

        let err = error_on_custom_server_config(temp.path(), "HTTPD", "httpd", ".conf").unwrap_err();

        match err {
            CompatError::UnsupportedCustomConfig { server, folder, files } => {
                assert_eq!(server, "HTTPD");
                assert_eq!(folder, "httpd");
                assert_eq!(files.len(), 2);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_nginx_nested_conf_files_rejected() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), ".bp-config/nginx/server/test.conf", "contents");

        let err = error_on_custom_server_config(temp.path(), "Nginx", "nginx", ".conf").unwrap_err();

        let message = err.to_string();
        assert!(message.contains("Found 1 Nginx configuration files under `.bp-config/nginx`"));
        assert!(message.contains("Migration guide"));
    }

    #[test]
    fn test_other_extensions_allowed() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), ".bp-config/httpd/test.txt", "contents");
        write(temp.path(), ".bp-config/httpd/notes.conf.bak", "contents");

        assert!(error_on_custom_server_config(temp.path(), "HTTPD", "httpd", ".conf").is_ok());
    }

    #[test]
    fn test_missing_folder_allowed() {
        let temp = TempDir::new().unwrap();
        assert!(error_on_custom_server_config(temp.path(), "HTTPD", "httpd", ".conf").is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_conf_rejected() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "real/x.conf", "contents");
        fs::create_dir_all(temp.path().join(".bp-config/httpd")).unwrap();
        std::os::unix::fs::symlink(
            temp.path().join("real/x.conf"),
            temp.path().join(".bp-config/httpd/custom.conf"),
        )
        .unwrap();

        let err = error_on_custom_server_config(temp.path(), "HTTPD", "httpd", ".conf").unwrap_err();

        assert!(matches!(err, CompatError::UnsupportedCustomConfig { ref files, .. } if files.len() == 1));
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_subfolder_is_error() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        write(temp.path(), ".bp-config/httpd/notes.txt", "contents");
        let sub = temp.path().join(".bp-config/httpd/sub");
        fs::create_dir_all(&sub).unwrap();
        fs::set_permissions(&sub, fs::Permissions::from_mode(0o000)).unwrap();

        // root ignores directory permissions
        if fs::read_dir(&sub).is_ok() {
            fs::set_permissions(&sub, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let result = error_on_custom_server_config(temp.path(), "HTTPD", "httpd", ".conf");
        fs::set_permissions(&sub, fs::Permissions::from_mode(0o755)).unwrap();

        assert!(matches!(result, Err(CompatError::FileSystem { .. })), "{:?}", result);
    }

    #[test]
    fn test_directory_named_like_conf_ignored() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join(".bp-config/httpd/sites.conf")).unwrap();

        assert!(error_on_custom_server_config(temp.path(), "HTTPD", "httpd", ".conf").is_ok());
    }
}
