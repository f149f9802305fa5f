//! Generated files for settings that `buildpack.yml` does not carry

use std::path::Path;

use crate::error::CompatError;
use crate::fsutil::write_file;
use crate::options::PhpOptions;

pub const INI_SNIPPET_DIR: &str = ".php.ini.d";
pub const EXTENSIONS_FILE: &str = "compat-extensions.ini";
pub const PROFILE_DIR: &str = ".profile.d";
pub const COMMANDS_FILE: &str = "additional-cmds.sh";

/// Render `PHP_EXTENSIONS` then `ZEND_EXTENSIONS` as ini directives
pub fn render_extensions(php: &PhpOptions) -> String {
    let mut out = String::new();
    for ext in &php.extensions {
        out.push_str(&format!("extension={}.so\n", ext));
    }
    for ext in &php.zend_extensions {
        out.push_str(&format!("zend_extension={}.so\n", ext));
    }
    out
}

/// Write `.php.ini.d/compat-extensions.ini`, replacing any previous content
///
/// The file is written even when there are no extensions.
pub fn migrate_extensions(app_root: &Path, php: &PhpOptions) -> Result<(), CompatError> {
    let path = app_root.join(INI_SNIPPET_DIR).join(EXTENSIONS_FILE);
    write_file(&path, &render_extensions(php))
}

/// Write `ADDITIONAL_PREPROCESS_CMDS` to `.profile.d/additional-cmds.sh`, one per line
pub fn migrate_additional_commands(app_root: &Path, php: &PhpOptions) -> Result<(), CompatError> {
    let mut script = String::new();
    for command in &php.additional_preprocess_commands {
        script.push_str(command);
        script.push('\n');
    }

    write_file(&app_root.join(PROFILE_DIR).join(COMMANDS_FILE), &script)
}
