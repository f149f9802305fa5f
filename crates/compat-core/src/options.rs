//! Legacy `options.json` loading
//!
//! The legacy file mixes the settings of four buildpacks in one flat JSON
//! object. Each sub-record is decoded independently from the same document,
//! so keys that belong to another sub-record are simply ignored.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::CompatError;
use crate::fsutil::file_exists;

/// Folder holding all legacy buildpack configuration
pub const LEGACY_CONFIG_DIR: &str = ".bp-config";

/// Name of the legacy options file inside [`LEGACY_CONFIG_DIR`]
pub const OPTIONS_FILE: &str = "options.json";

/// Every migratable setting, grouped as in `buildpack.yml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    pub httpd: HttpdOptions,
    pub php: PhpOptions,
    pub nginx: NginxOptions,
    pub composer: ComposerOptions,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhpOptions {
    #[serde(rename = "webserver")]
    pub web_server: String,
    pub version: String,
    #[serde(rename = "serveradmin")]
    pub admin_email: String,
    #[serde(rename = "script")]
    pub app_start_command: String,
    #[serde(rename = "webdirectory")]
    pub web_dir: String,
    #[serde(rename = "libdirectory")]
    pub lib_dir: String,
    /// Written to `.php.ini.d/compat-extensions.ini` instead
    #[serde(skip)]
    pub extensions: Vec<String>,
    #[serde(skip)]
    pub zend_extensions: Vec<String>,
    /// Written to `.profile.d/additional-cmds.sh` instead
    #[serde(skip)]
    pub additional_preprocess_commands: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpdOptions {
    pub version: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NginxOptions {
    pub version: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComposerOptions {
    pub version: String,
    /// Overwritten from `COMPOSER_PATH`, never read from `options.json`
    #[serde(rename = "json_path")]
    pub path: String,
    pub install_global: Vec<String>,
    pub install_options: Vec<String>,
    pub vendor_directory: String,
}

// Legacy key shapes. Fields are optional so JSON `null` decodes like a
// missing key.

#[derive(Deserialize)]
struct LegacyPhp {
    #[serde(rename = "WEB_SERVER")]
    web_server: Option<String>,
    #[serde(rename = "PHP_VERSION")]
    version: Option<String>,
    #[serde(rename = "ADMIN_EMAIL")]
    admin_email: Option<String>,
    #[serde(rename = "APP_START_CMD")]
    app_start_command: Option<String>,
    #[serde(rename = "WEBDIR")]
    web_dir: Option<String>,
    #[serde(rename = "LIBDIR")]
    lib_dir: Option<String>,
    #[serde(rename = "PHP_EXTENSIONS")]
    extensions: Option<Vec<String>>,
    #[serde(rename = "ZEND_EXTENSIONS")]
    zend_extensions: Option<Vec<String>>,
    #[serde(rename = "ADDITIONAL_PREPROCESS_CMDS")]
    additional_preprocess_commands: Option<Vec<String>>,
}

#[derive(Deserialize)]
struct LegacyHttpd {
    #[serde(rename = "HTTPD_VERSION")]
    version: Option<String>,
}

#[derive(Deserialize)]
struct LegacyNginx {
    #[serde(rename = "NGINX_VERSION")]
    version: Option<String>,
}

#[derive(Deserialize)]
struct LegacyComposer {
    #[serde(rename = "COMPOSER_VERSION")]
    version: Option<String>,
    #[serde(rename = "COMPOSER_INSTALL_GLOBAL")]
    install_global: Option<Vec<String>>,
    #[serde(rename = "COMPOSER_INSTALL_OPTIONS")]
    install_options: Option<Vec<String>>,
    #[serde(rename = "COMPOSER_VENDOR_DIR")]
    vendor_directory: Option<String>,
}

/// Path of the legacy options file for an application
pub fn options_path(app_root: &Path) -> PathBuf {
    app_root.join(LEGACY_CONFIG_DIR).join(OPTIONS_FILE)
}

/// Load `.bp-config/options.json`, or the default options if it is absent
pub fn load_options(app_root: &Path) -> Result<Options, CompatError> {
    let path = options_path(app_root);
    if !file_exists(&path)? {
        return Ok(Options::default());
    }

    let contents = fs::read_to_string(&path).map_err(|source| CompatError::ConfigRead {
        path: path.clone(),
        source,
    })?;

    parse_options(&contents).map_err(|source| CompatError::ConfigParse { path, source })
}

/// Decode all four sub-records from a raw `options.json` payload
pub fn parse_options(contents: &str) -> Result<Options, serde_json::Error> {
    let document: Value = serde_json::from_str(contents)?;

    Ok(Options {
        httpd: httpd_options(&document)?,
        php: php_options(&document)?,
        nginx: nginx_options(&document)?,
        composer: composer_options(&document)?,
    })
}

pub fn php_options(document: &Value) -> Result<PhpOptions, serde_json::Error> {
    let legacy = LegacyPhp::deserialize(document)?;
    Ok(PhpOptions {
        web_server: legacy.web_server.unwrap_or_default(),
        version: resolve_php_version(&legacy.version.unwrap_or_default()),
        admin_email: legacy.admin_email.unwrap_or_default(),
        app_start_command: legacy.app_start_command.unwrap_or_default(),
        web_dir: legacy.web_dir.unwrap_or_default(),
        lib_dir: legacy.lib_dir.unwrap_or_default(),
        extensions: legacy.extensions.unwrap_or_default(),
        zend_extensions: legacy.zend_extensions.unwrap_or_default(),
        additional_preprocess_commands: legacy.additional_preprocess_commands.unwrap_or_default(),
    })
}

pub fn httpd_options(document: &Value) -> Result<HttpdOptions, serde_json::Error> {
    let legacy = LegacyHttpd::deserialize(document)?;
    Ok(HttpdOptions {
        version: legacy.version.unwrap_or_default(),
    })
}

pub fn nginx_options(document: &Value) -> Result<NginxOptions, serde_json::Error> {
    let legacy = LegacyNginx::deserialize(document)?;
    Ok(NginxOptions {
        version: legacy.version.unwrap_or_default(),
    })
}

pub fn composer_options(document: &Value) -> Result<ComposerOptions, serde_json::Error> {
    let legacy = LegacyComposer::deserialize(document)?;
    Ok(ComposerOptions {
        version: legacy.version.unwrap_or_default(),
        path: String::new(),
        install_global: legacy.install_global.unwrap_or_default(),
        install_options: legacy.install_options.unwrap_or_default(),
        vendor_directory: legacy.vendor_directory.unwrap_or_default(),
    })
}

/// Replace legacy PHP version placeholders
///
/// `{PHP_DEFAULT}` becomes an empty string (use the buildpack default) and
/// `{PHP_7x_LATEST}` becomes a `7.x.*` wildcard. Other values pass through.
pub fn resolve_php_version(version: &str) -> String {
    match version {
        "{PHP_DEFAULT}" => String::new(),
        "{PHP_71_LATEST}" => "7.1.*".to_string(),
        "{PHP_72_LATEST}" => "7.2.*".to_string(),
        "{PHP_73_LATEST}" => "7.3.*".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const FULL_OPTIONS: &str = r#"{
        "WEB_SERVER": "httpd",
        "HTTPD_VERSION": "2.4.39",
        "PHP_VERSION": "7.3.10",
        "NGINX_VERSION": "1.14.3",
        "COMPOSER_VERSION": "1.9.0",
        "ADDITIONAL_PREPROCESS_CMDS": ["some-command", "another-command"],
        "COMPOSER_INSTALL_GLOBAL": ["global1", "global2", "global3"],
        "COMPOSER_INSTALL_OPTIONS": ["install1", "install2", "install3"],
        "COMPOSER_VENDOR_DIR": "vendor"
    }"#;

    fn write_options(app_root: &Path, contents: &str) {
        let dir = app_root.join(LEGACY_CONFIG_DIR);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(OPTIONS_FILE), contents).unwrap();
    }

    #[test]
    fn test_load_php_options() {
        let temp = TempDir::new().unwrap();
        write_options(temp.path(), FULL_OPTIONS);

        let options = load_options(temp.path()).unwrap();

        assert_eq!(options.php.web_server, "httpd");
        assert_eq!(options.php.version, "7.3.10");
        assert_eq!(
            options.php.additional_preprocess_commands,
            vec!["some-command".to_string(), "another-command".to_string()]
        );
    }

    #[test]
    fn test_load_server_options() {
        let temp = TempDir::new().unwrap();
        write_options(temp.path(), FULL_OPTIONS);

        let options = load_options(temp.path()).unwrap();

        assert_eq!(options.httpd.version, "2.4.39");
        assert_eq!(options.nginx.version, "1.14.3");
    }

    #[test]
    fn test_load_composer_options() {
        let temp = TempDir::new().unwrap();
        write_options(temp.path(), FULL_OPTIONS);

        let options = load_options(temp.path()).unwrap();

        assert_eq!(options.composer.version, "1.9.0");
        assert_eq!(options.composer.install_global, vec!["global1", "global2", "global3"]);
        assert_eq!(options.composer.install_options, vec!["install1", "install2", "install3"]);
        assert_eq!(options.composer.vendor_directory, "vendor");
        assert!(options.composer.path.is_empty());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        assert_eq!(load_options(temp.path()).unwrap(), Options::default());
    }

    #[test]
    fn test_empty_object_gives_defaults() {
        let temp = TempDir::new().unwrap();
        write_options(temp.path(), "{}");
        assert_eq!(load_options(temp.path()).unwrap(), Options::default());
    }

    #[test]
    fn test_null_fields_are_zero_values() {
        let options = parse_options(r#"{"PHP_VERSION": null, "PHP_EXTENSIONS": null}"#).unwrap();
        assert_eq!(options, Options::default());
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let options = parse_options(r#"{"SOMETHING_ELSE": [1, 2], "NGINX_VERSION": "1.17.0"}"#).unwrap();
        assert_eq!(options.nginx.version, "1.17.0");
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let temp = TempDir::new().unwrap();
        write_options(temp.path(), "{ not json");

        let err = load_options(temp.path()).unwrap_err();
        assert!(matches!(err, CompatError::ConfigParse { .. }));
    }

    #[test]
    fn test_wrong_field_type_is_parse_error() {
        let temp = TempDir::new().unwrap();
        write_options(temp.path(), r#"{"PHP_EXTENSIONS": "bz2"}"#);

        let err = load_options(temp.path()).unwrap_err();
        assert!(matches!(err, CompatError::ConfigParse { .. }));
    }

    #[test]
    fn test_non_object_is_parse_error() {
        assert!(parse_options("[1, 2, 3]").is_err());
    }

    #[test]
    fn test_unreadable_file_is_read_error() {
        let temp = TempDir::new().unwrap();
        // A directory where the file should be cannot be read as a string
        fs::create_dir_all(options_path(temp.path())).unwrap();

        let err = load_options(temp.path()).unwrap_err();
        assert!(matches!(err, CompatError::ConfigRead { .. }));
    }

    #[test]
    fn test_php_version_placeholders() {
        let cases = [
            ("{PHP_DEFAULT}", ""),
            ("{PHP_71_LATEST}", "7.1.*"),
            ("{PHP_72_LATEST}", "7.2.*"),
            ("{PHP_73_LATEST}", "7.3.*"),
            ("7.2.14", "7.2.14"),
            ("{PHP_74_LATEST}", "{PHP_74_LATEST}"),
        ];

        for (input, expected) in cases {
            let json = format!(r#"{{"PHP_VERSION": "{}"}}"#, input);
            let options = parse_options(&json).unwrap();
            assert_eq!(options.php.version, expected, "placeholder {}", input);
        }
    }
}
