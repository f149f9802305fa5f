//! The migration pipeline for one build
//!
//! ```text
//! load options -> composer path -> validate HTTPD -> validate Nginx
//!   -> relocate web root -> ini snippets -> fpm snippets
//!   -> extensions -> additional commands -> buildpack.yml
//! ```
//!
//! The first failing step stops the pipeline. Nothing is rolled back.

use std::path::{Path, PathBuf};

use crate::error::CompatError;
use crate::extensions::{migrate_additional_commands, migrate_extensions, INI_SNIPPET_DIR};
use crate::fsutil::file_exists;
use crate::options::{load_options, options_path, Options};
use crate::outcome::{Outcome, Reporter};
use crate::plan::{wants_migration, BuildPlan};
use crate::snippets::migrate_php_snippets;
use crate::validate::error_on_custom_server_config;
use crate::webroot::move_web_files_to_web_dir;
use crate::writer::{buildpack_yml_path, conflicting_config, write_buildpack_yml};

/// Build plan entry that requests this migration
pub const LAYER: &str = "php-compat";

/// Where a build failed, for exit code mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Reading the build context (app root, plan)
    Context,
    /// Creating the contributor
    Contributor,
    /// Running the migration
    Contribution,
}

impl Phase {
    pub fn exit_code(self) -> u8 {
        match self {
            Phase::Context => 101,
            Phase::Contributor => 102,
            Phase::Contribution => 103,
        }
    }
}

/// Migrates one application
#[derive(Debug, Clone)]
pub struct Contributor {
    app_root: PathBuf,
    composer_path: String,
}

impl Contributor {
    /// Create a contributor if the plan asks for the migration
    ///
    /// Returns `Ok(None)` when the build did not request `php-compat`.
    pub fn new(app_root: &Path, plan: &BuildPlan) -> Result<Option<Self>, CompatError> {
        if !wants_migration(plan) {
            return Ok(None);
        }

        if !app_root.is_dir() {
            return Err(CompatError::fs(
                app_root,
                std::io::Error::new(std::io::ErrorKind::NotFound, "application root is not a directory"),
            ));
        }

        Ok(Some(Self {
            app_root: app_root.to_path_buf(),
            composer_path: String::new(),
        }))
    }

    /// Value of `COMPOSER_PATH`; unset clears `composer.json_path`
    pub fn with_composer_path(mut self, composer_path: Option<String>) -> Self {
        self.composer_path = composer_path.unwrap_or_default();
        self
    }

    pub fn app_root(&self) -> &Path {
        &self.app_root
    }

    /// Run the whole migration
    pub fn contribute(&self, reporter: &mut dyn Reporter) -> Result<(), CompatError> {
        let root = self.app_root.as_path();

        if file_exists(&options_path(root))? && file_exists(&buildpack_yml_path(root))? {
            return Err(conflicting_config());
        }

        reporter.info("Loading .bp-config/options.json");
        let mut options = load_options(root)?;
        reporter.outcome(check_composer_version(&mut options));
        reporter.outcome(check_vendor_directory(root)?);
        options.composer.path = self.composer_path.clone();

        reporter.info("Checking for custom web server configuration");
        error_on_custom_server_config(root, "HTTPD", "httpd", ".conf")?;
        error_on_custom_server_config(root, "Nginx", "nginx", ".conf")?;

        reporter.info("Relocating web files");
        reporter.outcome(move_web_files_to_web_dir(root, &options.php)?);

        reporter.info("Migrating configuration snippets");
        reporter.outcome(migrate_php_snippets(root, "PHP INI", "php.ini.d", INI_SNIPPET_DIR, "ini")?);
        reporter.outcome(migrate_php_snippets(root, "PHP-FPM", "fpm.d", ".php.fpm.d", "conf")?);

        reporter.info("Writing extensions and preprocess commands");
        migrate_extensions(root, &options.php)?;
        migrate_additional_commands(root, &options.php)?;

        reporter.info("Writing buildpack.yml");
        write_buildpack_yml(root, &options)
    }
}

/// `COMPOSER_VERSION: latest` is dropped in favor of the buildpack default
fn check_composer_version(options: &mut Options) -> Outcome {
    if !options.composer.version.eq_ignore_ascii_case("latest") {
        return Outcome::Proceed;
    }

    options.composer.version.clear();
    Outcome::Warn(
        "Specifying a version of 'latest' is no longer supported. The default version of the php-composer-cnb will be used instead."
            .to_string(),
    )
}

fn check_vendor_directory(app_root: &Path) -> Result<Outcome, CompatError> {
    if !file_exists(&app_root.join("composer.json"))? {
        return Ok(Outcome::Proceed);
    }

    Ok(Outcome::Warn(
        "The vendor directory is no longer migrated to LIBDIR. Set COMPOSER_VENDOR_DIR if your app expects a different location."
            .to_string(),
    ))
}
