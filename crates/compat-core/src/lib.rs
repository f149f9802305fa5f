//! php-compat-core: Migration of legacy PHP buildpack configuration
//!
//! This crate provides:
//! - `load_options()`: Decode `.bp-config/options.json` into `Options`
//! - `error_on_custom_server_config()`: Reject unsupported server config files
//! - `migrate_php_snippets()`: Copy ini/fpm snippets to their new folders
//! - `migrate_extensions()`: Generate `.php.ini.d/compat-extensions.ini`
//! - `move_web_files_to_web_dir()`: Relocate app files into the web root
//! - `write_buildpack_yml()`: Serialize the migrated options
//! - `Contributor`: Sequences the steps above for one build

pub mod contributor;
mod error;
pub mod extensions;
mod fsutil;
pub mod options;
pub mod outcome;
pub mod plan;
pub mod snippets;
pub mod validate;
pub mod webroot;
pub mod writer;

pub use contributor::{Contributor, Phase, LAYER};
pub use error::CompatError;
pub use extensions::{migrate_additional_commands, migrate_extensions};
pub use options::{load_options, ComposerOptions, HttpdOptions, NginxOptions, Options, PhpOptions};
pub use outcome::{CollectingReporter, Notice, Outcome, Reporter, Severity};
pub use plan::{wants_migration, BuildPlan};
pub use snippets::migrate_php_snippets;
pub use validate::error_on_custom_server_config;
pub use webroot::{move_web_files_to_web_dir, RESERVED_PATHS};
pub use writer::{read_buildpack_yml, write_buildpack_yml};
