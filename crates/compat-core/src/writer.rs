//! `buildpack.yml` serialization

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::CompatError;
use crate::fsutil::file_exists;
use crate::options::Options;

pub const BUILDPACK_YML: &str = "buildpack.yml";

pub fn buildpack_yml_path(app_root: &Path) -> PathBuf {
    app_root.join(BUILDPACK_YML)
}

/// Error returned when both the legacy and new configuration are present
pub(crate) fn conflicting_config() -> CompatError {
    CompatError::ConflictingConfig(
        "you cannot have both `.bp-config/options.json` and `buildpack.yml`".to_string(),
    )
}

/// Write `options` to `<app_root>/buildpack.yml`
///
/// Refuses to replace an existing file.
pub fn write_buildpack_yml(app_root: &Path, options: &Options) -> Result<(), CompatError> {
    let path = buildpack_yml_path(app_root);
    if file_exists(&path)? {
        return Err(conflicting_config());
    }

    let yaml = serde_yaml::to_string(options).map_err(|source| CompatError::ConfigSerialize { source })?;

    fs::write(&path, yaml).map_err(|source| CompatError::ConfigWrite { path, source })
}

/// Read `<app_root>/buildpack.yml` back into options
pub fn read_buildpack_yml(app_root: &Path) -> Result<Options, CompatError> {
    let path = buildpack_yml_path(app_root);
    let contents = fs::read_to_string(&path).map_err(|source| CompatError::ConfigRead {
        path: path.clone(),
        source,
    })?;

    serde_yaml::from_str(&contents).map_err(|source| CompatError::BuildpackYmlParse { path, source })
}
