//! Buildpack plan handling
//!
//! The detect phase records which capabilities the build needs as a TOML
//! plan with one `[[entries]]` table per requirement.

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::contributor::LAYER;
use crate::error::CompatError;
use crate::fsutil::file_exists;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BuildPlan {
    pub entries: Vec<PlanEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PlanEntry {
    pub name: String,
    pub version: Option<String>,
}

impl BuildPlan {
    /// Plan requesting the given capabilities
    pub fn with_entries<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            entries: names
                .into_iter()
                .map(|name| PlanEntry {
                    name: name.into(),
                    version: None,
                })
                .collect(),
        }
    }

    /// Load a plan file. A missing file is an empty plan.
    pub fn load(path: &Path) -> Result<Self, CompatError> {
        if !file_exists(path)? {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(|source| CompatError::PlanRead {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&contents).map_err(|source| CompatError::PlanParse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn has(&self, name: &str) -> bool {
        self.entries.iter().any(|entry| entry.name == name)
    }
}

/// Whether the build asked for the `php-compat` migration
pub fn wants_migration(plan: &BuildPlan) -> bool {
    plan.has(LAYER)
}
