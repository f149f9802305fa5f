//! Build context for php-compat
//!
//! Resolves the application root, loads the buildpack plan and captures the
//! environment the migration needs.

use anyhow::{Context, Result};
use php_compat_core::BuildPlan;
use std::path::{Path, PathBuf};

/// Environment variable carrying the composer.json location
pub const COMPOSER_PATH_ENV: &str = "COMPOSER_PATH";

/// Everything the build needs from its surroundings
#[derive(Debug)]
pub struct BuildContext {
    pub app_root: PathBuf,
    pub plan: BuildPlan,
    pub composer_path: Option<String>,
}

impl BuildContext {
    /// Build a context from the current process environment
    pub fn from_env(app_root: Option<&Path>, plan_path: Option<&Path>) -> Result<Self> {
        let app_root = match app_root {
            Some(root) => root.to_path_buf(),
            None => std::env::current_dir().context("Failed to determine application root")?,
        };

        Self::new(app_root, plan_path, std::env::var(COMPOSER_PATH_ENV).ok())
    }

    /// Build a context with an explicit composer path
    pub fn new(app_root: PathBuf, plan_path: Option<&Path>, composer_path: Option<String>) -> Result<Self> {
        let app_root = app_root
            .canonicalize()
            .with_context(|| format!("Failed to resolve application root {}", app_root.display()))?;

        let plan = match plan_path {
            Some(path) => BuildPlan::load(path)
                .with_context(|| format!("Failed to load buildpack plan {}", path.display()))?,
            None => BuildPlan::default(),
        };

        Ok(Self {
            app_root,
            plan,
            composer_path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_context_with_plan() {
        let temp = TempDir::new().unwrap();
        let plan_path = temp.path().join("plan.toml");
        fs::write(&plan_path, "[[entries]]\nname = \"php-compat\"\n").unwrap();

        let ctx = BuildContext::new(temp.path().to_path_buf(), Some(&plan_path), Some("app".to_string())).unwrap();

        assert!(php_compat_core::wants_migration(&ctx.plan));
        assert_eq!(ctx.composer_path.as_deref(), Some("app"));
        assert_eq!(ctx.app_root, temp.path().canonicalize().unwrap());
    }

    #[test]
    fn test_context_without_plan() {
        let temp = TempDir::new().unwrap();
        let ctx = BuildContext::new(temp.path().to_path_buf(), None, None).unwrap();
        assert!(ctx.plan.entries.is_empty());
    }

    #[test]
    fn test_missing_app_root() {
        let temp = TempDir::new().unwrap();
        assert!(BuildContext::new(temp.path().join("missing"), None, None).is_err());
    }

    #[test]
    fn test_broken_plan() {
        let temp = TempDir::new().unwrap();
        let plan_path = temp.path().join("plan.toml");
        fs::write(&plan_path, "entries = 3").unwrap();

        assert!(BuildContext::new(temp.path().to_path_buf(), Some(&plan_path), None).is_err());
    }
}
