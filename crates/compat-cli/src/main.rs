//! php-compat CLI - migrates legacy PHP buildpack configuration
//!
//! Runs as the build step of the php-compat buildpack. When the buildpack
//! plan requests `php-compat`, the application's `.bp-config` settings are
//! converted to `buildpack.yml` and the new snippet folders.
//!
//! Exit codes:
//! - 0: migrated, or migration not requested
//! - 101: build context could not be created
//! - 102: contributor could not be created
//! - 103: migration failed

mod context;
mod output;

use anyhow::Result;
use clap::Parser;
use colored::*;
use std::path::PathBuf;
use std::process::ExitCode;

use context::BuildContext;
use output::{ConsoleReporter, OutputFormat};
use php_compat_core::{Contributor, Phase};

#[derive(Parser)]
#[command(name = "php-compat")]
#[command(version)]
#[command(about = "Migrates legacy PHP buildpack configuration to buildpack.yml")]
struct Cli {
    /// Layers directory (unused, accepted for the buildpack build contract)
    layers: Option<PathBuf>,

    /// Platform directory (unused, accepted for the buildpack build contract)
    platform: Option<PathBuf>,

    /// Buildpack plan
    plan: Option<PathBuf>,

    /// Application root (default: current directory)
    #[arg(long, value_name = "PATH")]
    app_root: Option<PathBuf>,

    /// Buildpack plan, overrides the positional argument
    #[arg(long = "plan", value_name = "PATH")]
    plan_file: Option<PathBuf>,

    /// Show each migration step
    #[arg(long, short = 'v')]
    verbose: bool,

    /// Output format: text, json
    #[arg(long, value_name = "FORMAT", default_value = "text")]
    format: String,

    /// Shorthand for --format json
    #[arg(long, conflicts_with = "format")]
    json: bool,
}

/// A failed build and the phase it failed in
struct BuildFailure {
    phase: Phase,
    error: anyhow::Error,
}

impl BuildFailure {
    fn new(phase: Phase, error: impl Into<anyhow::Error>) -> Self {
        Self {
            phase,
            error: error.into(),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let output_format = if cli.json {
        OutputFormat::Json
    } else {
        match OutputFormat::from_str(&cli.format) {
            Some(format) => format,
            None => {
                eprintln!(
                    "{}: Invalid output format '{}'. Valid options: text, json",
                    "Error".red(),
                    cli.format
                );
                return ExitCode::from(Phase::Context.exit_code());
            }
        }
    };

    let mut reporter = ConsoleReporter::new(output_format, cli.verbose);
    reporter.title("PHP Compat Buildpack", env!("CARGO_PKG_VERSION"));

    match run(&cli, &mut reporter) {
        Ok(contributed) => {
            reporter.finish(contributed, None);
            ExitCode::SUCCESS
        }
        Err(failure) => {
            let contributed = failure.phase == Phase::Contribution;
            reporter.finish(contributed, Some(format!("{:#}", failure.error)));
            ExitCode::from(failure.phase.exit_code())
        }
    }
}

/// Returns whether the migration ran
fn run(cli: &Cli, reporter: &mut ConsoleReporter) -> Result<bool, BuildFailure> {
    let plan_path = cli.plan_file.as_deref().or(cli.plan.as_deref());
    let ctx = BuildContext::from_env(cli.app_root.as_deref(), plan_path)
        .map_err(|e| BuildFailure::new(Phase::Context, e))?;

    let contributor = match Contributor::new(&ctx.app_root, &ctx.plan)
        .map_err(|e| BuildFailure::new(Phase::Contributor, e))?
    {
        Some(contributor) => contributor.with_composer_path(ctx.composer_path.clone()),
        None => return Ok(false),
    };

    contributor
        .contribute(reporter)
        .map_err(|e| BuildFailure::new(Phase::Contribution, e))?;

    Ok(true)
}
