//! Output formatting for php-compat
//!
//! Supports text (colored terminal) and JSON output formats.

use colored::*;
use php_compat_core::{Notice, Reporter, Severity};
use serde::Serialize;

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Option<OutputFormat> {
        match s.to_lowercase().as_str() {
            "text" => Some(OutputFormat::Text),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NoticeInfo {
    pub severity: &'static str,
    pub message: String,
}

/// Full JSON output structure
#[derive(Debug, Serialize)]
pub struct JsonOutput {
    pub version: String,
    pub contributed: bool,
    pub notices: Vec<NoticeInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Prints migration notices as they arrive
pub struct ConsoleReporter {
    format: OutputFormat,
    verbose: bool,
    notices: Vec<NoticeInfo>,
}

impl ConsoleReporter {
    pub fn new(format: OutputFormat, verbose: bool) -> Self {
        Self {
            format,
            verbose,
            notices: Vec::new(),
        }
    }

    /// Buildpack title line
    pub fn title(&self, name: &str, version: &str) {
        if self.format == OutputFormat::Text {
            eprintln!("{} {}", name.bold(), version);
        }
    }

    pub fn warning_count(&self) -> usize {
        self.notices.iter().filter(|n| n.severity == "warning").count()
    }

    /// Print the final summary, or the JSON document
    pub fn finish(self, contributed: bool, error: Option<String>) {
        match self.format {
            OutputFormat::Text => {
                if let Some(error) = &error {
                    eprintln!("{}: {}", "Error".red(), error);
                } else if contributed && self.verbose {
                    eprintln!(
                        "  {} Migration complete ({} warning(s))",
                        "OK".green(),
                        self.warning_count()
                    );
                } else if !contributed && self.verbose {
                    eprintln!("  php-compat not requested, skipping");
                }
            }
            OutputFormat::Json => {
                let output = JsonOutput {
                    version: env!("CARGO_PKG_VERSION").to_string(),
                    contributed,
                    notices: self.notices,
                    error,
                };
                match serde_json::to_string_pretty(&output) {
                    Ok(json) => println!("{}", json),
                    Err(e) => eprintln!("{}: {}", "Error".red(), e),
                }
            }
        }
    }
}

impl Reporter for ConsoleReporter {
    fn report(&mut self, notice: Notice) {
        let severity = match notice.severity {
            Severity::Info => "info",
            Severity::Warning => "warning",
        };

        if self.format == OutputFormat::Text {
            match notice.severity {
                Severity::Warning => eprintln!("  {}: {}", "Warning".yellow(), notice.message),
                Severity::Info if self.verbose => eprintln!("  {} {}", "->".green(), notice.message),
                Severity::Info => {}
            }
        }

        self.notices.push(NoticeInfo {
            severity,
            message: notice.message,
        });
    }
}
