//! Step outcomes and the sink that displays them
//!
//! Steps never print. A step that succeeds returns an [`Outcome`]; a step that
//! fails returns a [`CompatError`](crate::CompatError). The contributor turns
//! outcomes into [`Notice`]s and hands them to a [`Reporter`].

/// Result of a migration step that did not fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing worth telling the user
    Proceed,
    /// Migration continues, but the user should know about it
    Warn(String),
}

impl Outcome {
    pub fn is_warning(&self) -> bool {
        matches!(self, Outcome::Warn(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
}

/// A message produced while migrating
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub severity: Severity,
    pub message: String,
}

/// Receives notices as the migration progresses
pub trait Reporter {
    fn report(&mut self, notice: Notice);

    fn info(&mut self, message: &str) {
        self.report(Notice {
            severity: Severity::Info,
            message: message.to_string(),
        });
    }

    fn warning(&mut self, message: &str) {
        self.report(Notice {
            severity: Severity::Warning,
            message: message.to_string(),
        });
    }

    /// Forward an outcome, dropping `Proceed`
    fn outcome(&mut self, outcome: Outcome) {
        if let Outcome::Warn(message) = outcome {
            self.warning(&message);
        }
    }
}

/// Reporter that keeps every notice in memory
#[derive(Debug, Default)]
pub struct CollectingReporter {
    pub notices: Vec<Notice>,
}

impl CollectingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warnings(&self) -> Vec<&str> {
        self.notices
            .iter()
            .filter(|n| n.severity == Severity::Warning)
            .map(|n| n.message.as_str())
            .collect()
    }
}

impl Reporter for CollectingReporter {
    fn report(&mut self, notice: Notice) {
        self.notices.push(notice);
    }
}
