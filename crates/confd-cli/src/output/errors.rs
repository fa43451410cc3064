//! Rendering of resolver failures for the terminal.
//!
//! A report is a headline, an optional `-->` line naming the fragment at
//! fault, a `help` line, and the chain of underlying causes.

use super::colors::ColorSupport;
use confd_core::error::ConfdError;
use std::error::Error;
use std::fmt::Write;

use crate::commands::hint_for;

/// Turns errors into multi-line reports
pub struct ErrorFormatter {
    colors: ColorSupport,
}

impl ErrorFormatter {
    pub fn new() -> Self {
        Self {
            colors: ColorSupport::detect(),
        }
    }

    /// Build the full report for a resolver error
    pub fn format_error(&self, error: &ConfdError) -> String {
        let mut report = match error {
            // The path gets its own line, so the headline only keeps the parser message
            ConfdError::FragmentParse { path, message } => {
                let mut report = self.headline(&format!("Invalid JSON in fragment: {}", message));
                let _ = writeln!(report, "  {} {}", self.colors.dim("-->"), path);
                report
            }
            _ => self.headline(&error.to_string()),
        };

        // A specific hint replaces the generic suggestion
        if let Some(help) = hint_for(error).or_else(|| error.suggestion().map(str::to_string)) {
            let _ = writeln!(report, "  {} {}", self.colors.yellow("help:"), help);
        }

        let causes = causes_of(error);
        if !causes.is_empty() {
            let _ = writeln!(report, "\n{}", self.colors.dim("caused by:"));
            for (depth, cause) in causes.iter().enumerate() {
                let _ = writeln!(report, "  {}: {}", depth, cause);
            }
        }

        report.truncate(report.trim_end().len());
        report
    }

    /// Headline only, for errors that did not come from the resolver
    pub fn format_simple(&self, message: &str) -> String {
        let mut report = self.headline(message);
        report.truncate(report.trim_end().len());
        report
    }

    fn headline(&self, message: &str) -> String {
        format!("{} {}\n", self.colors.red("error:"), message)
    }
}

impl Default for ErrorFormatter {
    fn default() -> Self {
        Self::new()
    }
}

fn causes_of(error: &dyn Error) -> Vec<String> {
    std::iter::successors(error.source(), |cause: &&dyn Error| (*cause).source())
        .map(ToString::to_string)
        .collect()
}
