use anyhow::Result;
use std::io::Write;

use crate::builders::validator::ValidationReport;
use crate::core::error::SectionError;

/// The `StatusReporter` trait turns validation outcomes into user output.
///
/// Results (section names, orphaned marker lines) and diagnostics (headers,
/// failures) go to two different writers so that results can be redirected
/// on their own.
pub trait StatusReporter {
    /// Prints the report and returns whether the file passed validation.
    fn report_validation(
        &self,
        report: &ValidationReport,
        results: &mut dyn Write,
        diagnostics: &mut dyn Write,
    ) -> Result<bool>;

    /// Prints the fatal diagnostic for a nested section.
    fn report_nested(&self, error: &SectionError, diagnostics: &mut dyn Write) -> Result<()>;
}

/// A concrete implementation of `StatusReporter` used by the command line.
pub struct ConsoleReporter;

impl ConsoleReporter {
    pub fn new() -> Self {
        Self
    }

    fn write_orphans(
        &self,
        orphans: &[String],
        results: &mut dyn Write,
        diagnostics: &mut dyn Write,
    ) -> Result<()> {
        if orphans.is_empty() {
            return Ok(());
        }
        writeln!(diagnostics)?;
        writeln!(diagnostics, "Sections without opening:")?;
        diagnostics.flush()?;
        for orphan in orphans {
            writeln!(results, "{orphan}")?;
        }
        results.flush()?;
        Ok(())
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusReporter for ConsoleReporter {
    fn report_validation(
        &self,
        report: &ValidationReport,
        results: &mut dyn Write,
        diagnostics: &mut dyn Write,
    ) -> Result<bool> {
        // An open section hides everything else.
        if let Some(open) = &report.unterminated {
            writeln!(
                diagnostics,
                "Could not find end of section '{}' (line {}).",
                open.name, open.line
            )?;
            return Ok(false);
        }

        if report.sections_found.is_empty() {
            writeln!(
                diagnostics,
                "No sections found. Please double check prefix and suffix."
            )?;
            self.write_orphans(&report.orphaned_ends, results, diagnostics)?;
            return Ok(false);
        }

        writeln!(diagnostics, "Sections found:")?;
        diagnostics.flush()?;
        for name in &report.sections_found {
            writeln!(results, "{name}")?;
        }
        results.flush()?;

        if !report.orphaned_ends.is_empty() {
            self.write_orphans(&report.orphaned_ends, results, diagnostics)?;
            return Ok(false);
        }

        Ok(true)
    }

    fn report_nested(&self, error: &SectionError, diagnostics: &mut dyn Write) -> Result<()> {
        writeln!(diagnostics, "{error}")?;
        writeln!(diagnostics, "Nested sections are not supported. Please fix them.")?;
        writeln!(diagnostics, "Aborting")?;
        Ok(())
    }
}
