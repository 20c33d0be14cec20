use crate::builders::patterns::MarkerMatcher;
use crate::core::error::SectionError;

/// A section whose begin marker has been seen but not its end marker yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenSection {
    pub name: String,
    /// 1-based line number of the begin marker.
    pub line: usize,
}

/// Outcome of a full integrity scan that did not hit a nested section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// Names of properly closed sections, in the order they were encountered.
    pub sections_found: Vec<String>,
    /// Set when the input ended while a section was still open.
    pub unterminated: Option<OpenSection>,
    /// End marker lines (without their newline) seen while no section was open.
    pub orphaned_ends: Vec<String>,
}

impl ValidationReport {
    /// A file is valid when it has at least one section, every section is
    /// closed, and no end marker appears without its opening.
    pub fn is_valid(&self) -> bool {
        self.unterminated.is_none()
            && !self.sections_found.is_empty()
            && self.orphaned_ends.is_empty()
    }

    /// Human-readable list of everything that makes the file invalid.
    pub fn issues(&self) -> Vec<String> {
        let mut issues = Vec::new();
        if let Some(open) = &self.unterminated {
            issues.push(format!(
                "Could not find end of section '{}' (line {}).",
                open.name, open.line
            ));
        }
        if self.sections_found.is_empty() {
            issues.push("No sections found. Please double check prefix and suffix.".to_string());
        }
        for orphan in &self.orphaned_ends {
            issues.push(format!("Section without opening: {orphan}"));
        }
        issues
    }
}

/// The `SectionValidator` trait defines the integrity check run by `--test`.
pub trait SectionValidator {
    /// Scans `lines` once and reports what was found.
    ///
    /// # Returns
    /// `Ok(ValidationReport)` for any input without nesting, whether valid or
    /// not. `Err(SectionError::Nested)` as soon as a begin marker shows up
    /// inside an open section; the rest of the input is not looked at.
    fn validate(&self, lines: &[String]) -> Result<ValidationReport, SectionError>;
}

/// The `StandardValidator` tracks at most one open section at a time, since
/// sections may not nest.
pub struct StandardValidator<'a> {
    matcher: &'a dyn MarkerMatcher,
}

impl<'a> StandardValidator<'a> {
    pub fn new(matcher: &'a dyn MarkerMatcher) -> Self {
        Self { matcher }
    }
}

impl SectionValidator for StandardValidator<'_> {
    fn validate(&self, lines: &[String]) -> Result<ValidationReport, SectionError> {
        let mut report = ValidationReport::default();
        let mut open: Option<OpenSection> = None;

        for (index, line) in lines.iter().enumerate() {
            let line_number = index + 1;

            if let Some(name) = self.matcher.generic_begin(line) {
                match &open {
                    None => {
                        log::debug!("Section '{name}' opened at line {line_number}");
                        open = Some(OpenSection {
                            name: name.to_string(),
                            line: line_number,
                        });
                        continue;
                    }
                    Some(outer) => {
                        log::debug!(
                            "Section '{name}' at line {line_number} is nested in '{}'",
                            outer.name
                        );
                        return Err(SectionError::Nested {
                            outer: outer.name.clone(),
                            outer_line: outer.line,
                            inner: name.to_string(),
                            inner_line: line_number,
                        });
                    }
                }
            }

            match &open {
                Some(current) if self.matcher.is_end_of(line, &current.name) => {
                    log::debug!("Section '{}' closed at line {line_number}", current.name);
                    report.sections_found.push(current.name.clone());
                    open = None;
                }
                // An end marker of another section inside an open one is left alone.
                Some(_) => {}
                None => {
                    if self.matcher.generic_end(line).is_some() {
                        let orphan = line.strip_suffix('\n').unwrap_or(line.as_str());
                        log::debug!("End marker without opening at line {line_number}");
                        report.orphaned_ends.push(orphan.to_string());
                    }
                }
            }
        }

        report.unterminated = open;
        Ok(report)
    }
}
