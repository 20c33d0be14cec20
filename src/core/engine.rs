use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::builders::assembler;
use crate::builders::extractor::SectionExtractor;
use crate::builders::patterns::SectionMarkers;
use crate::builders::validator::{SectionValidator, StandardValidator, ValidationReport};
use crate::core::config::SectionDelimiters;
use crate::core::error::{InputError, SectionError};

/// Holds one input file, split into lines, together with the markers used to
/// read it. Every operation works on this in-memory copy.
pub struct SectionEngine {
    markers: SectionMarkers,
    lines: Vec<String>,
}

impl SectionEngine {
    /// Builds an engine over `content`. Lines keep their trailing newline and
    /// CRLF endings are read as LF.
    pub fn new(delimiters: &SectionDelimiters, content: &str) -> Result<Self> {
        let markers = SectionMarkers::new(delimiters)?;
        let lines = split_lines(content);
        log::debug!("Loaded {} lines", lines.len());
        Ok(Self { markers, lines })
    }

    /// Reads the whole input file and builds an engine over it.
    pub fn from_file(path: &Path, delimiters: &SectionDelimiters) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| InputError {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Read {} bytes from {}", content.len(), path.display());
        Self::new(delimiters, &content)
    }

    /// Runs the integrity scan. Nesting comes back as `Err`, every other
    /// problem is part of the returned report.
    pub fn validate(&self) -> Result<ValidationReport, SectionError> {
        StandardValidator::new(&self.markers).validate(&self.lines)
    }

    /// Returns the lines of one section, markers included.
    pub fn extract_section(&self, name: &str) -> Result<Vec<&str>, SectionError> {
        SectionExtractor::new(&self.markers).extract_section(name, &self.lines)
    }

    /// Assembles the requested sections in order.
    ///
    /// Nested sections make the file unusable, so they are checked for first
    /// and abort extraction just like they abort validation.
    pub fn extract<S: AsRef<str>>(&self, names: &[S]) -> Result<String, SectionError> {
        self.validate()?;
        let extractor = SectionExtractor::new(&self.markers);
        assembler::assemble(&extractor, names, &self.lines)
    }
}

fn split_lines(content: &str) -> Vec<String> {
    content
        .split_inclusive('\n')
        .map(|line| match line.strip_suffix("\r\n") {
            Some(stripped) => format!("{stripped}\n"),
            None => line.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_lines_keeps_newlines() {
        assert_eq!(split_lines("a\nb\n"), vec!["a\n", "b\n"]);
        assert_eq!(split_lines("a\nb"), vec!["a\n", "b"]);
        assert!(split_lines("").is_empty());
    }

    #[test]
    fn test_split_lines_normalizes_crlf() {
        assert_eq!(split_lines("a\r\nb\r\n"), vec!["a\n", "b\n"]);
    }

    #[test]
    fn test_extract_aborts_on_nesting_even_for_unrelated_sections() {
        let engine = SectionEngine::new(
            &SectionDelimiters::default(),
            "### [BEGIN ok]\nx\n### [END ok]\n### [BEGIN a]\n### [BEGIN b]\n",
        )
        .unwrap();

        assert!(engine.extract(&["ok"]).unwrap_err().is_fatal());
        // Single lookups stay usable for callers that want them.
        assert_eq!(engine.extract_section("ok").unwrap().len(), 3);
    }
}
