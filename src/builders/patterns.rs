use anyhow::{Context, Result};
use regex::Regex;

use crate::core::config::SectionDelimiters;

/// The `MarkerMatcher` trait defines how marker lines are recognised.
///
/// The validator works with *generic* markers (any section name), while the
/// extractor only ever asks whether a line is exactly the marker of one named
/// section.
pub trait MarkerMatcher {
    /// Returns the section name if `line` is a begin marker for any section.
    fn generic_begin<'a>(&self, line: &'a str) -> Option<&'a str>;

    /// Returns the section name if `line` is an end marker for any section.
    fn generic_end<'a>(&self, line: &'a str) -> Option<&'a str>;

    /// Checks whether `line` is exactly the begin marker of `name`.
    ///
    /// This is a full string comparison, so `foo` never matches the marker of
    /// `foobar`.
    fn is_begin_of(&self, line: &str, name: &str) -> bool;

    /// Checks whether `line` is exactly the end marker of `name`.
    fn is_end_of(&self, line: &str, name: &str) -> bool;
}

/// Marker recognition for one `SectionDelimiters` value.
///
/// The generic patterns are compiled once from the escaped delimiters, so a
/// delimiter like `[[` or `.*` is compared literally and never interpreted as
/// regex syntax.
#[derive(Debug, Clone)]
pub struct SectionMarkers {
    delimiters: SectionDelimiters,
    generic_begin: Regex,
    generic_end: Regex,
}

impl SectionMarkers {
    /// Compiles the generic begin/end patterns for the given delimiters.
    ///
    /// # Arguments
    /// * `delimiters`: The prefix and suffix strings of begin and end markers.
    ///
    /// # Returns
    /// `Result<Self>`, failing only when the delimiters themselves are invalid
    /// (a suffix that does not end the line).
    pub fn new(delimiters: &SectionDelimiters) -> Result<Self> {
        delimiters.validate()?;
        let generic_begin =
            Self::generic_pattern(&delimiters.begin_prefix, &delimiters.begin_suffix)
                .context("Invalid begin marker delimiters")?;
        let generic_end = Self::generic_pattern(&delimiters.end_prefix, &delimiters.end_suffix)
            .context("Invalid end marker delimiters")?;

        Ok(Self {
            delimiters: delimiters.clone(),
            generic_begin,
            generic_end,
        })
    }

    // `prefix`, a non-empty name on a single line, then `suffix`, covering the
    // whole line.
    fn generic_pattern(prefix: &str, suffix: &str) -> Result<Regex> {
        let pattern = format!(r"\A{}(.+){}\z", regex::escape(prefix), regex::escape(suffix));
        Ok(Regex::new(&pattern)?)
    }

    fn capture_name<'a>(regex: &Regex, line: &'a str) -> Option<&'a str> {
        regex
            .captures(line)
            .and_then(|captures| captures.get(1))
            .map(|name| name.as_str())
    }

    fn is_exact(line: &str, prefix: &str, name: &str, suffix: &str) -> bool {
        line.strip_prefix(prefix)
            .and_then(|rest| rest.strip_suffix(suffix))
            == Some(name)
    }
}

impl MarkerMatcher for SectionMarkers {
    fn generic_begin<'a>(&self, line: &'a str) -> Option<&'a str> {
        Self::capture_name(&self.generic_begin, line)
    }

    fn generic_end<'a>(&self, line: &'a str) -> Option<&'a str> {
        Self::capture_name(&self.generic_end, line)
    }

    fn is_begin_of(&self, line: &str, name: &str) -> bool {
        Self::is_exact(
            line,
            &self.delimiters.begin_prefix,
            name,
            &self.delimiters.begin_suffix,
        )
    }

    fn is_end_of(&self, line: &str, name: &str) -> bool {
        Self::is_exact(
            line,
            &self.delimiters.end_prefix,
            name,
            &self.delimiters.end_suffix,
        )
    }
}
