use crate::builders::patterns::MarkerMatcher;
use crate::core::error::SectionError;

/// Looks up single sections by name.
///
/// Every lookup scans from the first line again, so the extractor keeps no
/// state between calls and asking twice for the same section gives the same
/// lines.
pub struct SectionExtractor<'a> {
    matcher: &'a dyn MarkerMatcher,
}

impl<'a> SectionExtractor<'a> {
    pub fn new(matcher: &'a dyn MarkerMatcher) -> Self {
        Self { matcher }
    }

    /// Returns the lines of section `name`, from its begin marker through its
    /// end marker inclusive.
    ///
    /// # Arguments
    /// * `name`: The exact section name.
    /// * `lines`: The whole input, one entry per line with its newline.
    ///
    /// # Returns
    /// The borrowed lines of the section, or:
    /// * `SectionError::NotFound` when no line is the begin marker of `name`.
    /// * `SectionError::Unterminated` when the input ends before its end marker.
    /// * `SectionError::Empty` when the section holds nothing but its two
    ///   marker lines (blank lines in between do not count as content).
    pub fn extract_section<'l>(
        &self,
        name: &str,
        lines: &'l [String],
    ) -> Result<Vec<&'l str>, SectionError> {
        let start = lines
            .iter()
            .position(|line| self.matcher.is_begin_of(line, name))
            .ok_or_else(|| SectionError::NotFound(name.to_string()))?;

        let end = lines[start + 1..]
            .iter()
            .position(|line| self.matcher.is_end_of(line, name))
            .map(|offset| start + 1 + offset)
            .ok_or_else(|| SectionError::Unterminated(name.to_string()))?;

        let content: Vec<&str> = lines[start..=end].iter().map(String::as_str).collect();

        let non_blank = content.iter().filter(|line| !line.trim().is_empty()).count();
        if non_blank == 2 {
            return Err(SectionError::Empty(name.to_string()));
        }

        log::debug!(
            "Section '{name}' spans lines {}-{} ({} lines)",
            start + 1,
            end + 1,
            content.len()
        );
        Ok(content)
    }
}
