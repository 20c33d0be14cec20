use crate::builders::extractor::SectionExtractor;
use crate::core::error::SectionError;

/// Joins the requested sections, in request order, into the final output.
///
/// Consecutive sections are separated by exactly one blank line and nothing
/// follows the last one. The first section that cannot be resolved aborts the
/// whole assembly, so a failure never yields partial output.
pub fn assemble<S: AsRef<str>>(
    extractor: &SectionExtractor<'_>,
    names: &[S],
    lines: &[String],
) -> Result<String, SectionError> {
    let mut output = String::new();

    for (index, name) in names.iter().enumerate() {
        let section = extractor.extract_section(name.as_ref(), lines)?;
        if index > 0 {
            output.push('\n');
        }
        output.extend(section);
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::patterns::SectionMarkers;
    use crate::core::config::SectionDelimiters;

    const RC: &str = "### [BEGIN foo]\nexport FOO=1\n### [END foo]\n\
                      unmanaged line\n\
                      ### [BEGIN bar]\nexport BAR=2\n### [END bar]\n";

    fn lines(text: &str) -> Vec<String> {
        text.split_inclusive('\n').map(str::to_string).collect()
    }

    #[test]
    fn test_single_section_has_no_trailing_blank_line() {
        let markers = SectionMarkers::new(&SectionDelimiters::default()).unwrap();
        let extractor = SectionExtractor::new(&markers);

        let output = assemble(&extractor, &["foo"], &lines(RC)).unwrap();
        assert_eq!(output, "### [BEGIN foo]\nexport FOO=1\n### [END foo]\n");
    }

    #[test]
    fn test_sections_separated_by_one_blank_line() {
        let markers = SectionMarkers::new(&SectionDelimiters::default()).unwrap();
        let extractor = SectionExtractor::new(&markers);

        let output = assemble(&extractor, &["bar", "foo"], &lines(RC)).unwrap();
        assert_eq!(
            output,
            "### [BEGIN bar]\nexport BAR=2\n### [END bar]\n\
             \n\
             ### [BEGIN foo]\nexport FOO=1\n### [END foo]\n"
        );
    }

    #[test]
    fn test_duplicate_requests_repeat_the_section() {
        let markers = SectionMarkers::new(&SectionDelimiters::default()).unwrap();
        let extractor = SectionExtractor::new(&markers);

        let output = assemble(&extractor, &["foo", "foo"], &lines(RC)).unwrap();
        let block = "### [BEGIN foo]\nexport FOO=1\n### [END foo]\n";
        assert_eq!(output, format!("{block}\n{block}"));
    }

    #[test]
    fn test_first_failure_is_propagated() {
        let markers = SectionMarkers::new(&SectionDelimiters::default()).unwrap();
        let extractor = SectionExtractor::new(&markers);

        let result = assemble(&extractor, &["foo", "missing", "bar"], &lines(RC));
        assert_eq!(result, Err(SectionError::NotFound("missing".to_string())));
    }

    #[test]
    fn test_empty_request_is_empty_output() {
        let markers = SectionMarkers::new(&SectionDelimiters::default()).unwrap();
        let extractor = SectionExtractor::new(&markers);
        let names: [&str; 0] = [];

        assert_eq!(assemble(&extractor, &names, &lines(RC)).unwrap(), "");
    }
}
