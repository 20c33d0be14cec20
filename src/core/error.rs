//! Error types for section lookup, validation and input reading.

use std::io;
use std::path::PathBuf;

/// Errors raised while resolving or scanning sections.
///
/// `NotFound`, `Unterminated` and `Empty` are resolution failures reported for
/// a single requested section. `Nested` is structural: it aborts any scan,
/// whatever mode the tool runs in.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SectionError {
    #[error("Section not found '{0}'")]
    NotFound(String),

    #[error("Could not find end of section '{0}'")]
    Unterminated(String),

    #[error("Section is empty '{0}'")]
    Empty(String),

    #[error("Nested section '{inner}' (line {inner_line}) inside section '{outer}' (line {outer_line}).")]
    Nested {
        outer: String,
        outer_line: usize,
        inner: String,
        inner_line: usize,
    },
}

impl SectionError {
    pub fn is_fatal(&self) -> bool {
        matches!(self, SectionError::Nested { .. })
    }
}

/// The input file could not be read.
///
/// Only the error category is shown to the user, e.g. `NotFound` or
/// `PermissionDenied`.
#[derive(Debug, thiserror::Error)]
#[error("Could not read from file '{}': {:?}.", .path.display(), .source.kind())]
pub struct InputError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}
