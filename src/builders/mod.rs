// This file is the module declaration file for the `builders` module.
// It declares and makes public the sub-modules that do the actual line
// scanning and produce output.

// The `pub mod patterns;` declaration exposes the `patterns` module.
//
// `patterns` module:
// Marker recognition. Defines the `MarkerMatcher` trait and `SectionMarkers`,
// which tells generic begin/end markers apart from the exact markers of one
// named section.
pub mod patterns;

// `validator` module:
// The single-pass integrity check behind `--test`: unclosed sections, nested
// sections and end markers without an opening.
pub mod validator;

// `extractor` module:
// Looks up one section by name and returns its lines, markers included.
pub mod extractor;

// `assembler` module:
// Joins several extracted sections in request order, one blank line apart.
pub mod assembler;

// `reporter` module:
// Prints validation outcomes, keeping results and diagnostics on separate
// streams.
pub mod reporter;
