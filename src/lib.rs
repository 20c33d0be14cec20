//! Extract and validate marker-delimited sections of line-oriented
//! configuration files such as `.bashrc` or `.vimrc`.
//!
//! A section starts at a line `### [BEGIN name]` and ends at the matching
//! `### [END name]`; both markers are configurable.
pub mod builders;
pub mod core;
pub mod utils;
