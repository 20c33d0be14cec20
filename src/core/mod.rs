// This file is the module declaration file for the `core` module.
// It exposes the pieces that hold the state of one invocation.

// `config` module:
// Delimiter strings and the section separator, with their defaults, the
// optional TOML configuration file and command-line overrides. A resolved
// `SectionDelimiters` value is passed explicitly to every operation.
pub mod config;

// `engine` module:
// `SectionEngine` owns the input lines and the compiled markers and is the
// entry point for validation and extraction.
pub mod engine;

// `error` module:
// Typed errors for section resolution, nesting and unreadable input.
pub mod error;
