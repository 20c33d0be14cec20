use anyhow::Result;
use std::io::Write;
use std::path::Path;

use crate::builders::reporter::{ConsoleReporter, StatusReporter};
use crate::core::config::RcManagerConfig;
use crate::core::engine::SectionEngine;
use crate::core::error::InputError;

/// Sets up `env_logger` on stderr. `RUST_LOG` wins over the default level.
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .try_init();
}

/// Handles `--test`: checks marker integrity of `input`.
///
/// Found section names go to `results`, everything else to `diagnostics`.
/// Returns `Ok(false)` for any failure the user has already been told about.
pub fn run_validation(
    input: &Path,
    config: &RcManagerConfig,
    results: &mut dyn Write,
    diagnostics: &mut dyn Write,
) -> Result<bool> {
    let Some(engine) = load_engine(input, config, diagnostics)? else {
        return Ok(false);
    };

    let reporter = ConsoleReporter::new();
    match engine.validate() {
        Ok(report) => {
            log::info!(
                "{} section(s) found, {} orphaned end marker(s)",
                report.sections_found.len(),
                report.orphaned_ends.len()
            );
            if !report.is_valid() {
                log::info!("Validation failed: {}", report.issues().join("; "));
            }
            reporter.report_validation(&report, results, diagnostics)
        }
        Err(error) => {
            reporter.report_nested(&error, diagnostics)?;
            Ok(false)
        }
    }
}

/// Handles `--sections`: writes the requested sections of `input` to `output`.
///
/// Nothing is written to `output` unless every section resolves.
pub fn run_extraction(
    input: &Path,
    config: &RcManagerConfig,
    sections: &str,
    output: &mut dyn Write,
    diagnostics: &mut dyn Write,
) -> Result<bool> {
    let Some(engine) = load_engine(input, config, diagnostics)? else {
        return Ok(false);
    };

    let names = config.split_sections(sections);
    log::debug!("Requested sections: {names:?}");

    match engine.extract(&names) {
        Ok(content) => {
            output.write_all(content.as_bytes())?;
            output.flush()?;
            Ok(true)
        }
        Err(error) if error.is_fatal() => {
            ConsoleReporter::new().report_nested(&error, diagnostics)?;
            Ok(false)
        }
        Err(error) => {
            writeln!(diagnostics, "{error}")?;
            Ok(false)
        }
    }
}

// Unreadable input is reported here and turned into `None`; any other error
// is passed up.
fn load_engine(
    input: &Path,
    config: &RcManagerConfig,
    diagnostics: &mut dyn Write,
) -> Result<Option<SectionEngine>> {
    match SectionEngine::from_file(input, &config.delimiters) {
        Ok(engine) => Ok(Some(engine)),
        Err(error) => match error.downcast_ref::<InputError>() {
            Some(input_error) => {
                writeln!(diagnostics, "{input_error}")?;
                Ok(None)
            }
            None => Err(error),
        },
    }
}
