//! Manage sections in configuration files like bashrc, bash_aliases or vimrc.
//!
//! A section is a run of lines between `### [BEGIN name]` and
//! `### [END name]`. The tool either checks that a file's markers are well
//! formed, or prints the requested sections, in the order asked for, so they
//! can be assembled into a new file.
//!
//! Do not redirect the output of this program to its own input file: the
//! shell truncates the file before it is read.
use anyhow::Result;
use clap::Parser;
use rc_manager::core::config::{
    ConfigManager, ConfigOverrides, DEFAULT_BEGIN_PREFIX, DEFAULT_END_PREFIX,
    DEFAULT_SECTION_SEPARATOR,
};
use rc_manager::utils;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "rc-manager")]
#[command(version)]
#[command(about = "Manage sections in configuration files like bashrc, bash_aliases, vimrc...")]
#[command(after_help = "The output is in the order the sections are given in --sections.")]
struct Cli {
    /// File input content will be read from
    #[arg(short = 'i', long = "input-file", value_name = "FILENAME")]
    input_file: PathBuf,

    /// Test against file integrity. --sections and
    /// --section_separator_in_command_line are ignored
    #[arg(short = 't', long = "test")]
    test: bool,

    /// Sections to look for. Required unless -t, --test is given
    #[arg(short = 's', long = "sections", required_unless_present = "test")]
    sections: Option<String>,

    #[arg(
        long = "section_separator_in_command_line",
        value_name = "SEPARATOR",
        help = format!("Section separator when using weird names for sections. Defaults to {DEFAULT_SECTION_SEPARATOR:?}")
    )]
    section_separator: Option<String>,

    #[arg(
        long = "section_begin_prefix",
        value_name = "PREFIX",
        help = format!("Defaults to {DEFAULT_BEGIN_PREFIX:?}")
    )]
    begin_prefix: Option<String>,

    /// Defaults to "]". The line must end right after this suffix
    #[arg(long = "section_begin_suffix", value_name = "SUFFIX")]
    begin_suffix: Option<String>,

    #[arg(
        long = "section_end_prefix",
        value_name = "PREFIX",
        help = format!("Defaults to {DEFAULT_END_PREFIX:?}")
    )]
    end_prefix: Option<String>,

    /// Defaults to "]". The line must end right after this suffix
    #[arg(long = "section_end_suffix", value_name = "SUFFIX")]
    end_suffix: Option<String>,

    /// TOML file with default delimiters and separator
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log scanning details to stderr
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    utils::init_logging(cli.verbose);

    let config = ConfigManager::new(cli.config).resolve(ConfigOverrides {
        section_separator: cli.section_separator,
        begin_prefix: cli.begin_prefix,
        begin_suffix: cli.begin_suffix,
        end_prefix: cli.end_prefix,
        end_suffix: cli.end_suffix,
    })?;

    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr().lock();

    let succeeded = match (cli.test, cli.sections) {
        (true, _) => utils::run_validation(&cli.input_file, &config, &mut stdout, &mut stderr)?,
        (false, Some(sections)) => utils::run_extraction(
            &cli.input_file,
            &config,
            &sections,
            &mut stdout,
            &mut stderr,
        )?,
        // clap rejects this combination before we get here.
        (false, None) => anyhow::bail!("--sections is required unless --test is given"),
    };

    Ok(if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
