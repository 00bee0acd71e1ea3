use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::output::{ColorMode, OutputFormat};

/// Color output control
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum ColorChoice {
    /// Auto-detect terminal capability
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorChoice> for ColorMode {
    fn from(choice: ColorChoice) -> Self {
        match choice {
            ColorChoice::Auto => Self::Auto,
            ColorChoice::Always => Self::Always,
            ColorChoice::Never => Self::Never,
        }
    }
}

/// Printed by `validate` when no path is given.
pub const VALIDATE_USAGE: &str = "\
SVG PWA Validator - Command Line Interface
==========================================

Usage: svg-pwa-validator validate <svg-file-or-directory>
Examples:
  Single file: svg-pwa-validator validate apps/clock.svg
  Directory:   svg-pwa-validator validate apps/
  All folders: svg-pwa-validator validate .
";

#[derive(Parser, Debug)]
#[command(name = "svg-pwa-validator")]
#[command(author, version, about = "Validate hybrid SVG+PHP documents used as progressive web apps")]
#[command(long_about = "Runs structural, PWA, embedded-code, security, browser, preview and \
    form-interactivity checks over SVG documents with embedded PHP.\n\n\
    Exit codes:\n  \
    0 - All tests passed\n  \
    1 - Validation failures found (or no path given)\n  \
    2 - Configuration or runtime error")]
pub struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress report output and non-error logs
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Control color output
    #[arg(long, value_enum, default_value = "auto", global = true)]
    pub color: ColorChoice,

    /// Skip loading configuration file
    #[arg(long, global = true)]
    pub no_config: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate an SVG file or every SVG file under a directory
    Validate(ValidateArgs),

    /// Serve the JSON validation API over HTTP
    Serve(ServeArgs),
}

#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// SVG file or directory to validate
    pub path: Option<PathBuf>,

    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format [possible values: text, json]
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Write output to file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Also run the runtime checks, including the external PHP syntax check
    #[arg(long)]
    pub runtime_checks: bool,
}

#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to listen on (overrides `server.bind`)
    #[arg(short, long)]
    pub bind: Option<String>,

    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
