use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;

use svg_pwa_validator::cli::{Cli, Commands, ServeArgs, VALIDATE_USAGE, ValidateArgs};
use svg_pwa_validator::config::{Config, ConfigLoader, FileConfigLoader};
use svg_pwa_validator::engine::Validator;
use svg_pwa_validator::output::{OutputFormatter, ScanProgress, formatter_for};
use svg_pwa_validator::scanner::{DocumentScanner, FileScanner, run_directory};
use svg_pwa_validator::server::{ApiHandler, Server};
use svg_pwa_validator::{EXIT_CONFIG_ERROR, EXIT_SUCCESS, EXIT_VALIDATION_FAILED, logging};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);

    let exit_code = match &cli.command {
        Commands::Validate(args) => run_validate(args, &cli),
        Commands::Serve(args) => run_serve(args, &cli),
    };

    std::process::exit(exit_code);
}

fn run_validate(args: &ValidateArgs, cli: &Cli) -> i32 {
    match run_validate_impl(args, cli) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {e}");
            EXIT_CONFIG_ERROR
        }
    }
}

fn run_validate_impl(args: &ValidateArgs, cli: &Cli) -> svg_pwa_validator::Result<i32> {
    let Some(path) = args.path.as_deref() else {
        print!("{VALIDATE_USAGE}");
        return Ok(EXIT_VALIDATION_FAILED);
    };

    let mut config = load_config(args.config.as_deref(), cli.no_config)?;
    if args.runtime_checks {
        config.rules.runtime_checks = true;
    }

    let Some(target) = resolve_target(path) else {
        eprintln!("Error: File not found: {}", path.display());
        return Ok(EXIT_VALIDATION_FAILED);
    };

    let validator = Validator::from_config(&config)?;
    let formatter = formatter_for(args.format, cli.color.into());

    if target.is_dir() {
        validate_directory(&validator, &target, &config, formatter.as_ref(), args, cli)
    } else {
        validate_file(&validator, &target, formatter.as_ref(), args, cli)
    }
}

fn validate_file(
    validator: &Validator,
    target: &Path,
    formatter: &dyn OutputFormatter,
    args: &ValidateArgs,
    cli: &Cli,
) -> svg_pwa_validator::Result<i32> {
    let report = match validator.validate(target) {
        Ok(report) => report,
        Err(e) if e.is_input_error() => {
            eprintln!("Error: {e}");
            return Ok(EXIT_VALIDATION_FAILED);
        }
        Err(e) => return Err(e),
    };

    let output = formatter.format_report(target, &report)?;
    write_output(args.output.as_deref(), &output, cli.quiet)?;

    if report.summary.failed > 0 {
        Ok(EXIT_VALIDATION_FAILED)
    } else {
        Ok(EXIT_SUCCESS)
    }
}

fn validate_directory(
    validator: &Validator,
    target: &Path,
    config: &Config,
    formatter: &dyn OutputFormatter,
    args: &ValidateArgs,
    cli: &Cli,
) -> svg_pwa_validator::Result<i32> {
    let scanner = DocumentScanner::from_config(&config.scan)?;
    let files = scanner.scan(target)?;

    let progress = ScanProgress::new(files.len() as u64, cli.quiet);
    let result = run_directory(
        validator,
        target,
        files,
        config.scan.max_file_size,
        Some(&progress),
    );
    progress.finish();

    let output = formatter.format_directory(&result)?;
    write_output(args.output.as_deref(), &output, cli.quiet)?;

    if result.failed_files > 0 {
        Ok(EXIT_VALIDATION_FAILED)
    } else {
        Ok(EXIT_SUCCESS)
    }
}

/// The path itself, or for a missing relative path the same path one level up.
fn resolve_target(path: &Path) -> Option<PathBuf> {
    if path.exists() {
        return Some(path.to_path_buf());
    }
    if path.is_relative() {
        let fallback = Path::new("..").join(path);
        if fallback.exists() {
            tracing::info!(path = %fallback.display(), "resolved target relative to parent directory");
            return Some(fallback);
        }
    }
    None
}

fn run_serve(args: &ServeArgs, cli: &Cli) -> i32 {
    match run_serve_impl(args, cli) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {e}");
            EXIT_CONFIG_ERROR
        }
    }
}

fn run_serve_impl(args: &ServeArgs, cli: &Cli) -> svg_pwa_validator::Result<i32> {
    let config = load_config(args.config.as_deref(), cli.no_config)?;
    let bind = args.bind.as_deref().unwrap_or(&config.server.bind);

    let handler = ApiHandler::new(Validator::from_config(&config)?);
    let server = Server::bind(bind, config.server.max_body_bytes)?;
    let addr = server.local_addr()?;
    if !cli.quiet {
        eprintln!("Listening on http://{addr}/");
    }
    tracing::info!(%addr, "serving validation API");

    server.serve(|request| handler.handle(request), None);
    Ok(EXIT_SUCCESS)
}

fn load_config(config_path: Option<&Path>, no_config: bool) -> svg_pwa_validator::Result<Config> {
    if no_config {
        return Ok(Config::default());
    }

    let loader = FileConfigLoader::new();
    config_path.map_or_else(|| loader.load(), |path| loader.load_from_path(path))
}

fn write_output(output_path: Option<&Path>, content: &str, quiet: bool) -> svg_pwa_validator::Result<()> {
    if let Some(path) = output_path {
        fs::write(path, content)?;
    } else if !quiet {
        print!("{content}");
    }
    Ok(())
}
