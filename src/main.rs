use std::fs::{self, OpenOptions};
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use chrono::Utc;
use clap::Parser;
use log::{info, warn, LevelFilter};
use simplelog::{
    ColorChoice, CombinedLogger, Config, SharedLogger, TermLogger, TerminalMode, WriteLogger,
};

use rust_fshash::cli::{Args, Commands};
use rust_fshash::config::{load_or_default_profile, ScanConfiguration, ScanProfile};
use rust_fshash::models::ScanResult;
use rust_fshash::progress::ConsoleReporter;
use rust_fshash::scanner;
use rust_fshash::utils::summary;

fn main() -> Result<()> {
    // Parse arguments
    let args = Args::parse();

    // Handle subcommands
    if let Some(cmd) = &args.command {
        initialize_logging(args.verbose, None)?;
        return handle_subcommand(cmd);
    }

    // Resolve configuration before anything is written
    let profile = load_or_default_profile(args.config.as_deref())?;
    let config = ScanConfiguration::from_args(&args, &profile)?;

    initialize_logging(config.verbose, config.log_path.as_deref())?;

    info!("Welcome to rust-fshash {}", env!("CARGO_PKG_VERSION"));
    info!(
        "Platform: {} {}",
        std::env::consts::OS,
        std::env::consts::ARCH
    );
    info!("Hash Algorithm: {}", config.algorithm);

    let started_at = Utc::now();
    let reporter = ConsoleReporter::new(config.verbose);
    let result = scanner::run(&config, &reporter)?;
    let finished_at = Utc::now();

    info!("Report written to {}", config.report_path.display());

    if let Some(summary_path) = &config.summary_path {
        write_scan_summary(summary_path, &config, &result, started_at, finished_at)?;
    }

    println!("Files Processed: {}", result.files_processed);
    println!("Elapsed Time: {:.3} seconds", result.elapsed.as_secs_f64());
    println!("Errors: {}", result.files_failed);

    info!("Program Terminated Normally");
    Ok(())
}

/// Initialize terminal logging, plus a persistent debug log when a path is given
fn initialize_logging(verbose: bool, log_path: Option<&Path>) -> Result<()> {
    let log_level = if verbose { LevelFilter::Debug } else { LevelFilter::Info };

    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        log_level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )];

    if let Some(path) = log_path {
        let log_file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open log file {}", path.display()))?;
        loggers.push(WriteLogger::new(LevelFilter::Debug, Config::default(), log_file));
    }

    CombinedLogger::init(loggers).context("Failed to initialize logger")?;
    Ok(())
}

/// Handle subcommands (init-config)
fn handle_subcommand(cmd: &Commands) -> Result<()> {
    match cmd {
        Commands::InitConfig { path } => {
            if path.exists() {
                return Err(anyhow!("Refusing to overwrite existing profile {}", path.display()));
            }
            info!("Creating default scan profile at {}", path.display());
            ScanProfile::default().save_to_yaml_file(path)?;
            info!("Profile created successfully");
            Ok(())
        }
    }
}

/// Write the JSON scan summary beside the report
fn write_scan_summary(
    summary_path: &Path,
    config: &ScanConfiguration,
    result: &ScanResult,
    started_at: chrono::DateTime<Utc>,
    finished_at: chrono::DateTime<Utc>,
) -> Result<()> {
    let hostname = match hostname::get() {
        Ok(name) => name.to_string_lossy().to_string(),
        Err(e) => {
            warn!("Failed to get hostname: {}", e);
            "unknown".to_string()
        }
    };

    let summary_json =
        summary::create_scan_summary(&hostname, config, result, started_at, finished_at)?;

    fs::write(summary_path, &summary_json)
        .with_context(|| format!("Failed to write scan summary {}", summary_path.display()))?;

    info!("Scan summary written to {}", summary_path.display());
    Ok(())
}
