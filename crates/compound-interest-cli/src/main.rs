mod commands;
mod input;
mod logging;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::normalize::NormalizeArgs;
use commands::solve::SolveArgs;
use compound_interest_core::SolveError;

/// Compound interest solver
#[derive(Parser)]
#[command(
    name = "cig",
    version,
    about = "Compound interest solver",
    long_about = "Give any three of principal, annual rate (percent), years and future \
                  value; cig solves FV = P(1 + r)^t for the fourth with decimal precision."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log level (trace, debug, info, warn, error); RUST_LOG overrides
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve for the missing quantity
    Solve(SolveArgs),
    /// Tidy a typed-in value the way the form does on blur
    Normalize(NormalizeArgs),
    /// List the solvable fields
    Fields,
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();
    logging::init_logging(&cli.log_level);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Solve(args) => commands::solve::run_solve(args),
        Commands::Normalize(args) => commands::normalize::run_normalize(args),
        Commands::Fields => commands::normalize::run_fields(),
        Commands::Version => {
            println!("cig {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            if let Some(solve_err) = e.downcast_ref::<SolveError>() {
                tracing::debug!(code = solve_err.code(), "solve failed");
                if matches!(cli.output, OutputFormat::Json) {
                    if let Ok(report) = serde_json::to_value(solve_err.report()) {
                        output::json::print_json(&report);
                    }
                }
            }
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
