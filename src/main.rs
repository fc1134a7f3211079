//! Clock Report CLI
//!
//! Processes a Clock Detail Report workbook into ECNB/ECMW data,
//! pivot and summary sheets.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use clock_report::commands::{
    display_schema, display_version, execute_process, validate_args, validate_input_file,
    ProcessArgs,
};
use clock_report::output::LayoutConfig;

/// Clock Report - Clock Detail Report processing
#[derive(Parser, Debug)]
#[command(name = "clock-report")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Process a Clock Detail Report workbook
    Process {
        /// Input workbook (.xlsx)
        #[arg(short, long, env = "CLOCK_REPORT_INPUT")]
        input: PathBuf,

        /// Output workbook (.xlsx)
        #[arg(
            short,
            long,
            env = "CLOCK_REPORT_OUTPUT",
            default_value = "Processed_ClockReport.xlsx"
        )]
        output: PathBuf,

        /// Output path for the JSON report (optional)
        #[arg(long)]
        json: Option<PathBuf>,

        /// Print text summary to stdout
        #[arg(long)]
        summary: bool,
    },

    /// Check that a workbook can be processed
    Validate {
        /// Path to input workbook
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display the input contract
    Schema {
        /// Show full contract details
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Process {
            input,
            output,
            json,
            summary,
        } => {
            let args = ProcessArgs {
                input,
                output,
                json_output: json,
                print_summary: summary,
                layout: LayoutConfig::default(),
            };

            // Validate args first
            validate_args(&args)?;

            execute_process(args)?;
        }

        Commands::Validate { file } => {
            validate_input_file(file)?;
        }

        Commands::Schema { show } => {
            display_schema(show);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
