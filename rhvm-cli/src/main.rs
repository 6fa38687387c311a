mod commands;
mod output;
mod utils;

use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "rhvm")]
#[command(about = "RHVM - Inspect power operations and capabilities of RHV virtual machines", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: commands::Command,

    #[arg(short, long, global = true, help = "Verbose output")]
    verbose: bool,

    #[arg(short, long, global = true, help = "Quiet output")]
    quiet: bool,

    #[arg(
        long,
        global = true,
        help = "Output format",
        value_enum,
        default_value = "table"
    )]
    format: output::OutputFormat,

    #[arg(
        long,
        global = true,
        env = "RHVM_CONFIG",
        help = "Path to configuration file (default: ~/.rhvm/config.yaml)"
    )]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(log_level))
        .with_writer(std::io::stderr)
        .init();

    let config = commands::load_config(cli.config.as_deref(), &cli.command)?;

    match commands::execute(cli.command, config, cli.config, cli.format).await {
        Ok(_) => Ok(()),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
