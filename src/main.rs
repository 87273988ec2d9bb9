use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod cli;

#[derive(Parser)]
#[command(name = "tether")]
#[command(about = "Link local packages into a host project without publishing")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register local directories as linked dependencies
    Link {
        /// Paths to local package directories, relative to the project root
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// Pack and install every linked dependency
    Connect {
        /// Keep watching the linked sources and re-connect on change
        #[arg(short, long)]
        watch: bool,
    },
    /// Restore original dependency declarations and erase all state
    Reset,
    /// Show the linked dependencies
    Status,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Link { paths } => cli::link::run(paths).await,
        Commands::Connect { watch } => cli::connect::run(watch).await,
        Commands::Reset => cli::reset::run().await,
        Commands::Status => cli::status::run(),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\nError: {}", e);
            ExitCode::FAILURE
        }
    }
}
