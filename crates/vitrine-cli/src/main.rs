mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "vitrine")]
#[command(version, about = "Vitrine CLI - render site pages and check form submissions", long_about = None)]
struct Cli {
    /// Path to the site configuration file
    #[arg(short, long, global = true, default_value = "vitrine.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the site pages to static HTML files
    Build {
        /// Output directory (defaults to build.output_dir from the config)
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Directory holding the Vite build output
        #[arg(long, default_value = ".")]
        root: PathBuf,
    },

    /// Validate a contact form body and print the outcome
    #[command(name = "check-contact")]
    CheckContact {
        /// Request body, urlencoded unless --json is given
        body: String,

        /// Treat the body as a JSON object
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<ExitCode> {
    // Missing .env is fine; values may come from the real environment
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = vitrine::Config::load(&cli.config)?;
    config.apply_env();

    match cli.command {
        Commands::Build { out, root } => {
            let out = out.unwrap_or_else(|| PathBuf::from(&config.build.output_dir));
            commands::build::execute(&config, &root, &out)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::CheckContact { body, json } => {
            let sent = commands::check::execute(&body, json)?;
            Ok(if sent { ExitCode::SUCCESS } else { ExitCode::FAILURE })
        }
    }
}
