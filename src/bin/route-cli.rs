use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use route_resolver::config::load_config;
use route_resolver::lifecycle::startup;
use route_resolver::routing::candidate_paths;

#[derive(Parser)]
#[command(name = "route-cli")]
#[command(about = "Resolve CMS routes from the command line", long_about = None)]
struct Cli {
    /// TOML configuration file. CONTENTSTACK_* variables override it.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a path and print the resolved route as JSON
    Resolve { path: String },
    /// Print the lookup candidates for a path without contacting the CMS
    Candidates { path: String },
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Candidates { path } => {
            for candidate in &candidate_paths(&path) {
                println!("{}", candidate);
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Resolve { path } => {
            let config = load_config(cli.config.as_deref())?;
            startup::init_observability(&config);
            let pipeline = startup::build_pipeline(&config.cms)?;

            match pipeline.resolve(&path).await {
                Some(route) => {
                    println!("{}", serde_json::to_string_pretty(&route)?);
                    Ok(ExitCode::SUCCESS)
                }
                None => {
                    eprintln!("not found: {}", path);
                    Ok(ExitCode::FAILURE)
                }
            }
        }
    }
}
