use clap::Parser;
use remedy_finder::cli::commands::{Cli, Commands};
use remedy_finder::config::Config;
use remedy_finder::server::run_server;
use remedy_finder::RemedyFinder;
use serde::Serialize;
use std::sync::Arc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("remedy_finder=info")))
        .init();

    let cli = Cli::parse();
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let finder = match RemedyFinder::new(&config) {
        Ok(finder) => finder,
        Err(e) => {
            eprintln!("Error initializing remedy finder: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run_command(finder, &config, cli.command).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run_command(finder: RemedyFinder, config: &Config, cmd: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        Commands::Serve { bind } => {
            let bind = bind.unwrap_or_else(|| config.bind.clone());
            run_server(Arc::new(finder), &bind).await?;
        }
        Commands::Ingest { file } => {
            let report = finder.ingest_file(&file).await?;
            print_json(&report)?;
        }
        Commands::Ask { query } => {
            let response = finder.recommend(&query).await?;
            print_json(&response)?;
        }
        Commands::Stats => {
            print_json(&finder.stats()?)?;
        }
        Commands::History { limit } => {
            print_json(&finder.history(limit)?)?;
        }
        Commands::Suggestions => {
            for s in finder.suggestions() {
                println!("{s}");
            }
        }
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
