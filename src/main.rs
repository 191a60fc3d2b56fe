//! Hanzi Sketch command-line client

use clap::Parser;
use hanzi_sketch::cli::{Cli, Commands};
use hanzi_sketch::commands::{load_signature, recognize_file, replay};
use hanzi_sketch::config::ClientConfig;
use hanzi_sketch::display::DisplayStatus;
use hanzi_sketch::recognizer::HttpRecognizer;
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    hanzi_sketch::init_tracing(cli.verbose);

    tracing::info!("Starting Hanzi Sketch v{}", env!("CARGO_PKG_VERSION"));

    let config = ClientConfig::resolve(cli.config.as_deref(), cli.endpoint.clone())?;

    match cli.command {
        Commands::Recognize { input } => {
            let prediction = recognize_file(&input, &config).await?;
            println!("{}", prediction.as_str());
            let candidates = prediction.candidates();
            if candidates.len() > 1 {
                println!("candidates: {}", candidates.join(" "));
            }
        }
        Commands::Replay { input, pace_ms } => {
            let signature = load_signature(&input)?;
            let backend = Arc::new(HttpRecognizer::from_config(&config)?);
            let steps = replay(&signature, backend, &config, Duration::from_millis(pace_ms)).await?;

            for step in steps {
                match step.state.status {
                    DisplayStatus::Failed(reason) => {
                        println!("stroke {}: {} (failed: {})", step.stroke, step.state.text, reason)
                    }
                    _ => println!("stroke {}: {}", step.stroke, step.state.text),
                }
            }
        }
        Commands::Config => {
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
    }

    Ok(())
}
