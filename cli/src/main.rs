//! catdog CLI - Ask the inference service whether an image shows a cat or a dog
//!
//! ```bash
//! catdog classify cat.jpg                       # Print label and confidence
//! catdog classify dog.png --json                # Print the raw prediction JSON
//! catdog --endpoint http://host:8000/predict/ classify pet.webp
//! catdog config                                 # Show the effective configuration
//! ```
//!
//! Settings come from `CATDOG_ENDPOINT`, `CATDOG_MAX_FILE_SIZE` and
//! `CATDOG_TIMEOUT_SECS` (a `.env` file is honoured), then from flags.

use clap::{Parser, Subcommand};
use catdog_cli::{
    classify_file, render_config, render_prediction, resolve_config, CliResult, Overrides,
};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "catdog")]
#[command(about = "Classify an image as a cat or a dog", long_about = None)]
struct Cli {
    /// Inference endpoint (default: http://localhost:8000/predict/)
    #[arg(short, long, global = true)]
    endpoint: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload an image and print the prediction
    Classify {
        /// Image file
        image: PathBuf,

        /// Reject files larger than this many bytes
        #[arg(long)]
        max_size: Option<u64>,

        /// Request timeout in seconds
        #[arg(short, long)]
        timeout: Option<u64>,

        /// Print the prediction as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the effective configuration
    Config,
}

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Classify {
            image,
            max_size,
            timeout,
            json,
        } => {
            let overrides = Overrides {
                endpoint: cli.endpoint,
                max_file_size: max_size,
                timeout_secs: timeout,
            };
            cmd_classify(&image, &overrides, json).await
        }

        Commands::Config => cmd_config(&Overrides {
            endpoint: cli.endpoint,
            ..Overrides::default()
        }),
    };

    if let Err(e) = result {
        log::debug!("{}", e);
        eprintln!("❌ {}", e.user_message());
        std::process::exit(1);
    }
}

async fn cmd_classify(image: &Path, overrides: &Overrides, json: bool) -> CliResult<()> {
    let config = resolve_config(overrides)?;
    let outcome = classify_file(image, &config).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome.prediction)?);
    } else {
        for line in render_prediction(&outcome.prediction) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn cmd_config(overrides: &Overrides) -> CliResult<()> {
    let config = resolve_config(overrides)?;
    for line in render_config(&config) {
        println!("{}", line);
    }
    Ok(())
}
