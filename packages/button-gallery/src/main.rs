//! Button Gallery - terminal preview of the nr-buttons components.
//!
//! Lists every configured button style and simulates tap timelines against
//! an action button.

mod config;
mod demo;
mod gallery;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::task::LocalSet;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::GalleryConfig;
use crate::demo::DemoOptions;

#[derive(Parser)]
#[command(name = "button-gallery")]
#[command(about = "Preview nr-buttons styles and action button timelines")]
#[command(version)]
struct Cli {
    /// Gallery config file (defaults to ~/.config/nr-buttons/gallery.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render every configured button
    List {
        /// Print frames as JSON
        #[arg(long)]
        json: bool,
    },
    /// Tap an action button on a timer and print what happens
    Demo {
        /// Button label
        #[arg(short, long, default_value = "Submit")]
        label: String,
        /// Operation duration in milliseconds (defaults to the config value)
        #[arg(short, long)]
        delay_ms: Option<u64>,
        /// Number of taps
        #[arg(short, long, default_value = "3")]
        taps: u32,
        /// Milliseconds between taps
        #[arg(short, long, default_value = "500")]
        interval_ms: u64,
        /// Make every operation fail
        #[arg(long)]
        fail: bool,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => GalleryConfig::load_from_path(path)?,
        None => GalleryConfig::load()?,
    };

    match cli.command {
        Commands::List { json } => {
            let entries = gallery::entries(&config).context("Failed to build gallery")?;
            if json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                println!("{}", gallery::format_table(&entries));
            }
        }
        Commands::Demo {
            label,
            delay_ms,
            taps,
            interval_ms,
            fail,
            json,
        } => {
            let options = DemoOptions {
                label,
                delay: delay_ms
                    .map(Duration::from_millis)
                    .unwrap_or_else(|| config.demo.delay()),
                taps,
                interval: Duration::from_millis(interval_ms),
                fail,
            };

            tracing::info!(
                "Running demo: {} taps every {:?}, operation takes {:?}",
                options.taps,
                options.interval,
                options.delay
            );

            let report = LocalSet::new()
                .run_until(demo::run(&options, &config.demo))
                .await
                .context("Demo failed")?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}", report);
            }
        }
    }

    Ok(())
}
