use std::fs::File;
use std::path::PathBuf;

use clap::Parser;
use shorthand::core::config::{self, CliOverrides};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

#[derive(Parser)]
#[command(name = "shorthand", about = "Shorthand Studios - Content Intelligence Platform")]
struct Args {
    /// Platform to start on (overrides config)
    #[arg(long)]
    platform: Option<String>,

    /// Page to start on (overrides config)
    #[arg(long)]
    page: Option<String>,

    /// Resume a saved session by id
    #[arg(short, long)]
    session: Option<String>,

    /// Config file to use instead of ~/.shorthand/config.toml
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // File logger; the terminal belongs to the TUI
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("shorthand.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let loaded = match &args.config {
        Some(path) => config::load_config_from(path),
        None => config::load_config(),
    };
    let file_config = match loaded {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{e}");
            log::error!("Failed to load config: {}", e);
            return Err(std::io::Error::other(e));
        }
    };

    let cli = CliOverrides {
        platform: args.platform,
        page: args.page,
    };
    let resolved = config::resolve(&file_config, &cli);

    log::info!(
        "Shorthand starting: platform={}, page={}, feeds={}",
        resolved.defaults.platform,
        resolved.defaults.page,
        resolved.feeds.len()
    );

    shorthand::tui::run(resolved, args.session)
}
