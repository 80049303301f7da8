use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

use atlas::core::config;

#[derive(Parser)]
#[command(name = "atlas", about = "Terminal country directory")]
struct Args {
    /// Country API base URL (overrides config and ATLAS_BASE_URL)
    #[arg(long)]
    base_url: Option<String>,

    /// Initial view mode: "grid" or "list"
    #[arg(long)]
    view: Option<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to atlas.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("atlas.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        log::warn!("Config load failed ({e}), using defaults");
        Default::default()
    });
    let resolved = config::resolve(
        &file_config,
        args.base_url.as_deref(),
        args.view.as_deref(),
    );

    log::info!("Atlas starting up against {}", resolved.base_url);

    atlas::tui::run(resolved)
}
