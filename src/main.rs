use clap::Parser;
use protoscope::core::config;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "protoscope", about = "Terminal client for the clinical component identifier")]
struct Args {
    /// Backend base URL (overrides config file and PROTOSCOPE_BACKEND_URL)
    #[arg(short, long)]
    backend_url: Option<String>,

    /// Directory for exported JSON artifacts
    #[arg(short, long)]
    export_dir: Option<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to protoscope.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("protoscope.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        eprintln!("warning: {e} (falling back to defaults)");
        Default::default()
    });
    let resolved = config::resolve(
        &file_config,
        args.backend_url.as_deref(),
        args.export_dir.as_deref(),
    );

    log::info!(
        "Protoscope starting up, backend: {}",
        resolved.backend_base_url
    );

    protoscope::tui::run(resolved)
}
