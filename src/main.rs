use std::fs::File;
use std::path::PathBuf;

use aise::core::config::{self, CliOverrides};
use aise::core::theme::Theme;
use aise::tui;
use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

#[derive(Parser)]
#[command(name = "aise", about = "Mock AI software engineer IDE for the terminal")]
struct Args {
    /// Color theme
    #[arg(short, long, value_enum)]
    theme: Option<Theme>,

    /// Delay before the assistant answers, in milliseconds
    #[arg(long)]
    reply_delay_ms: Option<u64>,

    /// Config file to use instead of ~/.aise/config.toml
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to aise.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("aise.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = match config::load_config(args.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            log::warn!("Refusing to start: {}", e);
            return Err(std::io::Error::other(e));
        }
    };
    let cli = CliOverrides {
        theme: args.theme,
        reply_delay_ms: args.reply_delay_ms,
    };
    let resolved = config::resolve(&file_config, &cli);

    log::info!("aise starting up with {:?}", resolved);

    tui::run(resolved)
}
