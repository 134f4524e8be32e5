// OndaTV - web TV station console
// Live when there is a stream, Auto VJ when there is not

use anyhow::Result;
use clap::Parser;
use ondatv::config::Config;
use ondatv::console::App;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ondatv", about = "Web TV station console - live, Auto VJ e grade")]
struct Cli {
    /// Override the directory the persisted slots live in
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Start with live mode already switched on
    #[arg(long)]
    live: bool,

    /// Also write a daily-rotated log file under the data dir
    #[arg(long)]
    log_file: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load config - falls back to defaults if missing
    let mut config = Config::load()?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }

    let _log_guard = init_tracing(&config, cli.log_file);

    let mut app = App::new(config)?;
    app.set_live(cli.live);
    app.run().await?;

    Ok(())
}

/// Logs go to stderr so they interleave cleanly with the raw-mode console;
/// `--log-file` adds a rotating file under the data dir. The guard must
/// outlive the app or buffered lines are lost.
fn init_tracing(config: &Config, log_file: bool) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if log_file {
        let appender = tracing_appender::rolling::daily(&config.data_dir, "ondatv.log");
        let (writer, guard) = tracing_appender::non_blocking(appender);
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(writer)
            .with_ansi(false)
            .init();
        Some(guard)
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
        None
    }
}
