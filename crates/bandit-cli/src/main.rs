use anyhow::Result;
use bandit_acquire::{classify, HttpFetcher, MaterializeOptions, Materializer, Target};
use bandit_model::YearClock;
use clap::{CommandFactory, Parser};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bandit")]
#[command(about = "Download storefront albums as tagged MP3 files")]
#[command(version)]
struct Cli {
    /// Album page URLs (`.../album/...`) or storefront roots
    urls: Vec<String>,

    /// Replace characters that are unsafe in NTFS-like filesystems in artist,
    /// album and track names with lookalikes
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    safe_names: bool,

    /// Directory the `Artist/Album (Year)` folders are created in
    #[arg(short = 'O', long, default_value = ".")]
    output_dir: PathBuf,

    /// Log level: error, warn, info, debug, trace
    #[arg(long, default_value = "info", value_enum)]
    log_level: LogLevel,

    /// Use UTC for log timestamps and release years instead of local time
    #[arg(long)]
    utc: bool,
}

#[derive(Clone, clap::ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.urls.is_empty() {
        Cli::command().print_help()?;
        return Ok(());
    }

    // Map log level, suppressing noisy HTML-parsing crates at debug/trace
    let level = match cli.log_level {
        LogLevel::Error => "error",
        LogLevel::Warn  => "warn",
        LogLevel::Info  => "info",
        LogLevel::Debug => "debug,selectors=warn,html5ever=warn",
        LogLevel::Trace => "trace,selectors=warn,html5ever=warn",
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    // Timestamp format: 2026-02-14 19:44:09.123 -08:00
    let time_format = "%Y-%m-%d %H:%M:%S%.3f %:z";

    if cli.utc {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_timer(tracing_subscriber::fmt::time::ChronoUtc::new(time_format.to_string()))
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_timer(tracing_subscriber::fmt::time::ChronoLocal::new(time_format.to_string()))
            .init();
    }

    let options = MaterializeOptions {
        safe_names: cli.safe_names,
        output_dir: cli.output_dir,
        year_clock: if cli.utc { YearClock::Utc } else { YearClock::Local },
    };
    let materializer = Materializer::new(HttpFetcher::new()?, options);

    // Inputs are independent: report a failure and carry on with the next.
    for input in &cli.urls {
        match classify(input) {
            Ok(Target::Album(url)) => {
                if let Err(e) = materializer.materialize(url.as_str()).await {
                    tracing::error!(url = %url, "❌ {e}");
                }
            }
            Ok(Target::Storefront(url)) => match materializer.materialize_storefront(&url).await {
                Ok(report) => {
                    for failure in &report.failures {
                        tracing::error!(url = %failure.url, "❌ {}", failure.error);
                    }
                    tracing::info!(
                        albums = report.albums.len(),
                        failed = report.failures.len(),
                        "Storefront done"
                    );
                }
                Err(e) => tracing::error!(url = %url, "❌ {e}"),
            },
            Err(e) => tracing::error!("❌ {e}"),
        }
    }

    tracing::info!("🎶 Thanks for using this tool and remember to support the musicians!");
    Ok(())
}
