mod output;

use anyhow::Result;
use clap::Parser;
use output::{Format, SaveDir};
use scriptwords_acquire::{build_client, extract_blocks, fetch_page, search_script, Whitespace};
use scriptwords_analyze::{tokenize, AnalyzeError, Analyzer};
use scriptwords_model::Order;
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "scriptwords")]
#[command(about = "Fetch a screenplay from IMSDb and analyze its words")]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("BUILD_HASH"), ")"))]
struct Cli {
    /// Script page URL, or a search term when --search is set
    #[arg(short, long)]
    movie: String,

    /// Resolve --movie with a web search restricted to IMSDb and use the top hit
    #[arg(long)]
    search: bool,

    /// Print the script as written, skipping all word analysis
    #[arg(long)]
    intact: bool,

    /// Reverse the order of sorted output (word counts are unaffected)
    #[arg(long)]
    reverse: bool,

    /// Existing directory to save each result to as <movie>_<command>_script.txt
    #[arg(long)]
    save: Option<PathBuf>,

    /// Commands to run in order: sort (alphabetize), frequency (word-count). Defaults to sort
    #[arg(short, long, num_args = 0..)]
    command: Vec<String>,

    /// Output format for printed and saved results
    #[arg(long, default_value = "text", value_enum)]
    format: Format,

    /// Log level: error, warn, info, debug, trace
    #[arg(long, default_value = "info", value_enum)]
    log_level: LogLevel,

    /// Use UTC timestamps instead of local time
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
    init_tracing(&cli.log_level, cli.utc);
    run(cli).await
}

fn init_tracing(log_level: &LogLevel, utc: bool) {
    // Suppress noisy HTML-parsing crates at debug/trace
    let level = match log_level {
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

    // Results go to stdout, logs to stderr
    if utc {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_timer(tracing_subscriber::fmt::time::ChronoUtc::new(time_format.to_string()))
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_timer(tracing_subscriber::fmt::time::ChronoLocal::new(time_format.to_string()))
            .init();
    }
}

async fn run(cli: Cli) -> Result<()> {
    // A bad save target ends the run before anything is fetched
    let save_dir = cli.save.as_deref().map(SaveDir::open).transpose()?;

    let client = build_client()?;
    let url = if cli.search {
        search_script(&client, &cli.movie).await?
    } else {
        cli.movie.clone()
    };

    tracing::info!(movie = %cli.movie, url = %url, "Retrieving script");
    let html = fetch_page(&client, &url).await?;

    if cli.intact {
        let blocks = extract_blocks(&html, Whitespace::Preserve);
        output::print_intact(&blocks, cli.format)?;
        if let Some(dir) = &save_dir {
            dir.write_intact(&cli.movie, &blocks, cli.format)?;
        }
        return Ok(());
    }

    let blocks = extract_blocks(&html, Whitespace::Trim);
    let tokens = tokenize(&blocks);
    tracing::info!(tokens = tokens.len(), "Tokenized script");

    let analyzer = Analyzer::new(&tokens);
    let order = Order::from_reverse(cli.reverse);
    for outcome in analyzer.run_requested(&cli.command, order) {
        let (name, result) = match outcome {
            Ok(done) => done,
            Err(err) => {
                report_skipped(&mut std::io::stderr(), &err);
                continue;
            }
        };
        if result.is_empty() {
            tracing::warn!(command = %name, "No words found; the page may not contain a script");
        }
        output::print_result(&result, cli.format)?;
        if let Some(dir) = &save_dir {
            dir.write_result(&cli.movie, name, &result, cli.format)?;
        }
    }

    Ok(())
}

/// Skipped commands are always reported, whatever the log level.
fn report_skipped(out: &mut impl Write, err: &AnalyzeError) {
    tracing::warn!("{err}; skipping");
    let _ = writeln!(out, "Error executing command: {err}");
}
