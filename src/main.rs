use anyhow::{bail, Context, Result};
use clap::Parser;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use feedgrep::config::Config;
use feedgrep::feed::{self, FetchOptions};
use feedgrep::{pipeline, report, sources};

/// How many times the interactive prompt re-asks before giving up.
const MAX_PROMPT_ATTEMPTS: usize = 3;

#[derive(Parser, Debug)]
#[command(
    name = "feedgrep",
    about = "Search a list of RSS/Atom feeds for keywords, fetching all feeds concurrently"
)]
struct Args {
    /// Keywords to search for (prompted interactively when omitted)
    keywords: Vec<String>,

    /// Feed list file, one URL per line
    #[arg(long, short = 's', value_name = "FILE", default_value = "rss_list.txt")]
    sources: PathBuf,

    /// Config file path
    #[arg(long, value_name = "FILE", default_value = "feedgrep.toml")]
    config: PathBuf,

    /// Per-source fetch timeout in seconds (overrides the config file)
    #[arg(long, value_name = "SECS")]
    timeout_secs: Option<u64>,

    /// Emit match reports as JSON instead of text
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so the report on stdout stays clean
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = Config::load(&args.config)
        .with_context(|| format!("Failed to load config '{}'", args.config.display()))?;
    if let Some(secs) = args.timeout_secs {
        config.fetch_timeout_secs = secs;
    }
    if config.fetch_timeout_secs == 0 {
        bail!("Fetch timeout must be at least 1 second");
    }

    let source_list = sources::load_sources(&args.sources)?;
    if source_list.is_empty() {
        eprintln!(
            "Warning: no feed URLs in '{}' — every keyword will report no results",
            args.sources.display()
        );
    }

    let keywords = if args.keywords.is_empty() {
        let stdin = std::io::stdin();
        prompt_keywords(&mut stdin.lock(), &mut std::io::stderr())?
    } else {
        args.keywords.clone()
    };
    if keywords.iter().any(|k| k.trim().is_empty()) {
        bail!("Keywords must be non-empty");
    }

    let client = feed::build_client(&config.user_agent).context("Failed to build HTTP client")?;
    let options = FetchOptions {
        timeout: Duration::from_secs(config.fetch_timeout_secs),
        max_concurrent: config.max_concurrent_fetches,
    };

    let started = Instant::now();
    let batch = pipeline::run_batch(&client, &source_list, &keywords, &options).await;
    let elapsed = started.elapsed();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if args.json {
        report::render_json(&mut out, &batch.reports)?;
        tracing::info!(
            elapsed_secs = elapsed.as_secs_f64(),
            sources = batch.outcomes.len(),
            failed = batch.failed_sources(),
            "Batch complete"
        );
    } else {
        report::render_text(&mut out, &batch.reports)?;
        writeln!(
            out,
            "Searched {} sources ({} failed) in {:.3}s",
            batch.outcomes.len(),
            batch.failed_sources(),
            elapsed.as_secs_f64()
        )?;
    }

    Ok(())
}

/// Asks for keywords on the terminal when none were passed on the command
/// line. Bounded loop — an empty answer re-prompts at most
/// [`MAX_PROMPT_ATTEMPTS`] times, then the run aborts.
fn prompt_keywords(input: &mut impl BufRead, prompt_out: &mut impl Write) -> Result<Vec<String>> {
    for _ in 0..MAX_PROMPT_ATTEMPTS {
        write!(prompt_out, "Enter keywords (space-separated): ")?;
        prompt_out.flush()?;

        let mut line = String::new();
        let read = input
            .read_line(&mut line)
            .context("Failed to read keywords from stdin")?;
        if read == 0 {
            bail!("Standard input closed before any keyword was entered");
        }

        let keywords: Vec<String> = line.split_whitespace().map(str::to_string).collect();
        if !keywords.is_empty() {
            return Ok(keywords);
        }
        writeln!(prompt_out, "Please enter at least one keyword.")?;
    }

    bail!("No keywords entered after {} attempts", MAX_PROMPT_ATTEMPTS)
}
