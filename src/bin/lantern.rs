//! One-shot CLI for lantern: search, summarize, and inspect pages from
//! the terminal.

use std::path::PathBuf;
use std::process::ExitCode;

use lantern::{
    render, CredentialPool, Engine, HttpCompletionTransport, LanternConfig, SearchMode,
    SearchSession, SummaryFetcher,
};

const USAGE: &str = "\
Usage: lantern [OPTIONS] <QUERY>
       lantern --content <URL>
       lantern --health | --clear-cache

Options:
  --images            Search in image mode
  --engine <NAME>     Backend engine: google (default) or bing
  --count <N>         Number of results to request (1-20)
  --config <PATH>     Path to a lantern.toml config file
  --no-summary        Skip the AI summary panel
  --no-color          Disable ANSI emphasis
  --content <URL>     Fetch extracted page content for one URL
  --health            Check backend health
  --clear-cache       Flush the backend's search cache
  -h, --help          Show this help";

struct Args {
    query: Option<String>,
    mode: SearchMode,
    engine: Engine,
    count: Option<u32>,
    config: Option<PathBuf>,
    summary: bool,
    ansi: bool,
    content: Option<String>,
    health: bool,
    clear_cache: bool,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args {
        query: None,
        mode: SearchMode::Text,
        engine: Engine::Google,
        count: None,
        config: None,
        summary: true,
        ansi: true,
        content: None,
        health: false,
        clear_cache: false,
    };

    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--images" => args.mode = SearchMode::Image,
            "--engine" => {
                let value = iter.next().ok_or("--engine needs a value")?;
                args.engine = match value.as_str() {
                    "google" => Engine::Google,
                    "bing" => Engine::Bing,
                    other => return Err(format!("unknown engine: {other}")),
                };
            }
            "--count" => {
                let value = iter.next().ok_or("--count needs a value")?;
                args.count = Some(
                    value
                        .parse()
                        .map_err(|_| format!("invalid count: {value}"))?,
                );
            }
            "--config" => {
                args.config = Some(PathBuf::from(iter.next().ok_or("--config needs a value")?));
            }
            "--no-summary" => args.summary = false,
            "--no-color" => args.ansi = false,
            "--content" => {
                args.content = Some(iter.next().ok_or("--content needs a value")?);
            }
            "--health" => args.health = true,
            "--clear-cache" => args.clear_cache = true,
            "-h" | "--help" => {
                println!("{USAGE}");
                std::process::exit(0);
            }
            other if other.starts_with('-') => {
                return Err(format!("unknown option: {other}\n\n{USAGE}"));
            }
            _ => match args.query {
                None => args.query = Some(arg),
                Some(ref mut query) => {
                    query.push(' ');
                    query.push_str(&arg);
                }
            },
        }
    }

    Ok(args)
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("lantern=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{message}");
            return ExitCode::FAILURE;
        }
    };

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("lantern: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    let config = match args.config {
        Some(ref path) => LanternConfig::from_file(path)?,
        None => LanternConfig::default(),
    };

    if args.health {
        let health = lantern_search::admin::healthcheck(&config.search).await?;
        println!("backend: {} (timestamp {})", health.status, health.timestamp);
        return Ok(());
    }

    if args.clear_cache {
        let cleared = lantern_search::admin::clear_cache(&config.search).await?;
        println!("cleared {} cached entries", cleared.cleared_items);
        return Ok(());
    }

    if let Some(ref url) = args.content {
        let page = lantern_search::fetch_content(url, &config.search).await?;
        let mut session = SearchSession::new(args.mode, args.engine, config.num_results);
        let token = session
            .request_content(url)
            .ok_or_else(|| anyhow::anyhow!("content URL is empty"))?;
        session.settle_content(token, Ok(page));
        print!("{}", render::render_content(session.overlay()));
        return Ok(());
    }

    let query = args
        .query
        .ok_or_else(|| anyhow::anyhow!("no query given\n\n{USAGE}"))?;

    let count = args.count.unwrap_or(config.num_results);

    // The summary panel needs credentials; missing keys downgrade to a
    // search without a summary rather than failing the whole run.
    let summarizer = if args.summary && config.summary.enabled && args.mode == SearchMode::Text {
        match CredentialPool::from_env(&config.summary.credentials_var) {
            Ok(pool) => Some(SummaryFetcher::new(
                HttpCompletionTransport::new(config.summary.clone()),
                pool,
            )),
            Err(e) => {
                tracing::warn!("summaries disabled: {e}");
                None
            }
        }
    } else {
        None
    };

    let mut session = SearchSession::new(args.mode, args.engine, count)
        .with_summaries(summarizer.is_some());

    let submission = session
        .submit(&query)
        .ok_or_else(|| anyhow::anyhow!("query is empty"))?;

    match submission.identity.mode {
        SearchMode::Text => {
            let results = lantern_search::fetch_results(
                &submission.identity.query,
                submission.identity.engine,
                submission.count,
                &config.search,
            );
            match (&summarizer, submission.summary_token) {
                (Some(fetcher), Some(summary_token)) => {
                    let summary = fetcher.summarize(&submission.identity.query);
                    let (results, summary) = tokio::join!(results, summary);
                    session.settle_results(submission.results_token, results);
                    session.settle_summary(summary_token, summary);
                }
                _ => {
                    session.settle_results(submission.results_token, results.await);
                }
            }
        }
        SearchMode::Image => {
            let outcome = lantern_search::fetch_images(
                &submission.identity.query,
                submission.identity.engine,
                submission.count,
                &config.search,
            )
            .await;
            session.settle_images(submission.results_token, outcome);
        }
    }

    print!("{}", render::render_session(&session, args.ansi));
    Ok(())
}
