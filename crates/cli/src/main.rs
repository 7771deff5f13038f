// ABOUTME: CLI for reading podcast feeds with podcatcher-feed.
// ABOUTME: Reads a feed from URL, file or stdin and prints the channel as JSON.

use std::io;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use podcatcher_feed::{Channel, PodcastReader, ReaderError};
use serde_json::json;

/// Read one or more podcast RSS feeds and output JSON.
#[derive(Parser, Debug)]
#[command(name = "podcatcher")]
#[command(about = "Read podcast RSS feeds and print JSON", long_about = None)]
struct Args {
    /// Feed URL(s) (http/https/file) or local file paths. Use "-" to read one feed from stdin.
    #[arg(required = true)]
    targets: Vec<String>,

    /// Output compact JSON instead of pretty.
    #[arg(long, default_value_t = false)]
    compact: bool,

    /// HTTP timeout in seconds.
    #[arg(long, default_value_t = 30)]
    timeout: u64,

    /// User-Agent header for HTTP requests.
    #[arg(long)]
    user_agent: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut builder = PodcastReader::builder().timeout(Duration::from_secs(args.timeout));
    if let Some(ref ua) = args.user_agent {
        builder = builder.user_agent(ua.clone());
    }
    let reader = builder.build();

    let mut results = Vec::new();
    let mut parsed = 0usize;
    for target in &args.targets {
        match read_target(&reader, target) {
            Ok(channel) => {
                parsed += 1;
                results.push(json!({
                    "source": target,
                    "ok": true,
                    "channel": channel,
                    "error": null
                }));
            }
            Err(err) => {
                log::warn!("{err}");
                results.push(json!({
                    "source": target,
                    "ok": false,
                    "channel": null,
                    "error": err.to_string()
                }));
            }
        }
    }
    let failed = results.len() - parsed;

    // Single successful target prints the bare channel; anything else gets the envelope.
    let output = if args.targets.len() == 1 && parsed == 1 {
        results
            .first()
            .and_then(|r| r.get("channel").cloned())
            .unwrap_or_else(|| json!({}))
    } else {
        json!({
            "feeds": results,
            "total_feeds": results.len(),
            "parsed": parsed,
            "failed": failed
        })
    };

    if args.compact {
        println!("{}", serde_json::to_string(&output)?);
    } else {
        println!("{}", serde_json::to_string_pretty(&output)?);
    }

    if parsed == 0 {
        std::process::exit(1);
    }
    Ok(())
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).init();
}

fn read_target(reader: &PodcastReader, target: &str) -> Result<Channel, ReaderError> {
    if target == "-" {
        return reader.read_from(io::stdin().lock(), "<stdin>");
    }
    reader.read(target)
}
