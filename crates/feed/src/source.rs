// ABOUTME: Opens the byte stream behind a feed URI: local path, file:// URL, or http(s) URL.
// ABOUTME: Responses are streamed through a BufReader; nothing is read up front.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;

use url::Url;

use crate::error::IoFailure;
use crate::options::ReaderOptions;

/// A readable feed document.
pub type FeedSource = Box<dyn BufRead + Send>;

/// Opens `uri` for streaming.
pub fn open(uri: &str, options: &ReaderOptions) -> Result<FeedSource, IoFailure> {
    let uri = uri.trim();
    if uri.is_empty() {
        return Err(IoFailure::InvalidUri("empty URI".to_string()));
    }

    if is_http(uri) {
        return open_http(uri, options);
    }

    let path = if uri.starts_with("file:") {
        file_url_to_path(uri)?
    } else {
        PathBuf::from(uri)
    };
    let file = File::open(&path)?;
    Ok(Box::new(BufReader::new(file)))
}

/// True for http:// and https:// URIs.
pub fn is_http(uri: &str) -> bool {
    let lower = uri.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

fn open_http(uri: &str, options: &ReaderOptions) -> Result<FeedSource, IoFailure> {
    let client = match &options.http_client {
        Some(client) => client.clone(),
        None => reqwest::blocking::Client::builder()
            .timeout(options.timeout)
            .user_agent(options.user_agent.clone())
            .build()?,
    };

    log::debug!("fetching {uri}");
    let response = client.get(uri).send()?.error_for_status()?;
    Ok(Box::new(BufReader::new(response)))
}

fn file_url_to_path(uri: &str) -> Result<PathBuf, IoFailure> {
    let url = Url::parse(uri).map_err(|err| IoFailure::InvalidUri(format!("{uri}: {err}")))?;
    url.to_file_path()
        .map_err(|_| IoFailure::InvalidUri(format!("{uri}: not a local file URL")))
}
