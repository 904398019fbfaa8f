//! One-shot retrieval of the CSV source, over HTTP or from disk.

mod basic;
mod client;

pub use basic::BasicClient;
pub use client::HttpClient;

use anyhow::{Context, Result, bail};
use tracing::debug;

/// Issues a single GET and returns the body. Non-success statuses are errors.
pub async fn fetch_bytes<C: HttpClient>(client: &C, url: &str) -> Result<Vec<u8>> {
    let req = reqwest::Request::new(reqwest::Method::GET, url.parse()?);

    let resp = client.execute(req).await?;
    let status = resp.status();
    if !status.is_success() {
        bail!("GET {url} returned {status}");
    }

    Ok(resp.bytes().await?.to_vec())
}

/// Loads the source from a URL when it starts with `http://` or `https://`,
/// otherwise from a local path.
pub async fn read_source<C: HttpClient>(client: &C, source: &str) -> Result<Vec<u8>> {
    let bytes = if is_url(source) {
        fetch_bytes(client, source).await?
    } else {
        tokio::fs::read(source)
            .await
            .with_context(|| format!("failed to read {source}"))?
    };
    debug!(source, bytes = bytes.len(), "Source retrieved");
    Ok(bytes)
}

fn is_url(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;

    #[test]
    fn test_is_url() {
        assert!(is_url("https://example.com/data/weather.csv"));
        assert!(is_url("http://localhost:8080/weather.csv"));
        assert!(!is_url("data/weather.csv"));
        assert!(!is_url("httpdata.csv"));
    }

    #[tokio::test]
    async fn test_read_local_file() {
        let path = format!("{}/temperature_trends_fetch_test.csv", env::temp_dir().display());
        fs::write(&path, "time,Ktemp\n").unwrap();

        let bytes = read_source(&BasicClient::new(), &path).await.unwrap();
        assert_eq!(bytes, b"time,Ktemp\n");

        fs::remove_file(&path).unwrap();
    }

    #[tokio::test]
    async fn test_read_missing_file_fails() {
        let result = read_source(&BasicClient::new(), "/nonexistent/weather.csv").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_invalid_url_fails() {
        let result = fetch_bytes(&BasicClient::new(), "not a url").await;
        assert!(result.is_err());
    }
}
