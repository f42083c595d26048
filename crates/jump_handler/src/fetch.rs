use anyhow::{Context as _, Error, anyhow};
use bytes::BytesMut;
use reqwest::Client;
use reqwest::header::CACHE_CONTROL;
use tokio::fs::read as tokio_fs_read;
use tokio_stream::StreamExt as _;
use url::Url;

/// Fetches the current text of a stylesheet.
///
/// Supported URL schemes:
/// - `http`, `https`: Fetched via `reqwest` with caching disabled, so edits
///   saved a moment ago are seen
/// - `file`: Read from the local filesystem
///
/// # Arguments
///
/// * `client` - HTTP client reused across files of one corpus
/// * `url` - The URL to fetch content from
///
/// # Errors
///
/// - Returns `Err` if the URL scheme is unsupported
/// - Returns `Err` if HTTP fetch fails or returns a non-success status
/// - Returns `Err` if the file path is invalid or the file cannot be read
/// - Returns `Err` if the content is not UTF-8
pub async fn fetch_text(client: &Client, url: &Url) -> Result<String, Error> {
    let bytes = match url.scheme() {
        "http" | "https" => {
            let response = client
                .get(url.clone())
                .header(CACHE_CONTROL, "no-store")
                .send()
                .await
                .map_err(|err| anyhow!("Failed to fetch URL {url}: {err}"))?;

            if !response.status().is_success() {
                return Err(anyhow!(
                    "Failed to fetch URL: {} (Status: {})",
                    url,
                    response.status()
                ));
            }
            let mut body = BytesMut::new();
            let mut stream = response.bytes_stream();
            while let Some(chunk) = stream.next().await {
                body.extend_from_slice(&chunk.map_err(|err| anyhow!(err))?);
            }
            body.to_vec()
        }
        "file" => {
            let path = url
                .to_file_path()
                .map_err(|()| anyhow!("Invalid file path for file url: {url}"))?;
            tokio_fs_read(&path)
                .await
                .with_context(|| format!("Failed to read {}", path.display()))?
        }
        _ => return Err(anyhow!("Unsupported url scheme {}", url.scheme())),
    };
    String::from_utf8(bytes).with_context(|| format!("Stylesheet at {url} is not UTF-8"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[tokio::test]
    async fn reads_file_urls() -> Result<(), Error> {
        let dir = tempdir()?;
        let path = dir.path().join("style.css");
        fs::write(&path, ".a{}\n")?;
        let url = Url::from_file_path(&path).map_err(|()| anyhow!("not absolute"))?;
        assert_eq!(fetch_text(&Client::new(), &url).await?, ".a{}\n");
        Ok(())
    }

    #[tokio::test]
    async fn rejects_other_schemes() -> Result<(), Error> {
        let url = Url::parse("ftp://example.com/style.css")?;
        assert!(fetch_text(&Client::new(), &url).await.is_err());
        Ok(())
    }
}
