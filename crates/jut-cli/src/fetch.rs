//! Downloading remote notebooks.

use std::io::Write;
use std::time::Duration;

use anyhow::{Context, Result};
use jut_core::JutError;
use tempfile::NamedTempFile;
use url::Url;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Returns the URL when `input` is an `http(s)` address.
pub fn remote_url(input: &str) -> Option<Url> {
    Url::parse(input)
        .ok()
        .filter(|url| matches!(url.scheme(), "http" | "https"))
}

fn retrieval(url: &Url, reason: impl ToString) -> JutError {
    JutError::Retrieval {
        url: url.to_string(),
        reason: reason.to_string(),
    }
}

async fn fetch_bytes(url: &Url) -> Result<Vec<u8>, JutError> {
    let client = reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(|e| retrieval(url, e))?;

    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|e| retrieval(url, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(retrieval(
            url,
            format!(
                "status {} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            ),
        ));
    }

    let body = response.bytes().await.map_err(|e| retrieval(url, e))?;
    Ok(body.to_vec())
}

/// Downloads `url` into a temporary `jut-*.ipynb` file.
///
/// The file is removed when the returned handle drops.
pub fn download(url: &Url) -> Result<NamedTempFile> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("create tokio runtime")?;

    tracing::info!(%url, "downloading notebook");
    let body = rt.block_on(fetch_bytes(url))?;

    let mut file = tempfile::Builder::new()
        .prefix("jut-")
        .suffix(".ipynb")
        .tempfile()
        .context("create temporary notebook file")?;
    file.write_all(&body)
        .and_then(|()| file.flush())
        .context("write downloaded notebook")?;

    tracing::debug!(path = %file.path().display(), bytes = body.len(), "saved download");
    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_url_accepts_http_schemes() {
        assert!(remote_url("https://example.com/nb.ipynb").is_some());
        assert!(remote_url("http://localhost:8888/a.ipynb").is_some());
    }

    #[test]
    fn test_remote_url_rejects_local_inputs() {
        assert!(remote_url("notebook.ipynb").is_none());
        assert!(remote_url("-").is_none());
        assert!(remote_url("/tmp/nb.ipynb").is_none());
        assert!(remote_url("file:///tmp/nb.ipynb").is_none());
        assert!(remote_url("C:\\nb.ipynb").is_none());
    }
}
