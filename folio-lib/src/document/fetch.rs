use std::fs;
use std::path::Path;
use std::time::Duration;

use tracing::info;

use crate::{Error, Result};

/// Make sure the document at `path` exists locally, downloading it from
/// `url` if it does not.
///
/// A non-success HTTP status is an error: continuing without the file only
/// moves the failure to the first read.
pub fn ensure_local(path: impl AsRef<Path>, url: &str) -> Result<()> {
    let path = path.as_ref();
    if path.exists() {
        info!(path = %path.display(), "document already on disk");
        return Ok(());
    }

    info!(url, "document missing, downloading");
    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(120))
        .build()
        .map_err(|e| Error::Download(e.to_string()))?;

    let response = client
        .get(url)
        .send()
        .map_err(|e| Error::Download(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(Error::Download(format!(
            "failed to download {url}: status {status}"
        )));
    }

    let bytes = response.bytes().map_err(|e| Error::Download(e.to_string()))?;
    fs::write(path, &bytes).map_err(|e| Error::Download(e.to_string()))?;
    info!(path = %path.display(), bytes = bytes.len(), "saved document");
    Ok(())
}
