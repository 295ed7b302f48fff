use std::time::Duration;

use reqwest::blocking::Client;
use serde_json::Value;

use crate::{Error, Result};

const GITHUB_API: &str = "https://api.github.com/repos";
const PLACEHOLDER_POSTS_URL: &str = "https://jsonplaceholder.typicode.com/posts";
const MAX_POSTS: usize = 5;

fn http_client() -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(30))
        // GitHub rejects requests without a user agent
        .user_agent("folio-router")
        .build()
        .map_err(|e| Error::Router(format!("failed to build HTTP client: {e}")))
}

/// Fetch repository metadata from the GitHub API.
///
/// `args` is the `owner/repo` slug; it is required.
pub fn github_repo_info(args: Option<&str>) -> Result<Value> {
    let repo = args.ok_or_else(|| {
        Error::Router("github tool requires an owner/repo argument".to_string())
    })?;

    let response = http_client()?
        .get(format!("{GITHUB_API}/{repo}"))
        .send()
        .map_err(|e| Error::Router(format!("GitHub request failed: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        return Err(Error::Router(format!("GitHub error: {status}")));
    }

    response
        .json()
        .map_err(|e| Error::Router(format!("GitHub returned invalid JSON: {e}")))
}

/// Fetch the first few placeholder posts from a fixed demo endpoint.
pub fn placeholder_posts(_args: Option<&str>) -> Result<Value> {
    let response = http_client()?
        .get(PLACEHOLDER_POSTS_URL)
        .send()
        .map_err(|e| Error::Router(format!("posts request failed: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        return Err(Error::Router(format!("posts endpoint error: {status}")));
    }

    let payload: Value = response
        .json()
        .map_err(|e| Error::Router(format!("posts endpoint returned invalid JSON: {e}")))?;

    match payload {
        Value::Array(posts) => Ok(Value::Array(
            posts.into_iter().take(MAX_POSTS).collect(),
        )),
        other => Ok(other),
    }
}
