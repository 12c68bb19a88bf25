// src/core/net.rs
// Blocking HTTP GET for the one page we fetch live.

use std::time::Duration;

use tracing::debug;

use crate::config::consts::{HTTP_TIMEOUT_SECS, USER_AGENT};
use crate::error::Result;

pub fn http_get(url: &str) -> Result<String> {
    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
        .user_agent(USER_AGENT)
        .build()?;

    let resp = client.get(url).send()?.error_for_status()?;
    debug!(status = %resp.status(), url, "fetched");
    Ok(resp.text()?)
}
