use reqwest::Client;
use std::time::Duration;

/// Build the shared outbound client.
/// `None` keeps reqwest's default (no overall request timeout).
pub fn build_client(timeout: Option<Duration>) -> Client {
    let builder = Client::builder();
    let builder = match timeout {
        Some(t) => builder.timeout(t),
        None => builder,
    };
    builder.build().unwrap_or_else(|e| {
        tracing::warn!("[HTTP] Falling back to default client: {}", e);
        Client::new()
    })
}

/// Pass through a 2xx response; otherwise read the body and describe the failure.
///
/// Single attempt only: callers never retry.
pub async fn ensure_success(
    response: reqwest::Response,
    label: &str,
) -> Result<reqwest::Response, String> {
    let status = response.status();
    if status.is_success() {
        tracing::debug!("[HTTP] {} responded {}", label, status);
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    tracing::warn!("[HTTP] {} responded {}", label, status);
    if body.trim().is_empty() {
        Err(format!("{} API error ({})", label, status))
    } else {
        Err(format!("{} API error ({}): {}", label, status, body.trim()))
    }
}

pub fn timeout_from_secs(secs: Option<u64>) -> Option<Duration> {
    secs.filter(|s| *s > 0).map(Duration::from_secs)
}
