//! Shared helpers for the blocking HTTP adapters.

use std::time::Duration;

use reqwest::blocking::Client;

use crate::domain::AppError;

pub(crate) fn build_client(timeout_secs: u64) -> Result<Client, AppError> {
    Client::builder().timeout(Duration::from_secs(timeout_secs)).build().map_err(|e| {
        AppError::PlatformApi {
            message: format!("Failed to create HTTP client: {}", e),
            status: None,
        }
    })
}

/// Pull a human-readable message out of a JSON error body.
pub(crate) fn extract_error_message(body: &str) -> Option<String> {
    if body.trim().is_empty() {
        return None;
    }

    let parsed = serde_json::from_str::<serde_json::Value>(body).ok()?;

    if let Some(msg) = parsed
        .get("error")
        .and_then(|error| error.get("message").or(Some(error)))
        .and_then(|message| message.as_str())
    {
        return Some(msg.to_string());
    }

    parsed.get("message").and_then(|message| message.as_str()).map(ToOwned::to_owned)
}
