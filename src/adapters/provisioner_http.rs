//! Storage provisioning client using reqwest.

use reqwest::blocking::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use url::Url;

use super::http::{build_client, extract_error_message};
use crate::domain::{AppError, ExecutionToken, ProvisionConfig, VolumeName};
use crate::ports::StorageProvisioner;

const DEFAULT_STATUS_MESSAGE: &str = "provisioning request failed";

/// HTTP transport for the storage dispatcher service.
///
/// One request per call; failures are reported, never retried.
#[derive(Debug, Clone)]
pub struct HttpStorageProvisioner {
    endpoint: Url,
    storage_gib: u32,
    client: Client,
}

impl HttpStorageProvisioner {
    pub fn new(config: &ProvisionConfig) -> Result<Self, AppError> {
        let client = build_client(config.timeout_secs)?;
        Ok(Self { endpoint: config.endpoint.clone(), storage_gib: config.storage_gib, client })
    }
}

#[derive(Debug, Serialize)]
struct ProvisionRequest {
    storage_gib: u32,
}

#[derive(Debug, Deserialize)]
struct ProvisionResponse {
    #[serde(default)]
    name: Option<String>,
}

impl StorageProvisioner for HttpStorageProvisioner {
    fn provision(&self, token: &ExecutionToken) -> Result<VolumeName, AppError> {
        info!(storage_gib = self.storage_gib, "Provisioning shared storage volume");

        let response = self
            .client
            .post(self.endpoint.clone())
            .header(AUTHORIZATION, token.authorization())
            .header(CONTENT_TYPE, "application/json")
            .json(&ProvisionRequest { storage_gib: self.storage_gib })
            .send()
            .map_err(|e| AppError::provisioning(format!("HTTP request failed: {}", e), None))?;

        let status = response.status();
        let body_text = response.text().unwrap_or_default();

        if !status.is_success() {
            let message = extract_error_message(&body_text).unwrap_or_else(|| {
                if body_text.trim().is_empty() {
                    format!("{} ({})", DEFAULT_STATUS_MESSAGE, status)
                } else {
                    body_text.clone()
                }
            });
            return Err(AppError::provisioning(message, Some(status.as_u16())));
        }

        let parsed: ProvisionResponse = serde_json::from_str(&body_text).map_err(|e| {
            let message = format!("Failed to parse response: {}", e);
            AppError::provisioning(message, Some(status.as_u16()))
        })?;
        let name = parsed.name.ok_or_else(|| {
            AppError::provisioning("No volume name in response", Some(status.as_u16()))
        })?;

        debug!(volume = %name, "storage volume provisioned");
        Ok(VolumeName::new(name))
    }
}
