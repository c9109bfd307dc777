//! Single-part upload to platform data storage.
//!
//! The transfer is three requests: `start-upload` returns a presigned URL,
//! the file body is `PUT` there, and `end-upload` commits the part by ETag.

use std::fs;
use std::path::Path;

use reqwest::blocking::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, ETAG};
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use super::http::{build_client, extract_error_message};
use crate::domain::{AppError, ExecutionToken, PlatformConfig, RemotePath};
use crate::ports::LogUploader;

const LOG_CONTENT_TYPE: &str = "text/plain";

#[derive(Debug, Clone)]
pub struct HttpLogUploader {
    base_url: Url,
    client: Client,
}

impl HttpLogUploader {
    pub fn new(config: &PlatformConfig) -> Result<Self, AppError> {
        let client = build_client(config.timeout_secs)?;
        Ok(Self { base_url: config.data_api_url.clone(), client })
    }

    fn endpoint(&self, name: &str) -> Result<Url, AppError> {
        self.base_url.join(&format!("ldata/{}", name)).map_err(|e| AppError::PlatformApi {
            message: format!("Invalid data API URL: {}", e),
            status: None,
        })
    }

    fn post_json<B: Serialize>(
        &self,
        token: &ExecutionToken,
        endpoint: &str,
        body: &B,
    ) -> Result<String, AppError> {
        let response = self
            .client
            .post(self.endpoint(endpoint)?)
            .header(AUTHORIZATION, token.authorization())
            .json(body)
            .send()
            .map_err(|e| AppError::PlatformApi {
                message: format!("{} request failed: {}", endpoint, e),
                status: None,
            })?;

        let status = response.status();
        let text = response.text().unwrap_or_default();
        if !status.is_success() {
            let message = extract_error_message(&text)
                .unwrap_or_else(|| format!("{} returned {}", endpoint, status));
            return Err(AppError::PlatformApi { message, status: Some(status.as_u16()) });
        }
        Ok(text)
    }

    fn put_part(&self, url: &str, data: Vec<u8>) -> Result<String, AppError> {
        let response = self
            .client
            .put(url)
            .header(CONTENT_TYPE, LOG_CONTENT_TYPE)
            .body(data)
            .send()
            .map_err(|e| AppError::PlatformApi {
                message: format!("part upload failed: {}", e),
                status: None,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::PlatformApi {
                message: format!("part upload returned {}", status),
                status: Some(status.as_u16()),
            });
        }

        response
            .headers()
            .get(ETAG)
            .and_then(|value| value.to_str().ok())
            .map(ToOwned::to_owned)
            .ok_or_else(|| AppError::PlatformApi {
                message: "part upload response has no ETag".into(),
                status: Some(status.as_u16()),
            })
    }
}

#[derive(Debug, Serialize)]
struct StartUploadRequest<'a> {
    path: &'a str,
    content_type: &'a str,
    part_count: u32,
}

#[derive(Debug, Deserialize)]
struct StartUploadResponse {
    data: StartUploadData,
}

#[derive(Debug, Deserialize)]
struct StartUploadData {
    /// Absent for empty files, which need no parts.
    #[serde(default)]
    upload_id: Option<String>,
    #[serde(default)]
    urls: Vec<String>,
}

#[derive(Debug, Serialize)]
struct EndUploadRequest<'a> {
    path: &'a str,
    upload_id: &'a str,
    parts: Vec<CompletedPart>,
}

#[derive(Debug, Serialize)]
struct CompletedPart {
    #[serde(rename = "ETag")]
    etag: String,
    #[serde(rename = "PartNumber")]
    part_number: u32,
}

impl LogUploader for HttpLogUploader {
    fn upload(
        &self,
        token: &ExecutionToken,
        local: &Path,
        remote: &RemotePath,
    ) -> Result<(), AppError> {
        let data = fs::read(local)?;
        let part_count = if data.is_empty() { 0 } else { 1 };

        let start = StartUploadRequest {
            path: remote.as_str(),
            content_type: LOG_CONTENT_TYPE,
            part_count,
        };
        let text = self.post_json(token, "start-upload", &start)?;
        let started: StartUploadResponse =
            serde_json::from_str(&text).map_err(|e| AppError::PlatformApi {
                message: format!("Failed to parse start-upload response: {}", e),
                status: None,
            })?;

        let Some(upload_id) = started.data.upload_id else {
            debug!(remote = %remote, "empty file registered without parts");
            return Ok(());
        };
        let url = started.data.urls.first().ok_or_else(|| AppError::PlatformApi {
            message: "start-upload returned no part URL".into(),
            status: None,
        })?;

        let etag = self.put_part(url, data)?;

        let end = EndUploadRequest {
            path: remote.as_str(),
            upload_id: &upload_id,
            parts: vec![CompletedPart { etag, part_number: 1 }],
        };
        self.post_json(token, "end-upload", &end)?;
        Ok(())
    }
}
