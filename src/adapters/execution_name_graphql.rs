//! Execution display-name lookup against the platform GraphQL API.

use reqwest::blocking::Client;
use reqwest::header::AUTHORIZATION;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use super::http::build_client;
use crate::domain::{AppError, ExecutionToken, PlatformConfig};
use crate::ports::ExecutionNameResolver;

const EXECUTION_NAME_QUERY: &str = "query executionCreatorsByToken($token: String!) { \
     executionCreatorByToken(token: $token) { flytedbId info { displayName } } }";

#[derive(Debug, Clone)]
pub struct GraphqlExecutionNameResolver {
    url: Url,
    client: Client,
}

impl GraphqlExecutionNameResolver {
    pub fn new(config: &PlatformConfig) -> Result<Self, AppError> {
        let client = build_client(config.timeout_secs)?;
        Ok(Self { url: config.graphql_url.clone(), client })
    }

    fn query(&self, token: &ExecutionToken) -> Result<String, String> {
        let request = GraphqlRequest {
            query: EXECUTION_NAME_QUERY,
            variables: Variables { token: token.expose() },
        };

        let response = self
            .client
            .post(self.url.clone())
            .header(AUTHORIZATION, token.authorization())
            .json(&request)
            .send()
            .map_err(|e| format!("HTTP request failed: {}", e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!("status {}", status));
        }

        let body: GraphqlResponse =
            response.json().map_err(|e| format!("Failed to parse response: {}", e))?;

        body.data
            .and_then(|data| data.execution_creator_by_token)
            .and_then(|creator| creator.info)
            .and_then(|info| info.display_name)
            .filter(|name| !name.trim().is_empty())
            .ok_or_else(|| "no display name in response".to_string())
    }
}

#[derive(Debug, Serialize)]
struct GraphqlRequest<'a> {
    query: &'a str,
    variables: Variables<'a>,
}

#[derive(Debug, Serialize)]
struct Variables<'a> {
    token: &'a str,
}

#[derive(Debug, Deserialize)]
struct GraphqlResponse {
    #[serde(default)]
    data: Option<ResponseData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponseData {
    #[serde(default)]
    execution_creator_by_token: Option<ExecutionCreator>,
}

#[derive(Debug, Deserialize)]
struct ExecutionCreator {
    #[serde(default)]
    info: Option<ExecutionInfo>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExecutionInfo {
    #[serde(default)]
    display_name: Option<String>,
}

impl ExecutionNameResolver for GraphqlExecutionNameResolver {
    fn execution_name(&self, token: &ExecutionToken) -> Option<String> {
        match self.query(token) {
            Ok(name) => Some(name),
            Err(reason) => {
                debug!(%reason, "execution name lookup failed");
                None
            }
        }
    }
}
