//! Batched explorer requests
//!
//! The explorer accepts a comma-separated address list in the URL path, up to
//! a per-call limit. Longer lists are split into several calls.

use async_trait::async_trait;
use futures::future::try_join_all;
use serde_json::Value;
use tracing::debug;

use crate::error::TransportError;

pub const DEFAULT_BATCH_SIZE: usize = 20;

/// Query parameters and path suffix for one batched call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    pub params: Vec<String>,
    pub path: String,
}

impl RequestOptions {
    pub fn path(path: impl Into<String>) -> Self {
        Self {
            params: Vec::new(),
            path: path.into(),
        }
    }

    pub fn with_param(mut self, param: impl Into<String>) -> Self {
        self.params.push(param.into());
        self
    }
}

#[async_trait]
pub trait BatchRequester: Send + Sync {
    /// Fetch `base_url` for every address and return the decoded bodies.
    async fn batch_request(
        &self,
        base_url: &str,
        addresses: &[String],
        options: &RequestOptions,
    ) -> Result<Vec<Value>, TransportError>;
}

/// Build the URL for one chunk of addresses.
pub fn batch_url(base_url: &str, chunk: &[String], options: &RequestOptions) -> String {
    let mut url = format!("{}{}{}", base_url, chunk.join(","), options.path);
    if !options.params.is_empty() {
        url.push('?');
        url.push_str(&options.params.join("&"));
    }
    url
}

#[derive(Clone)]
pub struct HttpBatchRequester {
    client: reqwest::Client,
    batch_size: usize,
}

impl HttpBatchRequester {
    pub fn with_client(client: reqwest::Client, batch_size: usize) -> Self {
        Self {
            client,
            batch_size: batch_size.max(1),
        }
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }
}

#[async_trait]
impl BatchRequester for HttpBatchRequester {
    async fn batch_request(
        &self,
        base_url: &str,
        addresses: &[String],
        options: &RequestOptions,
    ) -> Result<Vec<Value>, TransportError> {
        let requests = addresses
            .chunks(self.batch_size)
            .map(|chunk| get_json(&self.client, batch_url(base_url, chunk, options)));

        let bodies = try_join_all(requests).await?;

        let mut results = Vec::new();
        for body in bodies {
            match body {
                Value::Array(items) => results.extend(items),
                other => results.push(other),
            }
        }
        Ok(results)
    }
}

/// GET a URL and decode its JSON body; non-2xx is an error.
pub(crate) async fn get_json(client: &reqwest::Client, url: String) -> Result<Value, TransportError> {
    debug!("GET {}", url);

    let response = client.get(&url).send().await?;
    let status = response.status();
    let text = response.text().await?;

    if !status.is_success() {
        return Err(TransportError::Status {
            url,
            status: status.as_u16(),
            body: text,
        });
    }

    serde_json::from_str(&text).map_err(|source| TransportError::Decode { url, source })
}
