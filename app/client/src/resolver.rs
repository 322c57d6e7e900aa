//! Transaction lookup by id

use async_trait::async_trait;
use futures::future::try_join_all;
use serde_json::Value;

use crate::batch::get_json;
use crate::error::TransportError;

/// Resolves transaction ids into full transaction records.
#[async_trait]
pub trait TransactionResolver: Send + Sync {
    async fn get(&self, txids: &[String]) -> Result<Vec<Value>, TransportError>;
}

/// Fetches `{tx_url}{txid}` for every id concurrently.
#[derive(Clone)]
pub struct HttpTransactionResolver {
    client: reqwest::Client,
    tx_url: String,
}

impl HttpTransactionResolver {
    pub fn new(client: reqwest::Client, tx_url: impl Into<String>) -> Self {
        Self {
            client,
            tx_url: tx_url.into(),
        }
    }
}

#[async_trait]
impl TransactionResolver for HttpTransactionResolver {
    async fn get(&self, txids: &[String]) -> Result<Vec<Value>, TransportError> {
        let requests = txids
            .iter()
            .map(|txid| get_json(&self.client, format!("{}{}", self.tx_url, txid)));

        try_join_all(requests).await
    }
}
