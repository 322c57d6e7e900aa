//! Address lookups against an Insight-style explorer
//!
//! Each operation validates its addresses, issues batched requests and
//! reshapes the explorer's records.

use futures::future::{try_join_all, BoxFuture};
use futures::FutureExt;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use crate::batch::{BatchRequester, HttpBatchRequester, RequestOptions};
use crate::config::ClientConfig;
use crate::diagnostics::{Diagnostics, TracingDiagnostics};
use crate::error::{AddressError, AddressResult};
use crate::resolver::{HttpTransactionResolver, TransactionResolver};
use crate::types::{
    AddressQuery, AddressSummary, InsightAddress, InsightTxPage, InsightUtxo, SummaryResult,
    TxIdSet, UnspentOutput,
};
use crate::validation::{validate_addresses, AddressValidator, Base58Validator};

const CONFIRMED_TXS_PAGE: &str = "from=0&to=30";

pub const BLOCK_HEIGHT_UNSUPPORTED: &str =
    "explorer API does not support blockHeight filter for addresses.transactions";

#[derive(Clone)]
pub struct Addresses {
    url: String,
    batch: Arc<dyn BatchRequester>,
    resolver: Arc<dyn TransactionResolver>,
    validator: Arc<dyn AddressValidator>,
    diagnostics: Arc<dyn Diagnostics>,
}

impl Addresses {
    /// `url` is the single-address endpoint, e.g. `https://host/api/addr/`.
    pub fn new(
        url: impl Into<String>,
        batch: Arc<dyn BatchRequester>,
        resolver: Arc<dyn TransactionResolver>,
    ) -> Self {
        Self {
            url: url.into(),
            batch,
            resolver,
            validator: Arc::new(Base58Validator::testnet()),
            diagnostics: Arc::new(TracingDiagnostics),
        }
    }

    /// Wire the HTTP collaborators described by `config`.
    pub fn from_config(config: &ClientConfig) -> AddressResult<Self> {
        let client = http_client(config.timeout)?;
        let batch = HttpBatchRequester::with_client(client.clone(), config.batch_size);
        let resolver = HttpTransactionResolver::new(client, config.tx_url());

        info!(
            "Explorer client using {} (network={}, batch_size={})",
            config.api_url,
            config.network,
            config.batch_size
        );

        Ok(Self::new(config.address_url(), Arc::new(batch), Arc::new(resolver))
            .with_validator(Arc::new(Base58Validator::new(config.network))))
    }

    pub fn with_validator(mut self, validator: Arc<dyn AddressValidator>) -> Self {
        self.validator = validator;
        self
    }

    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn Diagnostics>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Multi-address endpoint: `.../addr/` becomes `.../addrs/`.
    pub fn plural_url(&self) -> String {
        format!("{}s/", self.url.trim_end_matches('/'))
    }

    /// Balance and activity per address.
    ///
    /// A single address yields `SummaryResult::One`, a list yields
    /// `SummaryResult::Many` in the order the explorer returned them.
    pub async fn summary(&self, query: impl Into<AddressQuery>) -> AddressResult<SummaryResult> {
        let query: AddressQuery = query.into();
        let addresses = query.addresses();
        validate_addresses(self.validator.as_ref(), &addresses)?;

        let data = self
            .batch
            .batch_request(&self.url, &addresses, &RequestOptions::default())
            .await?;

        let mut summaries = data
            .into_iter()
            .map(|record| decode::<InsightAddress>(record, "address").map(AddressSummary::from))
            .collect::<AddressResult<Vec<_>>>()?;

        if query.is_single() {
            if summaries.is_empty() {
                return Err(AddressError::EmptyResponse);
            }
            return Ok(SummaryResult::One(summaries.swap_remove(0)));
        }

        Ok(SummaryResult::Many(summaries))
    }

    /// Full transactions touching the given addresses.
    ///
    /// The explorer cannot filter by block height; a non-zero height only
    /// produces a warning.
    pub async fn transactions(
        &self,
        query: impl Into<AddressQuery>,
        block_height: Option<u64>,
    ) -> AddressResult<Vec<Value>> {
        if block_height.unwrap_or(0) > 0 {
            self.diagnostics.warn(BLOCK_HEIGHT_UNSUPPORTED);
        }

        let query: AddressQuery = query.into();
        let addresses = query.addresses();
        validate_addresses(self.validator.as_ref(), &addresses)?;

        let url = self.plural_url();
        let tasks: Vec<BoxFuture<'_, AddressResult<Vec<String>>>> =
            vec![self.confirmed_txids(&url, &addresses).boxed()];

        let mut txids = TxIdSet::new();
        for found in try_join_all(tasks).await? {
            txids.extend(found);
        }

        debug!("Resolving {} transaction(s)", txids.len());
        let transactions = self.resolver.get(&txids.into_vec()).await?;
        Ok(transactions)
    }

    async fn confirmed_txids(&self, url: &str, addresses: &[String]) -> AddressResult<Vec<String>> {
        let options = RequestOptions::path("/txs").with_param(CONFIRMED_TXS_PAGE);
        let pages = self.batch.batch_request(url, addresses, &options).await?;

        let mut txids = Vec::new();
        for page in pages {
            let page = decode::<InsightTxPage>(page, "transaction page")?;
            txids.extend(page.items.into_iter().map(|tx| tx.txid));
        }
        Ok(txids)
    }

    /// Unspent outputs of the given addresses.
    ///
    /// Always a list, even for a single address.
    pub async fn unspents(&self, query: impl Into<AddressQuery>) -> AddressResult<Vec<UnspentOutput>> {
        let query: AddressQuery = query.into();
        let addresses = query.addresses();
        validate_addresses(self.validator.as_ref(), &addresses)?;

        let data = self
            .batch
            .batch_request(&self.plural_url(), &addresses, &RequestOptions::path("/utxo"))
            .await?;

        data.into_iter()
            .map(|record| decode::<InsightUtxo>(record, "unspent output").map(UnspentOutput::from))
            .collect()
    }
}

fn decode<T: DeserializeOwned>(value: Value, what: &'static str) -> AddressResult<T> {
    serde_json::from_value(value).map_err(|source| AddressError::Malformed { what, source })
}

fn http_client(timeout: Duration) -> AddressResult<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| AddressError::Transport(e.into()))
}
