use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One address or a list of them.
///
/// The shape matters: `summary` answers a single address with a single
/// record and a list with a list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressQuery {
    One(String),
    Many(Vec<String>),
}

impl AddressQuery {
    pub fn addresses(&self) -> Vec<String> {
        match self {
            AddressQuery::One(address) => vec![address.clone()],
            AddressQuery::Many(addresses) => addresses.clone(),
        }
    }

    pub fn is_single(&self) -> bool {
        matches!(self, AddressQuery::One(_))
    }
}

impl From<&str> for AddressQuery {
    fn from(address: &str) -> Self {
        AddressQuery::One(address.to_string())
    }
}

impl From<String> for AddressQuery {
    fn from(address: String) -> Self {
        AddressQuery::One(address)
    }
}

impl From<Vec<String>> for AddressQuery {
    fn from(addresses: Vec<String>) -> Self {
        AddressQuery::Many(addresses)
    }
}

impl From<&[&str]> for AddressQuery {
    fn from(addresses: &[&str]) -> Self {
        AddressQuery::Many(addresses.iter().map(|a| a.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for AddressQuery {
    fn from(addresses: [&str; N]) -> Self {
        AddressQuery::Many(addresses.iter().map(|a| a.to_string()).collect())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressSummary {
    pub address: String,
    /// Confirmed plus unconfirmed, in satoshis
    pub balance: i64,
    pub total_received: i64,
    pub tx_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SummaryResult {
    One(AddressSummary),
    Many(Vec<AddressSummary>),
}

impl SummaryResult {
    pub fn into_vec(self) -> Vec<AddressSummary> {
        match self {
            SummaryResult::One(summary) => vec![summary],
            SummaryResult::Many(summaries) => summaries,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnspentOutput {
    pub address: String,
    pub confirmations: u64,
    pub vout: u32,
    pub tx_id: String,
    /// Amount in BTC as reported by the explorer
    pub value: f64,
}

/* -------------------- Explorer records -------------------- */

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct InsightAddress {
    pub addr_str: String,
    pub balance_sat: i64,
    pub unconfirmed_balance_sat: i64,
    pub total_received_sat: i64,
    // sic, the explorer's spelling
    pub tx_apperances: u64,
}

impl From<InsightAddress> for AddressSummary {
    fn from(record: InsightAddress) -> Self {
        Self {
            address: record.addr_str,
            balance: record.balance_sat + record.unconfirmed_balance_sat,
            total_received: record.total_received_sat,
            tx_count: record.tx_apperances,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct InsightUtxo {
    pub address: String,
    pub txid: String,
    pub vout: u32,
    pub amount: f64,
    #[serde(default)]
    pub confirmations: u64,
}

impl From<InsightUtxo> for UnspentOutput {
    fn from(record: InsightUtxo) -> Self {
        Self {
            address: record.address,
            confirmations: record.confirmations,
            vout: record.vout,
            tx_id: record.txid,
            value: record.amount,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct InsightTxPage {
    #[serde(default)]
    pub items: Vec<InsightTxRef>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct InsightTxRef {
    pub txid: String,
}

/// Transaction ids in first-seen order, without duplicates.
#[derive(Debug, Default)]
pub struct TxIdSet {
    seen: HashSet<String>,
    ordered: Vec<String>,
}

impl TxIdSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false if the id was already present.
    pub fn insert(&mut self, txid: String) -> bool {
        if self.seen.contains(&txid) {
            return false;
        }
        self.seen.insert(txid.clone());
        self.ordered.push(txid);
        true
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.ordered
    }
}

impl Extend<String> for TxIdSet {
    fn extend<I: IntoIterator<Item = String>>(&mut self, iter: I) {
        for txid in iter {
            self.insert(txid);
        }
    }
}
