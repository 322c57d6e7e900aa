//! Explorer Client Library
//!
//! Address summaries, transaction history and unspent outputs from an
//! Insight-style block explorer.

pub mod addresses;
pub mod batch;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod resolver;
pub mod types;
pub mod validation;

pub use addresses::Addresses;
pub use batch::{BatchRequester, HttpBatchRequester, RequestOptions};
pub use config::ClientConfig;
pub use diagnostics::{Diagnostics, TracingDiagnostics};
pub use error::{AddressError, AddressResult, TransportError};
pub use resolver::{HttpTransactionResolver, TransactionResolver};
pub use types::{AddressQuery, AddressSummary, SummaryResult, TxIdSet, UnspentOutput};
pub use validation::{validate_addresses, AddressValidator, Base58Validator};
