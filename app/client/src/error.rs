//! Error types for the explorer client

use thiserror::Error;

/// Failure reported by one of the HTTP collaborators.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{url} returned status {status}: {body}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },

    #[error("Invalid JSON from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Error, Debug)]
pub enum AddressError {
    #[error("{}", describe_invalid(.addresses, .network))]
    InvalidAddresses {
        addresses: Vec<String>,
        network: String,
    },

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("Unexpected {what} record: {source}")]
    Malformed {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Explorer returned no record for the requested address")]
    EmptyResponse,
}

pub type AddressResult<T> = Result<T, AddressError>;

fn describe_invalid(addresses: &[String], network: &str) -> String {
    let verb = if addresses.len() == 1 { "is" } else { "are" };
    format!("{} {} not a valid {} address", addresses.join(", "), verb, network)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_invalid_address_uses_singular_phrasing() {
        let err = AddressError::InvalidAddresses {
            addresses: vec!["foo".into()],
            network: "testnet".into(),
        };
        assert_eq!(err.to_string(), "foo is not a valid testnet address");
    }

    #[test]
    fn several_invalid_addresses_use_plural_phrasing() {
        let err = AddressError::InvalidAddresses {
            addresses: vec!["foo".into(), "bar".into()],
            network: "testnet".into(),
        };
        assert_eq!(err.to_string(), "foo, bar are not a valid testnet address");
    }

    #[test]
    fn transport_errors_keep_their_message() {
        let inner = TransportError::Status {
            url: "http://x/addr/a".into(),
            status: 503,
            body: "busy".into(),
        };
        let expected = inner.to_string();
        let err = AddressError::from(inner);
        assert_eq!(err.to_string(), expected);
    }
}
