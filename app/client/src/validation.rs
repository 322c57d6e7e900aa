//! Address validation
//!
//! Checks base58check addresses against the configured network before any
//! explorer request is made.

use bitcoin::Network;

use crate::error::{AddressError, AddressResult};

const MAINNET_PREFIXES: [u8; 2] = [0x00, 0x05];
const TESTNET_PREFIXES: [u8; 2] = [0x6f, 0xc4];

/// Predicate deciding whether a string is an address of the expected network.
pub trait AddressValidator: Send + Sync {
    fn is_valid_address(&self, address: &str) -> bool;

    /// Network name used in validation messages
    fn network_name(&self) -> &str;
}

/// Accepts legacy P2PKH/P2SH addresses in base58check encoding.
#[derive(Debug, Clone, Copy)]
pub struct Base58Validator {
    network: Network,
}

impl Base58Validator {
    pub fn new(network: Network) -> Self {
        Self { network }
    }

    pub fn testnet() -> Self {
        Self::new(Network::Testnet)
    }

    fn version_prefixes(&self) -> [u8; 2] {
        if self.network == Network::Bitcoin {
            MAINNET_PREFIXES
        } else {
            TESTNET_PREFIXES
        }
    }
}

impl Default for Base58Validator {
    fn default() -> Self {
        Self::testnet()
    }
}

impl AddressValidator for Base58Validator {
    fn is_valid_address(&self, address: &str) -> bool {
        match bitcoin::base58::decode_check(address) {
            // version byte + hash160
            Ok(payload) if payload.len() == 21 => self.version_prefixes().contains(&payload[0]),
            _ => false,
        }
    }

    fn network_name(&self) -> &str {
        match self.network {
            Network::Bitcoin => "mainnet",
            Network::Signet => "signet",
            Network::Regtest => "regtest",
            _ => "testnet",
        }
    }
}

/// Validate every address, collecting all failures into one error.
pub fn validate_addresses(
    validator: &dyn AddressValidator,
    addresses: &[String],
) -> AddressResult<()> {
    let invalid: Vec<String> = addresses
        .iter()
        .filter(|address| !validator.is_valid_address(address))
        .cloned()
        .collect();

    if invalid.is_empty() {
        return Ok(());
    }

    Err(AddressError::InvalidAddresses {
        addresses: invalid,
        network: validator.network_name().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    // Well-known testnet addresses from the bitcoin test vectors
    const TESTNET_P2PKH: &str = "mipcBbFg9gMiCh81Kj8tqqdgoZub1ZJRfn";
    const TESTNET_P2SH: &str = "2MzQwSSnBHWHqSAqtTVQ6v47XtaisrJa1Vc";
    const MAINNET_P2PKH: &str = "1BvBMSEYstWetqTFn5Au4m4GFg7xJaNVN2";

    fn owned(addresses: &[&str]) -> Vec<String> {
        addresses.iter().map(|a| a.to_string()).collect()
    }

    #[test]
    fn accepts_testnet_base58_addresses() {
        let validator = Base58Validator::testnet();
        assert!(validator.is_valid_address(TESTNET_P2PKH));
        assert!(validator.is_valid_address(TESTNET_P2SH));
    }

    #[test]
    fn rejects_other_networks_and_garbage() {
        let validator = Base58Validator::testnet();
        assert!(!validator.is_valid_address(MAINNET_P2PKH));
        assert!(!validator.is_valid_address("not-an-address"));
        assert!(!validator.is_valid_address(""));
        // bech32 is not base58check
        assert!(!validator.is_valid_address("tb1qw508d6qejxtdg4y5r3zarvary0c5xw7kxpjzsx"));
    }

    #[test]
    fn rejects_bad_checksum() {
        let validator = Base58Validator::testnet();
        let mut tampered = TESTNET_P2PKH.to_string();
        tampered.pop();
        tampered.push('o');
        assert!(!validator.is_valid_address(&tampered));
    }

    #[test]
    fn mainnet_validator_accepts_mainnet() {
        let validator = Base58Validator::new(Network::Bitcoin);
        assert!(validator.is_valid_address(MAINNET_P2PKH));
        assert!(!validator.is_valid_address(TESTNET_P2PKH));
        assert_eq!(validator.network_name(), "mainnet");
    }

    #[test]
    fn all_valid_is_ok() {
        let validator = Base58Validator::testnet();
        assert!(validate_addresses(&validator, &owned(&[TESTNET_P2PKH, TESTNET_P2SH])).is_ok());
        assert!(validate_addresses(&validator, &[]).is_ok());
    }

    #[test]
    fn one_failure_is_singular() {
        let validator = Base58Validator::testnet();
        let err = validate_addresses(&validator, &owned(&[TESTNET_P2PKH, "bogus"])).unwrap_err();
        assert_eq!(err.to_string(), "bogus is not a valid testnet address");
    }

    #[test]
    fn collects_every_failure_without_short_circuit() {
        let validator = Base58Validator::testnet();
        let err = validate_addresses(
            &validator,
            &owned(&["first", TESTNET_P2PKH, "second", "third"]),
        )
        .unwrap_err();

        match &err {
            AddressError::InvalidAddresses { addresses, network } => {
                assert_eq!(addresses, &owned(&["first", "second", "third"]));
                assert_eq!(network, "testnet");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(
            err.to_string(),
            "first, second, third are not a valid testnet address"
        );
    }
}
