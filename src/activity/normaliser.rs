// Convert wire strings into base-unit amounts and canonical currency ids.

use alloy_primitives::{Address, U256};
use std::str::FromStr;
use thiserror::Error;

use crate::activity::chain::{native_address, supported_chain_id};
use crate::activity::types::{RemoteToken, TokenStandard};

/// Precision assumed for tokens that do not declare one.
pub const DEFAULT_DECIMALS: u8 = 18;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnitsError {
    #[error("malformed quantity {0:?}")]
    Malformed(String),
    #[error("quantity {quantity:?} has more than {decimals} fractional digits")]
    TooManyDecimals { quantity: String, decimals: u8 },
    #[error("quantity {0:?} does not fit in 256 bits")]
    Overflow(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CurrencyError {
    #[error("token chain {0} is not supported")]
    UnsupportedChain(String),
    #[error("invalid token address {0:?}")]
    InvalidAddress(String),
    #[error("bad checksum for token address {0:?}")]
    BadChecksum(String),
}

/// Scale a decimal string by `10^decimals` into an integer string.
///
/// Trailing zeros of the fraction are ignored; any remaining fractional digit
/// beyond `decimals` is an error rather than being rounded away. The result is
/// canonical (`"0"` for zero, no leading zeros).
pub fn parse_units(quantity: &str, decimals: u8) -> Result<String, UnitsError> {
    let malformed = || UnitsError::Malformed(quantity.to_string());

    let (integer_part, fraction_part) = match quantity.split_once('.') {
        Some((integer, fraction)) => (integer, fraction),
        None => (quantity, ""),
    };

    if integer_part.is_empty() && fraction_part.is_empty() {
        return Err(malformed());
    }
    if !integer_part.bytes().all(|b| b.is_ascii_digit()) || !fraction_part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed());
    }

    let fraction = fraction_part.trim_end_matches('0');
    let scale = decimals as usize;
    if fraction.len() > scale {
        return Err(UnitsError::TooManyDecimals { quantity: quantity.to_string(), decimals });
    }

    let mut digits = String::with_capacity(integer_part.len() + scale + 1);
    digits.push_str(if integer_part.is_empty() { "0" } else { integer_part });
    digits.push_str(fraction);
    digits.extend(std::iter::repeat('0').take(scale - fraction.len()));

    let value = U256::from_str_radix(&digits, 10).map_err(|_| UnitsError::Overflow(quantity.to_string()))?;
    Ok(value.to_string())
}

/// Canonical `"{chainId}-{address}"` id for a remote token.
///
/// Native currencies use the chain's placeholder address; ERC-20 addresses are
/// EIP-55 checksummed. Mixed-case input must already carry a valid checksum.
pub fn currency_id(token: &RemoteToken) -> Result<String, CurrencyError> {
    let chain_id = supported_chain_id(&token.chain)
        .ok_or_else(|| CurrencyError::UnsupportedChain(token.chain.to_string()))?;

    let address = match (&token.standard, token.address.as_deref()) {
        (Some(TokenStandard::Native), _) | (_, None) | (_, Some("NATIVE")) => {
            return Ok(format!("{chain_id}-{}", native_address(chain_id)));
        }
        (_, Some(address)) => address,
    };

    let parsed = Address::from_str(address).map_err(|_| CurrencyError::InvalidAddress(address.to_string()))?;
    let checksummed = parsed.to_checksum(None);

    let hex = address.trim_start_matches("0x");
    let mixed_case = hex.bytes().any(|b| b.is_ascii_uppercase()) && hex.bytes().any(|b| b.is_ascii_lowercase());
    if mixed_case && checksummed != address {
        return Err(CurrencyError::BadChecksum(address.to_string()));
    }

    Ok(format!("{chain_id}-{checksummed}"))
}
