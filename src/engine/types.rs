use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type ChainId = u64;

// Kind of off-chain signature a record tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignatureType {
    SignUniswapxOrder,
    SignUniswapxV2Order,
    SignUniswapxV3Order,
    SignPriorityOrder,
    SignLimit,
}

// Lifecycle stage of a signed order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Open,
    Expired,
    Error,
    InsufficientFunds,
    Filled,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeType {
    ExactInput,
    ExactOutput,
}

/// Trade intent behind a signed order. Amounts are raw base-unit strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapInfo {
    pub is_uniswap_x_order: bool,
    pub trade_type: TradeType,
    pub input_currency_id: String,
    pub output_currency_id: String,
    pub input_currency_amount_raw: String,
    pub expected_output_currency_amount_raw: String,
    pub minimum_output_currency_amount_raw: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settled_output_currency_amount_raw: Option<String>,
}

/// Locally tracked off-chain-signed order.
///
/// `tx_hash` and `swap_info.settled_output_currency_amount_raw` are only
/// expected when `status` is [`OrderStatus::Filled`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureDetails {
    pub id: String,
    #[serde(rename = "type")]
    pub ty: SignatureType,
    pub offerer: String,
    pub chain_id: ChainId,
    pub order_hash: String,
    pub expiry: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoded_order: Option<String>,
    pub added_time: u64,
    pub status: OrderStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tx_hash: Option<String>,
    pub swap_info: SwapInfo,
}

// Commands accepted by the book (dispatcher, journal and replay all speak this)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", content = "signature", rename_all = "snake_case")]
pub enum SignatureCommand {
    Add(SignatureDetails),
    Update(SignatureDetails),
    Remove(SignatureDetails),
}

impl SignatureCommand {
    pub fn signature(&self) -> &SignatureDetails {
        match self {
            SignatureCommand::Add(s) | SignatureCommand::Update(s) | SignatureCommand::Remove(s) => s,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookError {
    #[error("no signature {id} tracked for account {offerer}")]
    NotFound { offerer: String, id: String },
}
