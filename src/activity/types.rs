// Wire shapes of the remote order-activity feed (camelCase JSON, SCREAMING enums)
use serde::{Deserialize, Serialize};
use std::fmt;

/// Chain tag as sent by the remote feed. Tags this crate does not know about
/// are kept verbatim in `Unknown` so they can be reported.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum GqlChain {
    Ethereum,
    EthereumSepolia,
    EthereumGoerli,
    Arbitrum,
    Optimism,
    Polygon,
    Base,
    Bnb,
    Avalanche,
    Celo,
    Blast,
    Zora,
    Zksync,
    Worldchain,
    Unichain,
    Soneium,
    Fantom,
    Unknown(String),
}

impl GqlChain {
    pub fn as_str(&self) -> &str {
        match self {
            GqlChain::Ethereum => "ETHEREUM",
            GqlChain::EthereumSepolia => "ETHEREUM_SEPOLIA",
            GqlChain::EthereumGoerli => "ETHEREUM_GOERLI",
            GqlChain::Arbitrum => "ARBITRUM",
            GqlChain::Optimism => "OPTIMISM",
            GqlChain::Polygon => "POLYGON",
            GqlChain::Base => "BASE",
            GqlChain::Bnb => "BNB",
            GqlChain::Avalanche => "AVALANCHE",
            GqlChain::Celo => "CELO",
            GqlChain::Blast => "BLAST",
            GqlChain::Zora => "ZORA",
            GqlChain::Zksync => "ZKSYNC",
            GqlChain::Worldchain => "WORLDCHAIN",
            GqlChain::Unichain => "UNICHAIN",
            GqlChain::Soneium => "SONEIUM",
            GqlChain::Fantom => "FANTOM",
            GqlChain::Unknown(tag) => tag,
        }
    }
}

impl From<String> for GqlChain {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "ETHEREUM" => GqlChain::Ethereum,
            "ETHEREUM_SEPOLIA" => GqlChain::EthereumSepolia,
            "ETHEREUM_GOERLI" => GqlChain::EthereumGoerli,
            "ARBITRUM" => GqlChain::Arbitrum,
            "OPTIMISM" => GqlChain::Optimism,
            "POLYGON" => GqlChain::Polygon,
            "BASE" => GqlChain::Base,
            "BNB" => GqlChain::Bnb,
            "AVALANCHE" => GqlChain::Avalanche,
            "CELO" => GqlChain::Celo,
            "BLAST" => GqlChain::Blast,
            "ZORA" => GqlChain::Zora,
            "ZKSYNC" => GqlChain::Zksync,
            "WORLDCHAIN" => GqlChain::Worldchain,
            "UNICHAIN" => GqlChain::Unichain,
            "SONEIUM" => GqlChain::Soneium,
            "FANTOM" => GqlChain::Fantom,
            _ => GqlChain::Unknown(tag),
        }
    }
}

impl From<GqlChain> for String {
    fn from(chain: GqlChain) -> Self {
        match chain {
            GqlChain::Unknown(tag) => tag,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for GqlChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SwapOrderStatus {
    Open,
    Expired,
    Error,
    InsufficientFunds,
    Filled,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SwapOrderType {
    Limit,
    Dutch,
    DutchV2,
    DutchV3,
    Priority,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenStandard {
    Native,
    Erc20,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteToken {
    pub chain: GqlChain,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub standard: Option<TokenStandard>,
    #[serde(default)]
    pub decimals: Option<u8>, // missing => 18
    #[serde(default)]
    pub symbol: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteOrderDetails {
    pub id: String,
    pub offerer: String,
    pub hash: String,
    pub order_status: SwapOrderStatus,
    pub swap_order_type: SwapOrderType,
    pub expiry: u64,
    #[serde(default)]
    pub encoded_order: Option<String>,
    pub input_token: RemoteToken,
    pub output_token: RemoteToken,
    pub input_token_quantity: String,  // human readable, e.g. "1.5"
    pub output_token_quantity: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderActivity {
    pub chain: GqlChain,
    pub details: RemoteOrderDetails,
    pub timestamp: u64,
}
