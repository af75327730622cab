use crate::activity::types::GqlChain;
use crate::engine::types::ChainId;

pub const POLYGON_CHAIN_ID: ChainId = 137;

// Placeholder addresses used in native currency ids
pub const DEFAULT_NATIVE_ADDRESS: &str = "0xeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeee";
pub const POLYGON_NATIVE_ADDRESS: &str = "0x0000000000000000000000000000000000001010";

/// Chain id for a remote chain tag, or `None` when the chain is not supported.
pub fn supported_chain_id(chain: &GqlChain) -> Option<ChainId> {
    match chain {
        GqlChain::Ethereum => Some(1),
        GqlChain::EthereumSepolia => Some(11_155_111),
        GqlChain::Arbitrum => Some(42_161),
        GqlChain::Optimism => Some(10),
        GqlChain::Polygon => Some(POLYGON_CHAIN_ID),
        GqlChain::Base => Some(8_453),
        GqlChain::Bnb => Some(56),
        GqlChain::Avalanche => Some(43_114),
        GqlChain::Celo => Some(42_220),
        GqlChain::Blast => Some(81_457),
        GqlChain::Zora => Some(7_777_777),
        GqlChain::Zksync => Some(324),
        GqlChain::Worldchain => Some(480),
        GqlChain::Unichain => Some(130),
        GqlChain::Soneium => Some(1_868),
        GqlChain::EthereumGoerli | GqlChain::Fantom | GqlChain::Unknown(_) => None,
    }
}

pub fn native_address(chain_id: ChainId) -> &'static str {
    match chain_id {
        POLYGON_CHAIN_ID => POLYGON_NATIVE_ADDRESS,
        _ => DEFAULT_NATIVE_ADDRESS,
    }
}
