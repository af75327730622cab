use thiserror::Error;
use tracing::{debug, error, instrument};

use crate::activity::chain::supported_chain_id;
use crate::activity::normaliser::{currency_id, parse_units, CurrencyError, UnitsError, DEFAULT_DECIMALS};
use crate::activity::router::SignatureSink;
use crate::activity::types::{GqlChain, OrderActivity, RemoteToken, SwapOrderStatus, SwapOrderType};
use crate::engine::types::{OrderStatus, SignatureCommand, SignatureDetails, SignatureType, SwapInfo, TradeType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Input,
    Output,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Input => write!(f, "input"),
            Side::Output => write!(f, "output"),
        }
    }
}

/// Why a remote activity could not be turned into a [`SignatureDetails`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidActivity {
    #[error("invalid activity from unsupported chain {chain}")]
    UnsupportedChain { chain: GqlChain },
    #[error("invalid activity: {side} quantity {quantity:?} is zero in base units")]
    InvalidQuantity { side: Side, quantity: String },
    #[error("invalid activity: {side} quantity: {source}")]
    MalformedQuantity { side: Side, source: UnitsError },
    #[error("invalid activity: {side} currency: {reason}")]
    InvalidCurrency { side: Side, reason: CurrencyError },
    #[error("invalid activity: order type {order_type:?} has no local signature type")]
    UnmappedOrderType { order_type: SwapOrderType },
}

pub fn order_status(status: SwapOrderStatus) -> OrderStatus {
    match status {
        SwapOrderStatus::Open => OrderStatus::Open,
        SwapOrderStatus::Expired => OrderStatus::Expired,
        SwapOrderStatus::Error => OrderStatus::Error,
        SwapOrderStatus::InsufficientFunds => OrderStatus::InsufficientFunds,
        SwapOrderStatus::Filled => OrderStatus::Filled,
        SwapOrderStatus::Cancelled => OrderStatus::Cancelled,
    }
}

pub fn signature_type(order_type: SwapOrderType) -> Result<SignatureType, InvalidActivity> {
    match order_type {
        SwapOrderType::Limit => Ok(SignatureType::SignLimit),
        SwapOrderType::Dutch => Ok(SignatureType::SignUniswapxOrder),
        SwapOrderType::DutchV2 => Ok(SignatureType::SignUniswapxV2Order),
        SwapOrderType::Priority => Ok(SignatureType::SignPriorityOrder),
        // TODO: map to SignUniswapxV3Order once the remote feed serves v3 orders
        SwapOrderType::DutchV3 => Err(InvalidActivity::UnmappedOrderType { order_type }),
    }
}

fn base_units(side: Side, token: &RemoteToken, quantity: &str) -> Result<String, InvalidActivity> {
    let raw = parse_units(quantity, token.decimals.unwrap_or(DEFAULT_DECIMALS))
        .map_err(|source| InvalidActivity::MalformedQuantity { side, source })?;
    if raw == "0" {
        return Err(InvalidActivity::InvalidQuantity { side, quantity: quantity.to_string() });
    }
    Ok(raw)
}

fn resolve_currency(side: Side, token: &RemoteToken) -> Result<String, InvalidActivity> {
    currency_id(token).map_err(|reason| InvalidActivity::InvalidCurrency { side, reason })
}

/// Normalise one remote order activity into a local signature record.
///
/// Open orders are also submitted to `sink` as an add; the sink decides when
/// that happens and nothing here waits for it. On error nothing is submitted.
#[instrument(skip_all, fields(order_id = %activity.details.id, chain = %activity.chain))]
pub fn parse_remote<S>(activity: &OrderActivity, sink: &S) -> Result<SignatureDetails, InvalidActivity>
where
    S: SignatureSink + ?Sized,
{
    let details = &activity.details;

    let chain_id = match supported_chain_id(&activity.chain) {
        Some(chain_id) => chain_id,
        None => {
            let error = InvalidActivity::UnsupportedChain { chain: activity.chain.clone() };
            error!(error = %error, details = ?details, "Invalid activity from unsupported chain received from remote feed");
            return Err(error);
        }
    };

    let status = order_status(details.order_status);
    let is_filled = status == OrderStatus::Filled;

    let input_amount = base_units(Side::Input, &details.input_token, &details.input_token_quantity)?;
    let output_amount = base_units(Side::Output, &details.output_token, &details.output_token_quantity)?;

    let input_currency_id = resolve_currency(Side::Input, &details.input_token)?;
    let output_currency_id = resolve_currency(Side::Output, &details.output_token)?;

    let ty = signature_type(details.swap_order_type)?;

    let signature = SignatureDetails {
        id: details.id.clone(),
        ty,
        offerer: details.offerer.clone(),
        chain_id,
        order_hash: details.hash.clone(),
        expiry: details.expiry,
        encoded_order: details.encoded_order.clone(),
        added_time: activity.timestamp,
        status,
        // the feed has no separate settlement hash at this point
        tx_hash: is_filled.then(|| details.hash.clone()),
        swap_info: SwapInfo {
            is_uniswap_x_order: true,
            // not derivable from the remote activity
            trade_type: TradeType::ExactInput,
            input_currency_id,
            output_currency_id,
            input_currency_amount_raw: input_amount,
            expected_output_currency_amount_raw: output_amount.clone(),
            minimum_output_currency_amount_raw: output_amount.clone(),
            settled_output_currency_amount_raw: is_filled.then_some(output_amount),
        },
    };

    if status == OrderStatus::Open {
        debug!(offerer = %signature.offerer, "Scheduling add of open signature");
        sink.submit(SignatureCommand::Add(signature.clone()));
    }

    Ok(signature)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activity::router::spawn_applier;
    use crate::activity::types::{RemoteOrderDetails, TokenStandard};
    use crate::engine::book::SignatureBook;
    use std::sync::Mutex;

    const OFFERER: &str = "0x1111111111111111111111111111111111111111";

    #[derive(Default)]
    struct RecordingSink(Mutex<Vec<SignatureCommand>>);

    impl SignatureSink for RecordingSink {
        fn submit(&self, command: SignatureCommand) {
            self.0.lock().unwrap().push(command);
        }
    }

    impl RecordingSink {
        fn commands(&self) -> Vec<SignatureCommand> {
            self.0.lock().unwrap().clone()
        }
    }

    fn activity(status: SwapOrderStatus, order_type: SwapOrderType) -> OrderActivity {
        OrderActivity {
            chain: GqlChain::Ethereum,
            timestamp: 1_700_000_000,
            details: RemoteOrderDetails {
                id: "order-1".to_string(),
                offerer: OFFERER.to_string(),
                hash: "0xhash".to_string(),
                order_status: status,
                swap_order_type: order_type,
                expiry: 1_700_000_600,
                encoded_order: Some("0xdeadbeef".to_string()),
                input_token: RemoteToken {
                    chain: GqlChain::Ethereum,
                    address: None,
                    standard: Some(TokenStandard::Native),
                    decimals: Some(18),
                    symbol: Some("ETH".to_string()),
                },
                output_token: RemoteToken {
                    chain: GqlChain::Ethereum,
                    address: Some("0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48".to_string()),
                    standard: Some(TokenStandard::Erc20),
                    decimals: Some(6),
                    symbol: Some("USDC".to_string()),
                },
                input_token_quantity: "1.5".to_string(),
                output_token_quantity: "1500.0".to_string(),
            },
        }
    }

    #[test]
    fn test_open_dutch_order() {
        let sink = RecordingSink::default();
        let sig = parse_remote(&activity(SwapOrderStatus::Open, SwapOrderType::Dutch), &sink).unwrap();

        assert_eq!(sig.ty, SignatureType::SignUniswapxOrder);
        assert_eq!(sig.status, OrderStatus::Open);
        assert_eq!(sig.chain_id, 1);
        assert_eq!(sig.offerer, OFFERER);
        assert_eq!(sig.added_time, 1_700_000_000);
        assert_eq!(sig.encoded_order.as_deref(), Some("0xdeadbeef"));
        assert_eq!(sig.tx_hash, None);
        assert_eq!(sig.swap_info.input_currency_amount_raw, "1500000000000000000");
        assert_eq!(sig.swap_info.expected_output_currency_amount_raw, "1500000000");
        assert_eq!(sig.swap_info.minimum_output_currency_amount_raw, "1500000000");
        assert_eq!(sig.swap_info.settled_output_currency_amount_raw, None);
        assert_eq!(sig.swap_info.input_currency_id, "1-0xeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeee");
        assert_eq!(sig.swap_info.output_currency_id, "1-0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48");
        assert_eq!(sig.swap_info.trade_type, TradeType::ExactInput);
        assert!(sig.swap_info.is_uniswap_x_order);

        assert_eq!(sink.commands(), vec![SignatureCommand::Add(sig)]);
    }

    #[test]
    fn test_filled_order() {
        let sink = RecordingSink::default();
        let sig = parse_remote(&activity(SwapOrderStatus::Filled, SwapOrderType::Dutch), &sink).unwrap();

        assert_eq!(sig.status, OrderStatus::Filled);
        assert_eq!(sig.tx_hash.as_deref(), Some("0xhash"));
        assert_eq!(
            sig.swap_info.settled_output_currency_amount_raw.as_ref(),
            Some(&sig.swap_info.expected_output_currency_amount_raw)
        );
        assert!(sink.commands().is_empty());
    }

    #[test]
    fn test_non_open_statuses_not_scheduled() {
        for status in [
            SwapOrderStatus::Expired,
            SwapOrderStatus::Error,
            SwapOrderStatus::InsufficientFunds,
            SwapOrderStatus::Cancelled,
        ] {
            let sink = RecordingSink::default();
            let sig = parse_remote(&activity(status, SwapOrderType::Limit), &sink).unwrap();
            assert_eq!(sig.status, order_status(status));
            assert_eq!(sig.tx_hash, None);
            assert_eq!(sig.swap_info.settled_output_currency_amount_raw, None);
            assert!(sink.commands().is_empty());
        }
    }

    #[test]
    fn test_order_type_mapping() {
        let sink = RecordingSink::default();
        let cases = [
            (SwapOrderType::Limit, SignatureType::SignLimit),
            (SwapOrderType::Dutch, SignatureType::SignUniswapxOrder),
            (SwapOrderType::DutchV2, SignatureType::SignUniswapxV2Order),
            (SwapOrderType::Priority, SignatureType::SignPriorityOrder),
        ];
        for (order_type, expected) in cases {
            let sig = parse_remote(&activity(SwapOrderStatus::Expired, order_type), &sink).unwrap();
            assert_eq!(sig.ty, expected);
        }
    }

    #[test]
    fn test_unmapped_order_type() {
        let sink = RecordingSink::default();
        let err = parse_remote(&activity(SwapOrderStatus::Open, SwapOrderType::DutchV3), &sink).unwrap_err();
        assert_eq!(err, InvalidActivity::UnmappedOrderType { order_type: SwapOrderType::DutchV3 });
        assert!(sink.commands().is_empty());
    }

    #[test]
    fn test_unsupported_chain() {
        let sink = RecordingSink::default();
        let mut remote = activity(SwapOrderStatus::Open, SwapOrderType::Dutch);
        remote.chain = GqlChain::Unknown("UNKNOWN_CHAIN".to_string());

        let err = parse_remote(&remote, &sink).unwrap_err();
        assert_eq!(err, InvalidActivity::UnsupportedChain { chain: GqlChain::Unknown("UNKNOWN_CHAIN".to_string()) });
        assert!(sink.commands().is_empty());
    }

    #[test]
    fn test_zero_amount_rejected() {
        let sink = RecordingSink::default();
        let mut remote = activity(SwapOrderStatus::Open, SwapOrderType::Dutch);
        remote.details.output_token_quantity = "0.000000".to_string();

        let err = parse_remote(&remote, &sink).unwrap_err();
        assert_eq!(err, InvalidActivity::InvalidQuantity { side: Side::Output, quantity: "0.000000".to_string() });
        assert!(sink.commands().is_empty());

        let mut remote = activity(SwapOrderStatus::Open, SwapOrderType::Dutch);
        remote.details.input_token_quantity = "0".to_string();
        let err = parse_remote(&remote, &sink).unwrap_err();
        assert!(matches!(err, InvalidActivity::InvalidQuantity { side: Side::Input, .. }));
        assert!(sink.commands().is_empty());
    }

    #[test]
    fn test_excess_precision_rejected() {
        let sink = RecordingSink::default();
        let mut remote = activity(SwapOrderStatus::Open, SwapOrderType::Dutch);
        remote.details.output_token_quantity = "1.0000001".to_string();

        let err = parse_remote(&remote, &sink).unwrap_err();
        assert!(matches!(
            err,
            InvalidActivity::MalformedQuantity { side: Side::Output, source: UnitsError::TooManyDecimals { decimals: 6, .. } }
        ));
        assert!(sink.commands().is_empty());
    }

    #[test]
    fn test_missing_decimals_default_to_18() {
        let sink = RecordingSink::default();
        let mut remote = activity(SwapOrderStatus::Expired, SwapOrderType::Dutch);
        remote.details.output_token.decimals = None;

        let sig = parse_remote(&remote, &sink).unwrap();
        assert_eq!(sig.swap_info.expected_output_currency_amount_raw, "1500000000000000000000");
    }

    #[test]
    fn test_invalid_currency_rejected() {
        let sink = RecordingSink::default();
        let mut remote = activity(SwapOrderStatus::Open, SwapOrderType::Dutch);
        remote.details.output_token.address = Some("0xnot-an-address".to_string());

        let err = parse_remote(&remote, &sink).unwrap_err();
        assert!(matches!(err, InvalidActivity::InvalidCurrency { side: Side::Output, .. }));
        assert!(sink.commands().is_empty());
    }

    #[test]
    fn test_deserialises_remote_json() {
        let json = r#"{
            "chain": "ETHEREUM",
            "timestamp": 1700000000,
            "details": {
                "id": "order-1",
                "offerer": "0x1111111111111111111111111111111111111111",
                "hash": "0xhash",
                "orderStatus": "OPEN",
                "swapOrderType": "DUTCH_V2",
                "expiry": 1700000600,
                "encodedOrder": "0xdeadbeef",
                "inputToken": { "chain": "ETHEREUM", "standard": "NATIVE", "decimals": 18, "symbol": "ETH" },
                "outputToken": {
                    "chain": "ETHEREUM",
                    "address": "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48",
                    "standard": "ERC20",
                    "decimals": 6
                },
                "inputTokenQuantity": "1.5",
                "outputTokenQuantity": "1500.0"
            }
        }"#;
        let remote: OrderActivity = serde_json::from_str(json).unwrap();
        assert_eq!(remote.details.swap_order_type, SwapOrderType::DutchV2);

        let mut expected = activity(SwapOrderStatus::Open, SwapOrderType::DutchV2);
        expected.details.output_token.symbol = None;
        assert_eq!(remote, expected);
    }

    #[tokio::test]
    async fn test_open_order_lands_in_book_later() {
        let book = SignatureBook::shared();
        let (dispatcher, handle) = spawn_applier(book.clone());

        let sig = parse_remote(&activity(SwapOrderStatus::Open, SwapOrderType::Dutch), &dispatcher).unwrap();
        assert!(book.lock().get(OFFERER, "order-1").is_none());

        drop(dispatcher);
        handle.await.unwrap();
        assert_eq!(book.lock().get(OFFERER, "order-1"), Some(&sig));
    }

    #[tokio::test]
    async fn test_filled_order_never_reaches_book() {
        let book = SignatureBook::shared();
        let (dispatcher, handle) = spawn_applier(book.clone());

        parse_remote(&activity(SwapOrderStatus::Filled, SwapOrderType::Dutch), &dispatcher).unwrap();
        drop(dispatcher);
        handle.await.unwrap();
        assert!(book.lock().is_empty());
    }
}
