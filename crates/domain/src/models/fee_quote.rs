use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::payment_method::PaymentMethod;

/// Request body for quoting the matching fee of a deal
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct FeeQuoteRequest {
    #[ts(type = "number")]
    pub quantity: i64,
    #[ts(type = "number")]
    pub unit_price: i64,
    pub method: PaymentMethod,
}

/// Matching fee for a deal, with the reference figures shown next to it
///
/// All amounts are whole yen. `fee_raw` keeps the unrounded product of total
/// and rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct FeeComputationResult {
    #[ts(type = "number")]
    pub total: i64,
    pub method: PaymentMethod,
    #[ts(type = "string")]
    pub rate: Decimal,
    #[ts(type = "string")]
    pub fee_raw: Decimal,
    #[ts(type = "number")]
    pub fee: i64,
    #[ts(type = "string")]
    pub referral_pct: Decimal,
    #[ts(type = "number")]
    pub referral_buf: i64,
    #[ts(type = "number")]
    pub stripe_cost: i64,
}

/// Fee columns stored alongside a settlement record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
pub struct SettlementFeeSnapshot {
    pub method: PaymentMethod,
    #[ts(type = "string")]
    pub rate: Decimal,
    #[ts(type = "number")]
    pub fee: i64,
}

impl From<&FeeComputationResult> for SettlementFeeSnapshot {
    fn from(result: &FeeComputationResult) -> Self {
        Self {
            method: result.method,
            rate: result.rate,
            fee: result.fee,
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn sample_result() -> FeeComputationResult {
        FeeComputationResult {
            total: 90_000,
            method: PaymentMethod::Card,
            rate: dec!(0.10),
            fee_raw: dec!(9000.00),
            fee: 9_000,
            referral_pct: dec!(0.01),
            referral_buf: 900,
            stripe_cost: 324,
        }
    }

    #[test]
    fn test_request_uses_camel_case_keys() {
        let request: FeeQuoteRequest = serde_json::from_value(serde_json::json!({
            "quantity": 3,
            "unitPrice": 30000,
            "method": "bank_transfer",
        }))
        .unwrap();
        assert_eq!(request.quantity, 3);
        assert_eq!(request.unit_price, 30_000);
        assert_eq!(request.method, PaymentMethod::BankTransfer);
    }

    #[test]
    fn test_request_rejects_unknown_method() {
        let result = serde_json::from_value::<FeeQuoteRequest>(serde_json::json!({
            "quantity": 1,
            "unitPrice": 1000,
            "method": "cash",
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_result_serializes_for_web_client() {
        let json = serde_json::to_value(sample_result()).unwrap();
        assert_eq!(json["feeRaw"], "9000.00");
        assert_eq!(json["referralBuf"], 900);
        assert_eq!(json["stripeCost"], 324);
        assert_eq!(json["method"], "card");
    }

    #[test]
    fn test_snapshot_keeps_persisted_columns() {
        let snapshot = SettlementFeeSnapshot::from(&sample_result());
        assert_eq!(snapshot.method, PaymentMethod::Card);
        assert_eq!(snapshot.rate, dec!(0.10));
        assert_eq!(snapshot.fee, 9_000);
    }
}
