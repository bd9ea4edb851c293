use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// One tier of the matching-fee table
///
/// A band covers every deal total up to and including `max_amount_inclusive`
/// that an earlier band did not already claim. `None` marks the open-ended
/// top tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
pub struct FeeBand {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(type = "number | null")]
    pub max_amount_inclusive: Option<i64>,
    #[ts(type = "string")]
    pub rate: Decimal,
}

impl FeeBand {
    pub fn up_to(max_amount_inclusive: i64, rate: Decimal) -> Self {
        Self {
            max_amount_inclusive: Some(max_amount_inclusive),
            rate,
        }
    }

    pub fn open_ended(rate: Decimal) -> Self {
        Self {
            max_amount_inclusive: None,
            rate,
        }
    }

    pub fn is_open_ended(&self) -> bool {
        self.max_amount_inclusive.is_none()
    }

    /// Whether a total falls at or below this band's ceiling
    pub fn covers(&self, total: i64) -> bool {
        self.max_amount_inclusive.is_none_or(|max| total <= max)
    }
}
