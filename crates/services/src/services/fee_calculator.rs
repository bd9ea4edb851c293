//! Matching-fee calculator for settlements.

use std::str::FromStr;

use domain::models::{
    fee_quote::{FeeComputationResult, FeeQuoteRequest},
    payment_method::PaymentMethod,
};
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, info};
use utils::money::{ceil_to_unit, floor_yen};

use super::fee_schedule::{FeeSchedule, FeeScheduleError};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeeCalculatorError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Computes the platform's matching fee against a validated fee schedule
#[derive(Debug, Clone)]
pub struct FeeCalculator {
    schedule: FeeSchedule,
}

impl FeeCalculator {
    pub fn new(schedule: FeeSchedule) -> Result<Self, FeeScheduleError> {
        schedule.validate()?;

        info!(
            rounding_unit = schedule.rounding_unit,
            stripe_fee_rate = %schedule.stripe_fee_rate,
            referral_pct = %schedule.referral_pct,
            "Fee calculator ready"
        );

        Ok(Self { schedule })
    }

    /// Build a calculator from `NEEDPORT_FEE_SCHEDULE` or the built-in table
    pub fn from_env() -> Result<Self, FeeScheduleError> {
        Self::new(FeeSchedule::from_env()?)
    }

    pub fn schedule(&self) -> &FeeSchedule {
        &self.schedule
    }

    /// Rate of the first band whose ceiling is at or above `total`.
    ///
    /// Totals beyond every ceiling take the last band's rate.
    pub fn pick_rate(&self, total: i64, method: PaymentMethod) -> Decimal {
        let bands = self.schedule.bands(method);
        bands
            .iter()
            .find(|band| band.covers(total))
            .or_else(|| bands.last())
            .map(|band| band.rate)
            // unreachable: validation rejects empty band lists
            .unwrap_or(Decimal::ZERO)
    }

    pub fn compute(
        &self,
        quantity: i64,
        unit_price: i64,
        method: PaymentMethod,
    ) -> Result<FeeComputationResult, FeeCalculatorError> {
        if quantity <= 0 {
            return Err(FeeCalculatorError::InvalidInput(format!(
                "quantity must be positive, got {}",
                quantity
            )));
        }
        if unit_price < 0 {
            return Err(FeeCalculatorError::InvalidInput(format!(
                "unit price must not be negative, got {}",
                unit_price
            )));
        }

        let total = quantity
            .checked_mul(unit_price)
            .ok_or_else(|| {
                FeeCalculatorError::InvalidInput(format!(
                    "deal total {} x {} is out of range",
                    quantity, unit_price
                ))
            })?
            .max(0);
        let total_dec = Decimal::from(total);

        let rate = self.pick_rate(total, method);
        let fee_raw = total_dec * rate;
        let referral = total_dec * self.schedule.referral_pct;
        let referral_buf = floor_yen(referral).ok_or_else(out_of_range)?;
        let stripe_cost = if method.is_card() {
            let processor_cost = fee_raw * self.schedule.stripe_fee_rate;
            floor_yen(processor_cost).ok_or_else(out_of_range)?
        } else {
            0
        };
        let unit = self.schedule.rounding_unit;
        let fee = ceil_to_unit(fee_raw, unit).ok_or_else(out_of_range)?;

        debug!(
            total,
            method = %method,
            rate = %rate,
            fee,
            "Computed matching fee"
        );

        Ok(FeeComputationResult {
            total,
            method,
            rate,
            fee_raw,
            fee,
            referral_pct: self.schedule.referral_pct,
            referral_buf,
            stripe_cost,
        })
    }

    pub fn quote(
        &self,
        request: &FeeQuoteRequest,
    ) -> Result<FeeComputationResult, FeeCalculatorError> {
        self.compute(request.quantity, request.unit_price, request.method)
    }

    /// Same as [`FeeCalculator::compute`] for callers holding the method as text
    pub fn compute_with_method_str(
        &self,
        quantity: i64,
        unit_price: i64,
        method: &str,
    ) -> Result<FeeComputationResult, FeeCalculatorError> {
        let method = PaymentMethod::from_str(method).map_err(|_| {
            FeeCalculatorError::InvalidInput(format!("unknown payment method '{}'", method))
        })?;
        self.compute(quantity, unit_price, method)
    }
}

fn out_of_range() -> FeeCalculatorError {
    FeeCalculatorError::InvalidInput("fee amount is out of range".to_string())
}
