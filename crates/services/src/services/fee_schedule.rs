//! Matching-fee table: production defaults, TOML loading and startup validation.

use std::path::{Path, PathBuf};

use domain::models::{fee_band::FeeBand, payment_method::PaymentMethod};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use thiserror::Error;
use tracing::{info, warn};
use ts_rs::TS;

/// Environment variable naming a TOML file that replaces the built-in table
pub const FEE_SCHEDULE_ENV: &str = "NEEDPORT_FEE_SCHEDULE";

#[derive(Debug, Error)]
pub enum FeeScheduleError {
    #[error("failed to read fee schedule {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse fee schedule: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("misconfigured {method} bands: {reason}")]
    MisconfiguredBands {
        method: PaymentMethod,
        reason: String,
    },
    #[error("invalid fee setting: {0}")]
    InvalidSetting(String),
}

/// Fee bands per payment method plus the rounding and reference rates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
pub struct FeeSchedule {
    #[ts(type = "number")]
    pub rounding_unit: i64,
    #[ts(type = "string")]
    pub stripe_fee_rate: Decimal,
    #[ts(type = "string")]
    pub referral_pct: Decimal,
    pub card: Vec<FeeBand>,
    pub bank_transfer: Vec<FeeBand>,
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self {
            rounding_unit: 1_000,
            stripe_fee_rate: dec!(0.036),
            referral_pct: dec!(0.01),
            card: vec![
                FeeBand::up_to(100_000, dec!(0.10)),
                FeeBand::up_to(500_000, dec!(0.09)),
                FeeBand::up_to(1_000_000, dec!(0.08)),
                FeeBand::open_ended(dec!(0.07)),
            ],
            bank_transfer: vec![
                FeeBand::up_to(100_000, dec!(0.09)),
                FeeBand::up_to(500_000, dec!(0.08)),
                FeeBand::up_to(1_000_000, dec!(0.07)),
                FeeBand::open_ended(dec!(0.06)),
            ],
        }
    }
}

impl FeeSchedule {
    pub fn bands(&self, method: PaymentMethod) -> &[FeeBand] {
        match method {
            PaymentMethod::Card => &self.card,
            PaymentMethod::BankTransfer => &self.bank_transfer,
        }
    }

    /// Parse and validate a schedule from TOML
    pub fn from_toml_str(content: &str) -> Result<Self, FeeScheduleError> {
        let schedule: Self = toml::from_str(content)?;
        schedule.validate()?;
        Ok(schedule)
    }

    /// Read a schedule file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FeeScheduleError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| FeeScheduleError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let schedule = Self::from_toml_str(&content)?;

        info!(
            path = %path.display(),
            card_bands = schedule.card.len(),
            bank_transfer_bands = schedule.bank_transfer.len(),
            "Loaded fee schedule"
        );

        Ok(schedule)
    }

    /// Load the file named by `NEEDPORT_FEE_SCHEDULE`, or the built-in table when unset
    pub fn from_env() -> Result<Self, FeeScheduleError> {
        Self::resolve(std::env::var(FEE_SCHEDULE_ENV).ok().as_deref())
    }

    fn resolve(path: Option<&str>) -> Result<Self, FeeScheduleError> {
        match path.map(str::trim).filter(|p| !p.is_empty()) {
            Some(path) => Self::load(path),
            None => {
                info!("{} not set, using built-in fee schedule", FEE_SCHEDULE_ENV);
                Ok(Self::default())
            }
        }
    }

    /// Check the table once before any fee is computed against it
    pub fn validate(&self) -> Result<(), FeeScheduleError> {
        if self.rounding_unit <= 0 {
            return Err(FeeScheduleError::InvalidSetting(format!(
                "rounding_unit must be positive, got {}",
                self.rounding_unit
            )));
        }
        check_fraction("stripe_fee_rate", self.stripe_fee_rate)?;
        check_fraction("referral_pct", self.referral_pct)?;

        for method in PaymentMethod::iter() {
            validate_bands(method, self.bands(method))?;
        }

        Ok(())
    }
}

fn check_fraction(name: &str, value: Decimal) -> Result<(), FeeScheduleError> {
    if value < Decimal::ZERO || value > Decimal::ONE {
        return Err(FeeScheduleError::InvalidSetting(format!(
            "{} must be within [0, 1], got {}",
            name, value
        )));
    }
    Ok(())
}

fn validate_bands(method: PaymentMethod, bands: &[FeeBand]) -> Result<(), FeeScheduleError> {
    let misconfigured = |reason: String| FeeScheduleError::MisconfiguredBands { method, reason };

    if bands.is_empty() {
        return Err(misconfigured("no bands configured".to_string()));
    }

    let mut previous_max: Option<i64> = None;
    for (index, band) in bands.iter().enumerate() {
        if band.rate < Decimal::ZERO || band.rate > Decimal::ONE {
            return Err(misconfigured(format!(
                "band {} rate {} is outside [0, 1]",
                index, band.rate
            )));
        }

        match band.max_amount_inclusive {
            None if index + 1 < bands.len() => {
                return Err(misconfigured(format!(
                    "open-ended band {} must be the last band",
                    index
                )));
            }
            None => {}
            Some(max) if max < 0 => {
                return Err(misconfigured(format!(
                    "band {} threshold {} is negative",
                    index, max
                )));
            }
            Some(max) => {
                if let Some(prev) = previous_max.filter(|prev| max <= *prev) {
                    return Err(misconfigured(format!(
                        "band {} threshold {} does not exceed previous threshold {}",
                        index, max, prev
                    )));
                }
                previous_max = Some(max);
            }
        }
    }

    if bands.windows(2).any(|pair| pair[1].rate > pair[0].rate) {
        warn!(
            method = %method,
            "Fee bands charge a higher rate for larger totals"
        );
    }

    Ok(())
}
