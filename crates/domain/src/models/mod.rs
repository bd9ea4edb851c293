pub mod fee_band;
pub mod fee_quote;
pub mod payment_method;
