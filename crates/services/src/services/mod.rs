pub mod fee_calculator;
pub mod fee_schedule;
