//! BR Format - Brazilian-Portuguese value formatting
//!
//! This crate provides:
//! - Currency formatting (R$ prefix, dot grouping, comma decimals)
//! - Plain number formatting (trailing zeros stripped)
//! - Percentage formatting for discount limits
//! - Placeholder substitution for absent values
//!
//! All numeric input is [`rust_decimal::Decimal`]; monetary rounding must
//! match the formatted display exactly, so binary floating point never
//! enters these functions.
//!
//! # Example
//!
//! ```
//! use rust_decimal::Decimal;
//!
//! let price: Decimal = "1234.5".parse().unwrap();
//! assert_eq!(br_format::format_currency(Some(&price)), "R$ 1.234,50");
//! assert_eq!(br_format::format_currency(None), "-");
//! ```

mod formatter;

pub use formatter::{format_currency, format_number, format_percent, format_text, PLACEHOLDER};
