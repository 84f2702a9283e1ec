//! Core Kernel - Foundational value types for the quote engine
//!
//! This crate provides the building blocks shared by the pricing crates:
//! - Money types with exact decimal arithmetic
//! - Rates expressed as decimal fractions
//! - Common error types

pub mod money;
pub mod error;

pub use money::{Money, Currency, MoneyError, Rate};
pub use error::CoreError;
