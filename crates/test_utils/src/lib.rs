//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! quote engine test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built children, rosters and amounts
//! - `builders`: Builder patterns for test data construction
//! - `assertions`: Custom assertion helpers for money and breakdowns
//! - `generators`: Property-based test data generators
//! - `logging`: Tracing subscriber for tests

pub mod fixtures;
pub mod builders;
pub mod assertions;
pub mod generators;
pub mod logging;

pub use fixtures::*;
pub use builders::*;
pub use assertions::*;
pub use generators::*;
pub use logging::init_tracing;
