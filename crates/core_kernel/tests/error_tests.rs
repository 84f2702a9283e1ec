//! Tests for core_kernel error types

use core_kernel::error::CoreError;
use core_kernel::money::MoneyError;

#[test]
fn test_core_error_validation() {
    let error = CoreError::validation("Annual fee must be positive");

    match error {
        CoreError::Validation(msg) => assert_eq!(msg, "Annual fee must be positive"),
        _ => panic!("Expected Validation error"),
    }
}

#[test]
fn test_core_error_configuration() {
    let error = CoreError::configuration("Rate table file missing");

    match error {
        CoreError::Configuration(msg) => assert!(msg.contains("Rate table")),
        _ => panic!("Expected Configuration error"),
    }
}

#[test]
fn test_core_error_from_money_error() {
    let money_error = MoneyError::CurrencyMismatch("AUD".to_string(), "NZD".to_string());
    let core_error: CoreError = money_error.into();

    assert!(matches!(core_error, CoreError::Money(_)));
    assert!(core_error.to_string().contains("AUD and NZD"));
}

#[test]
fn test_core_error_display() {
    let error = CoreError::validation("Test error");
    let display = format!("{}", error);

    assert!(display.contains("Validation error"));
}

#[test]
fn test_unknown_currency_display() {
    let error = MoneyError::UnknownCurrency("XYZ".to_string());
    assert_eq!(error.to_string(), "Unknown currency: XYZ");
}
