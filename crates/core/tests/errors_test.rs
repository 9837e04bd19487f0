use std::error::Error;

use bookwise_core::errors::{BookingError, BookingResult};

#[test]
fn test_booking_error_display() {
    let not_found = BookingError::NotFound("Vendor not found".to_string());
    let validation = BookingError::Validation("Invalid input".to_string());
    let conflict = BookingError::Conflict("Slot taken".to_string());
    let not_eligible = BookingError::NotEligible("Wrong service".to_string());
    let database = BookingError::Database(eyre::eyre!("Database connection failed"));
    let internal = BookingError::Internal(Box::new(std::io::Error::new(
        std::io::ErrorKind::Other,
        "Internal error",
    )));

    assert_eq!(not_found.to_string(), "Resource not found: Vendor not found");
    assert_eq!(validation.to_string(), "Validation error: Invalid input");
    assert_eq!(conflict.to_string(), "Booking conflict: Slot taken");
    assert_eq!(not_eligible.to_string(), "Staff not eligible: Wrong service");
    assert!(database.to_string().contains("Database error:"));
    assert!(internal.to_string().contains("Internal server error:"));
}

#[test]
fn test_error_kinds() {
    assert_eq!(BookingError::NotFound(String::new()).kind(), "not_found");
    assert_eq!(BookingError::Validation(String::new()).kind(), "validation");
    assert_eq!(BookingError::Conflict(String::new()).kind(), "conflict");
    assert_eq!(
        BookingError::NotEligible(String::new()).kind(),
        "not_eligible"
    );
    assert_eq!(BookingError::Database(eyre::eyre!("boom")).kind(), "database");
}

#[test]
fn test_error_conversion() {
    let io_error = std::io::Error::new(std::io::ErrorKind::Other, "IO error");
    let booking_error = BookingError::Internal(Box::new(io_error));

    assert!(booking_error.source().is_some());
}

#[test]
fn test_booking_result() {
    let result: BookingResult<i32> = Ok(42);
    assert_eq!(result.unwrap(), 42);

    let result: BookingResult<i32> = Err(BookingError::NotFound("Not found".to_string()));
    assert!(result.is_err());
}

#[test]
fn test_from_trait_implementation() {
    let eyre_error = eyre::eyre!("Database error");
    let booking_error = BookingError::Database(eyre_error);

    assert!(booking_error.to_string().contains("Database error"));
}

#[test]
fn test_box_error_conversion() {
    let io_error = std::io::Error::new(std::io::ErrorKind::Other, "IO error");
    let boxed_error: Box<dyn Error + Send + Sync> = Box::new(io_error);
    let booking_error = BookingError::Internal(boxed_error);

    assert!(booking_error.to_string().contains("IO error"));
}
