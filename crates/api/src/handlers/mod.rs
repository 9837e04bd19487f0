pub mod availability;
pub mod booking;

use bookwise_core::errors::BookingError;
use bookwise_db::models::{DbService, DbVendor};
use chrono_tz::Tz;

/// Parses the vendor's stored IANA zone name. A bad zone is a data problem,
/// not a caller problem.
pub(crate) fn vendor_timezone(vendor: &DbVendor) -> Result<Tz, BookingError> {
    vendor.timezone.parse().map_err(|_| {
        BookingError::Internal(
            format!(
                "Vendor {} has an invalid time zone: {}",
                vendor.id, vendor.timezone
            )
            .into(),
        )
    })
}

/// Duration always comes from the current service record, never from the
/// client. Services shorter than 15 minutes are out of policy.
pub(crate) fn service_duration(service: &DbService) -> Result<u16, BookingError> {
    u16::try_from(service.duration_minutes)
        .ok()
        .filter(|minutes| *minutes >= 15)
        .ok_or_else(|| {
            BookingError::Validation(format!(
                "Service {} has an invalid duration of {} minutes",
                service.id, service.duration_minutes
            ))
        })
}
