//! # Booking Handlers
//!
//! Booking creation re-derives duration and price from the current service
//! record, validates the requested time against the resolved staff
//! member's schedule, and then re-checks conflicts atomically at write
//! time. The re-check closes the race between a customer seeing an open
//! slot and confirming it: of two concurrent requests for the same staff
//! member and time, exactly one insert succeeds and the other receives a
//! conflict to retry with fresh availability.
//!
//! With an "any staff" preference the writer tries eligible staff in
//! ascending id order and assigns the first member whose insert succeeds.
//! A named staff member is never silently replaced; if they were raced
//! away the request fails with a conflict instead.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{Duration, Timelike, Utc};
use std::sync::Arc;
use uuid::Uuid;

use bookwise_core::{
    errors::BookingError,
    models::{
        booking::{
            BookingResponse, BookingStatus, CreateBookingRequest, CreateBookingResponse,
            UpdateBookingStatusRequest,
        },
        schedule::TimeOfDay,
        staff::StaffPreference,
    },
    scheduling::{calendar, slots::generate_slots},
};
use bookwise_db::models::DbBooking;
use bookwise_db::repositories::booking::NewBooking;

use crate::{
    handlers::{service_duration, vendor_timezone},
    middleware::error_handling::AppError,
    ApiState,
};

/// Whether one staff member's schedule offers a given slot at all.
enum SlotOffer {
    /// No schedule for that weekday, or the day is marked unavailable
    NotWorking,
    /// Working that day, but the time is off-grid, over a break, or too
    /// close to closing
    NotOffered,
    Offered,
}

async fn staff_slot_offer(
    state: &ApiState,
    staff_id: Uuid,
    weekday: i16,
    time: TimeOfDay,
    duration: u16,
) -> Result<SlotOffer, BookingError> {
    let day = bookwise_db::repositories::staff::load_day_schedule(&state.db_pool, staff_id, weekday)
        .await
        .map_err(BookingError::Database)?;

    let Some(day) = day else {
        return Ok(SlotOffer::NotWorking);
    };
    if !day.is_available {
        return Ok(SlotOffer::NotWorking);
    }

    let candidates = generate_slots(&day, duration, state.grid_minutes);
    if candidates.contains(&time) {
        Ok(SlotOffer::Offered)
    } else {
        Ok(SlotOffer::NotOffered)
    }
}

fn to_booking_response(booking: DbBooking) -> Result<BookingResponse, BookingError> {
    let status: BookingStatus = booking.status.parse()?;
    Ok(BookingResponse {
        id: booking.id,
        customer_id: booking.customer_id,
        vendor_id: booking.vendor_id,
        service_id: booking.service_id,
        staff_id: booking.staff_id,
        start_time: booking.start_time,
        end_time: booking.end_time,
        duration_minutes: booking.duration_minutes,
        price_cents: booking.price_cents,
        status,
        created_at: booking.created_at,
    })
}

/// Creates a booking, assigning staff according to the customer's
/// preference.
///
/// # Endpoint
///
/// ```text
/// POST /api/bookings
/// ```
#[axum::debug_handler]
pub async fn create_booking(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateBookingRequest>,
) -> Result<Json<CreateBookingResponse>, AppError> {
    // STEP 1: Reject past start times outright

    if payload.start_time <= Utc::now() {
        return Err(AppError(BookingError::Validation(
            "Booking start time must be in the future".to_string(),
        )));
    }

    // STEP 2: Catalog lookups; duration and price are snapshots of the
    // current service record

    let service =
        bookwise_db::repositories::service::get_service_by_id(&state.db_pool, payload.service_id)
            .await
            .map_err(BookingError::Database)?
            .ok_or_else(|| {
                BookingError::NotFound(format!("Service with ID {} not found", payload.service_id))
            })?;

    if service.vendor_id != payload.vendor_id {
        return Err(AppError(BookingError::Validation(format!(
            "Service {} does not belong to vendor {}",
            service.id, payload.vendor_id
        ))));
    }
    if !service.is_active {
        return Err(AppError(BookingError::Validation(format!(
            "Service {} is not active",
            service.id
        ))));
    }

    let duration = service_duration(&service)?;

    let vendor = bookwise_db::repositories::vendor::get_vendor_by_id(&state.db_pool, payload.vendor_id)
        .await
        .map_err(BookingError::Database)?
        .ok_or_else(|| {
            BookingError::NotFound(format!("Vendor with ID {} not found", payload.vendor_id))
        })?;

    let tz = vendor_timezone(&vendor)?;

    // STEP 3: Project the requested instant into vendor-local time

    let local = payload.start_time.with_timezone(&tz);
    if local.second() != 0 || local.nanosecond() != 0 {
        return Err(AppError(BookingError::Validation(
            "Booking start time must align to whole minutes".to_string(),
        )));
    }
    let date = local.date_naive();
    let time = TimeOfDay::from_naive(local.time());

    // The local wall-clock pair must project back to the same instant;
    // this rejects the repeated hour of a DST fall-back.
    if calendar::project_local(date, time, tz) != Some(payload.start_time) {
        return Err(AppError(BookingError::Validation(
            "Booking start time is ambiguous in the vendor time zone".to_string(),
        )));
    }
    let weekday = calendar::weekday_index(date);

    // STEP 4: Business hours gate

    let hours = bookwise_db::repositories::vendor::get_vendor_hours_for_weekday(
        &state.db_pool,
        vendor.id,
        weekday,
    )
    .await
    .map_err(BookingError::Database)?;

    if !hours.map(|row| row.is_open).unwrap_or(false) {
        return Err(AppError(BookingError::Validation(format!(
            "Vendor {} is closed on {}",
            vendor.id, date
        ))));
    }

    // STEP 5: Resolve staff candidates from the customer's preference

    let eligible = bookwise_db::repositories::staff::get_eligible_staff(
        &state.db_pool,
        vendor.id,
        service.id,
    )
    .await
    .map_err(BookingError::Database)?;

    let preference = StaffPreference::from_request(payload.staff_id);
    let candidates = match preference {
        StaffPreference::Specific(staff_id) => {
            match eligible.iter().find(|member| member.id == staff_id) {
                Some(member) => vec![member.clone()],
                None => {
                    // Distinguish an unknown staff member from an
                    // ineligible one; the remediation differs.
                    let known =
                        bookwise_db::repositories::staff::get_staff_by_id(&state.db_pool, staff_id)
                            .await
                            .map_err(BookingError::Database)?;
                    return Err(AppError(match known {
                        Some(_) => BookingError::NotEligible(format!(
                            "Staff member {} cannot perform this service",
                            staff_id
                        )),
                        None => BookingError::NotFound(format!(
                            "Staff member {} not found",
                            staff_id
                        )),
                    }));
                }
            }
        }
        StaffPreference::Any => {
            if eligible.is_empty() {
                return Err(AppError(BookingError::NotEligible(
                    "No staff members offer this service".to_string(),
                )));
            }
            eligible
        }
    };

    // STEP 6: Attempt the atomic check-and-insert, lowest staff id first

    let end_time = payload.start_time + Duration::minutes(duration as i64);
    let mut slot_offered = false;

    for member in &candidates {
        match staff_slot_offer(&state, member.id, weekday, time, duration).await? {
            SlotOffer::NotWorking => {
                if let StaffPreference::Specific(_) = preference {
                    return Err(AppError(BookingError::NotEligible(format!(
                        "Staff member {} does not work on {}",
                        member.id, date
                    ))));
                }
                continue;
            }
            SlotOffer::NotOffered => {
                if let StaffPreference::Specific(_) = preference {
                    return Err(AppError(BookingError::Validation(format!(
                        "{} is not a bookable time for staff member {} on {}",
                        time, member.id, date
                    ))));
                }
                continue;
            }
            SlotOffer::Offered => {}
        }
        slot_offered = true;

        let new_booking = NewBooking {
            customer_id: payload.customer_id,
            vendor_id: vendor.id,
            service_id: service.id,
            staff_id: member.id,
            start_time: payload.start_time,
            end_time,
            duration_minutes: duration as i32,
            price_cents: service.price_cents,
        };

        let created = bookwise_db::repositories::booking::create_booking_checked(
            &state.db_pool,
            &new_booking,
            date,
        )
        .await
        .map_err(BookingError::Database)?;

        match created {
            Some(booking) => {
                let status: BookingStatus = booking.status.parse()?;
                return Ok(Json(CreateBookingResponse {
                    booking_id: booking.id,
                    status,
                    start_time: booking.start_time,
                    end_time: booking.end_time,
                    staff_id: booking.staff_id,
                    duration_minutes: booking.duration_minutes,
                    price_cents: booking.price_cents,
                }));
            }
            None => {
                // A named staff member is never silently reassigned.
                if let StaffPreference::Specific(_) = preference {
                    return Err(AppError(BookingError::Conflict(
                        "This time slot is no longer available".to_string(),
                    )));
                }
            }
        }
    }

    if slot_offered {
        // Every free-looking staff member was raced away by a concurrent
        // booking; the client should refresh availability and retry.
        Err(AppError(BookingError::Conflict(
            "This time slot is no longer available".to_string(),
        )))
    } else {
        Err(AppError(BookingError::Validation(format!(
            "{} is not a bookable time on {}",
            time, date
        ))))
    }
}

/// Fetches one booking.
#[axum::debug_handler]
pub async fn get_booking(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<BookingResponse>, AppError> {
    let booking = bookwise_db::repositories::booking::get_booking_by_id(&state.db_pool, id)
        .await
        .map_err(BookingError::Database)?
        .ok_or_else(|| BookingError::NotFound(format!("Booking with ID {} not found", id)))?;

    Ok(Json(to_booking_response(booking)?))
}

/// Moves a booking through its lifecycle. Transitions run
/// pending -> confirmed -> completed, with cancellation possible until
/// completion; completed and cancelled are terminal.
#[axum::debug_handler]
pub async fn update_booking_status(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateBookingStatusRequest>,
) -> Result<Json<BookingResponse>, AppError> {
    let booking = bookwise_db::repositories::booking::get_booking_by_id(&state.db_pool, id)
        .await
        .map_err(BookingError::Database)?
        .ok_or_else(|| BookingError::NotFound(format!("Booking with ID {} not found", id)))?;

    let current: BookingStatus = booking.status.parse()?;
    if !current.can_transition_to(payload.status) {
        return Err(AppError(BookingError::Validation(format!(
            "Cannot change a {} booking to {}",
            current, payload.status
        ))));
    }

    let updated =
        bookwise_db::repositories::booking::update_booking_status(&state.db_pool, id, payload.status)
            .await
            .map_err(BookingError::Database)?;

    Ok(Json(to_booking_response(updated)?))
}
