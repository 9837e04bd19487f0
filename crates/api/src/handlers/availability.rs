//! # Availability Handlers
//!
//! This module contains handlers for computing bookable time slots and for
//! listing the staff members able to perform a service.
//!
//! ## Availability Algorithm
//!
//! For one vendor, service and vendor-local calendar day the handler:
//!
//! 1. Resolves the service (for its duration) and the vendor (for its time
//!    zone and business hours)
//! 2. Resolves eligible staff: active members of the vendor that either
//!    perform every service or are explicitly assigned to this one; a named
//!    staff member must be in that set
//! 3. Per staff member, generates candidate start times on the slot grid
//!    from their weekly schedule, projects them onto the requested day and
//!    tags each against that member's pending and confirmed bookings
//! 4. Unions the tagged slots across staff by time of day
//!
//! Taken slots stay in the response with `available: false` so the UI can
//! render them disabled. A day with no eligible staff at all reports
//! `is_open: false` with a message; that is a different situation from an
//! open day where every slot happens to be booked, and the distinction is
//! preserved deliberately.
//!
//! Per-staff computation is pure over data fetched up front, so the merge
//! result does not depend on evaluation order.

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use std::{collections::HashMap, sync::Arc};
use uuid::Uuid;

use bookwise_core::{
    errors::BookingError,
    models::{
        availability::{AvailabilityResponse, BusinessHours},
        schedule::TimeOfDay,
        staff::{StaffListResponse, StaffPreference, StaffSummary},
    },
    scheduling::{
        availability::{available_times, merge_staff_availability, StaffDayAvailability},
        calendar,
        conflicts::{mark_conflicts, BookingInterval, ProjectedSlot},
        slots::generate_slots,
    },
};
use bookwise_db::models::DbStaff;

use crate::{
    handlers::{service_duration, vendor_timezone},
    middleware::error_handling::AppError,
    ApiState,
};

/// Query parameters for the availability endpoint.
#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    pub vendor_id: Uuid,

    pub service_id: Uuid,

    /// Vendor-local calendar day, `YYYY-MM-DD`
    pub date: NaiveDate,

    /// Present to ask for one named staff member; absent for "any staff"
    pub staff_id: Option<Uuid>,
}

/// Computes the bookable slots for a service on one day.
///
/// # Endpoint
///
/// ```text
/// GET /api/availability?vendor_id=...&service_id=...&date=2026-08-10&staff_id=...
/// ```
#[axum::debug_handler]
pub async fn get_availability(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<AvailabilityResponse>, AppError> {
    // STEP 1: Catalog lookups

    let vendor = bookwise_db::repositories::vendor::get_vendor_by_id(&state.db_pool, query.vendor_id)
        .await
        .map_err(BookingError::Database)?
        .ok_or_else(|| BookingError::NotFound(format!("Vendor with ID {} not found", query.vendor_id)))?;

    let service =
        bookwise_db::repositories::service::get_service_by_id(&state.db_pool, query.service_id)
            .await
            .map_err(BookingError::Database)?
            .ok_or_else(|| {
                BookingError::NotFound(format!("Service with ID {} not found", query.service_id))
            })?;

    if service.vendor_id != vendor.id {
        return Err(AppError(BookingError::Validation(format!(
            "Service {} does not belong to vendor {}",
            service.id, vendor.id
        ))));
    }
    if !service.is_active {
        return Err(AppError(BookingError::Validation(format!(
            "Service {} is not active",
            service.id
        ))));
    }

    let duration = service_duration(&service)?;
    let tz = vendor_timezone(&vendor)?;
    let weekday = calendar::weekday_index(query.date);

    // STEP 2: Business hours for the requested weekday

    let hours = bookwise_db::repositories::vendor::get_vendor_hours_for_weekday(
        &state.db_pool,
        vendor.id,
        weekday,
    )
    .await
    .map_err(BookingError::Database)?;

    let business_hours = hours
        .as_ref()
        .filter(|row| row.is_open)
        .map(|row| BusinessHours {
            open: TimeOfDay::from_naive(row.open_time),
            close: TimeOfDay::from_naive(row.close_time),
        });

    // STEP 3: Eligible staff, narrowed by the customer's preference

    let eligible = bookwise_db::repositories::staff::get_eligible_staff(
        &state.db_pool,
        vendor.id,
        service.id,
    )
    .await
    .map_err(BookingError::Database)?;

    if eligible.is_empty() {
        return Ok(Json(AvailabilityResponse::closed(
            business_hours,
            "No staff members offer this service",
        )));
    }

    let staff_pool: Vec<DbStaff> = match StaffPreference::from_request(query.staff_id) {
        StaffPreference::Specific(staff_id) => {
            let member = eligible
                .iter()
                .find(|member| member.id == staff_id)
                .cloned()
                .ok_or_else(|| {
                    BookingError::NotEligible(format!(
                        "Staff member {} cannot perform this service",
                        staff_id
                    ))
                })?;
            vec![member]
        }
        StaffPreference::Any => eligible,
    };

    let Some(business_hours) = business_hours else {
        return Ok(Json(AvailabilityResponse::closed(
            None,
            "Closed on this day",
        )));
    };

    // STEP 4: Per-staff candidate slots, tagged against existing bookings

    let (day_start, day_end) = calendar::local_day_bounds(query.date, tz);
    let staff_ids: Vec<Uuid> = staff_pool.iter().map(|member| member.id).collect();

    let bookings = bookwise_db::repositories::booking::get_active_bookings_in_range(
        &state.db_pool,
        &staff_ids,
        day_start,
        day_end,
    )
    .await
    .map_err(BookingError::Database)?;

    let mut bookings_by_staff: HashMap<Uuid, Vec<BookingInterval>> = HashMap::new();
    for booking in bookings {
        bookings_by_staff
            .entry(booking.staff_id)
            .or_default()
            .push(BookingInterval {
                start: booking.start_time,
                end: booking.end_time,
            });
    }

    let mut per_staff = Vec::new();
    let mut any_staff_working = false;

    for member in &staff_pool {
        let day = bookwise_db::repositories::staff::load_day_schedule(
            &state.db_pool,
            member.id,
            weekday,
        )
        .await
        .map_err(BookingError::Database)?;

        let Some(day) = day else { continue };
        if !day.is_available {
            continue;
        }
        any_staff_working = true;

        let candidates = generate_slots(&day, duration, state.grid_minutes);

        // Projection drops wall-clock times that do not exist on this day
        // (DST spring-forward gap).
        let projected: Vec<ProjectedSlot> = candidates
            .into_iter()
            .filter_map(|time| {
                calendar::project_local(query.date, time, tz)
                    .map(|start| ProjectedSlot { time, start })
            })
            .collect();

        let existing = bookings_by_staff
            .get(&member.id)
            .map(Vec::as_slice)
            .unwrap_or(&[]);

        per_staff.push(StaffDayAvailability {
            staff_id: member.id,
            slots: mark_conflicts(&projected, duration, existing),
        });
    }

    if !any_staff_working {
        return Ok(Json(AvailabilityResponse::closed(
            Some(business_hours),
            "No staff members work on this day",
        )));
    }

    // STEP 5: Union across staff, lowest free staff id tagging each time

    let time_slots = merge_staff_availability(&per_staff);
    let available_slots = available_times(&time_slots);

    Ok(Json(AvailabilityResponse {
        is_open: true,
        business_hours: Some(business_hours),
        time_slots,
        available_slots,
        message: None,
    }))
}

/// Query parameters for the staff listing endpoint.
#[derive(Debug, Deserialize)]
pub struct StaffListQuery {
    pub vendor_id: Uuid,
    pub service_id: Uuid,
}

/// Lists the staff members able to perform a service, for the booking UI's
/// staff picker. Ordered by staff id ascending.
#[axum::debug_handler]
pub async fn staff_list(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<StaffListQuery>,
) -> Result<Json<StaffListResponse>, AppError> {
    let service =
        bookwise_db::repositories::service::get_service_by_id(&state.db_pool, query.service_id)
            .await
            .map_err(BookingError::Database)?
            .ok_or_else(|| {
                BookingError::NotFound(format!("Service with ID {} not found", query.service_id))
            })?;

    if service.vendor_id != query.vendor_id {
        return Err(AppError(BookingError::Validation(format!(
            "Service {} does not belong to vendor {}",
            service.id, query.vendor_id
        ))));
    }

    let eligible = bookwise_db::repositories::staff::get_eligible_staff(
        &state.db_pool,
        query.vendor_id,
        query.service_id,
    )
    .await
    .map_err(BookingError::Database)?;

    let staff = eligible
        .into_iter()
        .map(|member| StaffSummary {
            id: member.id,
            name: member.name,
            position: member.position,
        })
        .collect();

    Ok(Json(StaffListResponse { staff }))
}
