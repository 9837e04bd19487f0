use crate::models::DbBooking;
use bookwise_core::models::booking::BookingStatus;
use chrono::{DateTime, NaiveDate, Utc};
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

/// Everything needed to persist a new appointment. Duration and price are
/// snapshots the caller took from the current service record.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub customer_id: Uuid,
    pub vendor_id: Uuid,
    pub service_id: Uuid,
    pub staff_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub duration_minutes: i32,
    pub price_cents: i64,
}

pub async fn get_booking_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbBooking>> {
    let booking = sqlx::query_as::<_, DbBooking>(
        r#"
        SELECT id, customer_id, vendor_id, service_id, staff_id, start_time, end_time,
               duration_minutes, price_cents, status, created_at
        FROM bookings
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(booking)
}

/// Pending and confirmed bookings for the given staff members whose
/// intervals intersect `[from, to)`. Cancelled and completed bookings never
/// constrain availability and are filtered out here.
pub async fn get_active_bookings_in_range(
    pool: &Pool<Postgres>,
    staff_ids: &[Uuid],
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> Result<Vec<DbBooking>> {
    let bookings = sqlx::query_as::<_, DbBooking>(
        r#"
        SELECT id, customer_id, vendor_id, service_id, staff_id, start_time, end_time,
               duration_minutes, price_cents, status, created_at
        FROM bookings
        WHERE staff_id = ANY($1)
          AND status IN ('pending', 'confirmed')
          AND start_time < $3
          AND end_time > $2
        ORDER BY start_time ASC
        "#,
    )
    .bind(staff_ids.to_vec())
    .bind(from)
    .bind(to)
    .fetch_all(pool)
    .await?;

    Ok(bookings)
}

/// Atomic check-and-insert for one staff member's slot.
///
/// Writers for the same staff member and vendor-local day are serialized by
/// an advisory transaction lock, then the overlap check runs against the
/// live booking set before the insert. Returns `Ok(None)` when the slot was
/// taken in the meantime, including when the partial unique index on
/// `(staff_id, start_time)` rejects a racing insert.
pub async fn create_booking_checked(
    pool: &Pool<Postgres>,
    booking: &NewBooking,
    local_date: NaiveDate,
) -> Result<Option<DbBooking>> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!(
        "Creating booking: id={}, staff_id={}, start={}, duration={}min",
        id,
        booking.staff_id,
        booking.start_time,
        booking.duration_minutes
    );

    let mut tx = pool.begin().await?;

    // Serialize writers for this staff member and local day.
    let lock_scope = format!("{}:{}", booking.staff_id, local_date);
    sqlx::query("SELECT pg_advisory_xact_lock(hashtextextended($1, 0))")
        .bind(&lock_scope)
        .execute(&mut *tx)
        .await?;

    // Re-check against the current booking set inside the lock.
    let conflicting: Option<Uuid> = sqlx::query_scalar(
        r#"
        SELECT id
        FROM bookings
        WHERE staff_id = $1
          AND status IN ('pending', 'confirmed')
          AND start_time < $3
          AND end_time > $2
        LIMIT 1
        "#,
    )
    .bind(booking.staff_id)
    .bind(booking.start_time)
    .bind(booking.end_time)
    .fetch_optional(&mut *tx)
    .await?;

    if let Some(existing) = conflicting {
        tracing::debug!(
            "Slot taken: staff_id={}, start={}, conflicting_booking={}",
            booking.staff_id,
            booking.start_time,
            existing
        );
        tx.rollback().await?;
        return Ok(None);
    }

    let inserted = sqlx::query_as::<_, DbBooking>(
        r#"
        INSERT INTO bookings (id, customer_id, vendor_id, service_id, staff_id,
                              start_time, end_time, duration_minutes, price_cents,
                              status, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        RETURNING id, customer_id, vendor_id, service_id, staff_id, start_time, end_time,
                  duration_minutes, price_cents, status, created_at
        "#,
    )
    .bind(id)
    .bind(booking.customer_id)
    .bind(booking.vendor_id)
    .bind(booking.service_id)
    .bind(booking.staff_id)
    .bind(booking.start_time)
    .bind(booking.end_time)
    .bind(booking.duration_minutes)
    .bind(booking.price_cents)
    .bind(BookingStatus::Pending.as_str())
    .bind(now)
    .fetch_one(&mut *tx)
    .await;

    match inserted {
        Ok(created) => {
            tx.commit().await?;
            tracing::debug!("Booking created successfully: id={}", created.id);
            Ok(Some(created))
        }
        Err(sqlx::Error::Database(db_err)) if db_err.code().as_deref() == Some("23505") => {
            // Unique-index backstop fired; another writer won the slot.
            tx.rollback().await?;
            Ok(None)
        }
        Err(err) => Err(err.into()),
    }
}

pub async fn update_booking_status(
    pool: &Pool<Postgres>,
    id: Uuid,
    status: BookingStatus,
) -> Result<DbBooking> {
    let booking = sqlx::query_as::<_, DbBooking>(
        r#"
        UPDATE bookings
        SET status = $2
        WHERE id = $1
        RETURNING id, customer_id, vendor_id, service_id, staff_id, start_time, end_time,
                  duration_minutes, price_cents, status, created_at
        "#,
    )
    .bind(id)
    .bind(status.as_str())
    .fetch_one(pool)
    .await?;

    Ok(booking)
}
