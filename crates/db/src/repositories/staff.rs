use crate::models::{DbScheduleBreak, DbStaff, DbStaffSchedule};
use bookwise_core::models::schedule::{BreakInterval, DaySchedule, TimeOfDay};
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn get_staff_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbStaff>> {
    let staff = sqlx::query_as::<_, DbStaff>(
        r#"
        SELECT id, vendor_id, name, position, is_active, all_services, created_at
        FROM staff
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(staff)
}

/// Active staff of the vendor able to perform the service, either because
/// they perform everything or because they are explicitly assigned to it.
/// Ordered by id ascending so automatic assignment is deterministic.
pub async fn get_eligible_staff(
    pool: &Pool<Postgres>,
    vendor_id: Uuid,
    service_id: Uuid,
) -> Result<Vec<DbStaff>> {
    tracing::debug!(
        "Resolving eligible staff: vendor_id={}, service_id={}",
        vendor_id,
        service_id
    );

    let staff = sqlx::query_as::<_, DbStaff>(
        r#"
        SELECT s.id, s.vendor_id, s.name, s.position, s.is_active, s.all_services, s.created_at
        FROM staff s
        WHERE s.vendor_id = $1
          AND s.is_active
          AND (
              s.all_services
              OR EXISTS (
                  SELECT 1 FROM staff_services ss
                  WHERE ss.staff_id = s.id AND ss.service_id = $2
              )
          )
        ORDER BY s.id ASC
        "#,
    )
    .bind(vendor_id)
    .bind(service_id)
    .fetch_all(pool)
    .await?;

    Ok(staff)
}

pub async fn get_day_schedule(
    pool: &Pool<Postgres>,
    staff_id: Uuid,
    weekday: i16,
) -> Result<Option<DbStaffSchedule>> {
    let schedule = sqlx::query_as::<_, DbStaffSchedule>(
        r#"
        SELECT staff_id, weekday, is_available, start_time, end_time
        FROM staff_schedules
        WHERE staff_id = $1 AND weekday = $2
        "#,
    )
    .bind(staff_id)
    .bind(weekday)
    .fetch_optional(pool)
    .await?;

    Ok(schedule)
}

pub async fn get_schedule_breaks(
    pool: &Pool<Postgres>,
    staff_id: Uuid,
    weekday: i16,
) -> Result<Vec<DbScheduleBreak>> {
    let breaks = sqlx::query_as::<_, DbScheduleBreak>(
        r#"
        SELECT id, staff_id, weekday, break_start, break_end
        FROM schedule_breaks
        WHERE staff_id = $1 AND weekday = $2
        ORDER BY break_start ASC
        "#,
    )
    .bind(staff_id)
    .bind(weekday)
    .fetch_all(pool)
    .await?;

    Ok(breaks)
}

/// Assembles the domain-level schedule for one staff member and weekday,
/// or `None` when no template row exists for that day.
pub async fn load_day_schedule(
    pool: &Pool<Postgres>,
    staff_id: Uuid,
    weekday: i16,
) -> Result<Option<DaySchedule>> {
    let Some(row) = get_day_schedule(pool, staff_id, weekday).await? else {
        return Ok(None);
    };
    let breaks = get_schedule_breaks(pool, staff_id, weekday).await?;

    Ok(Some(DaySchedule {
        is_available: row.is_available,
        start: TimeOfDay::from_naive(row.start_time),
        end: TimeOfDay::from_naive(row.end_time),
        breaks: breaks
            .into_iter()
            .map(|brk| BreakInterval {
                start: TimeOfDay::from_naive(brk.break_start),
                end: TimeOfDay::from_naive(brk.break_end),
            })
            .collect(),
    }))
}
