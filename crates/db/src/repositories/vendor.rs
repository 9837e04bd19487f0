use crate::models::{DbVendor, DbVendorHours};
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn get_vendor_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbVendor>> {
    let vendor = sqlx::query_as::<_, DbVendor>(
        r#"
        SELECT id, name, timezone, created_at
        FROM vendors
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(vendor)
}

pub async fn get_vendor_hours(pool: &Pool<Postgres>, vendor_id: Uuid) -> Result<Vec<DbVendorHours>> {
    let hours = sqlx::query_as::<_, DbVendorHours>(
        r#"
        SELECT vendor_id, weekday, is_open, open_time, close_time
        FROM vendor_hours
        WHERE vendor_id = $1
        ORDER BY weekday ASC
        "#,
    )
    .bind(vendor_id)
    .fetch_all(pool)
    .await?;

    Ok(hours)
}

pub async fn get_vendor_hours_for_weekday(
    pool: &Pool<Postgres>,
    vendor_id: Uuid,
    weekday: i16,
) -> Result<Option<DbVendorHours>> {
    let hours = sqlx::query_as::<_, DbVendorHours>(
        r#"
        SELECT vendor_id, weekday, is_open, open_time, close_time
        FROM vendor_hours
        WHERE vendor_id = $1 AND weekday = $2
        "#,
    )
    .bind(vendor_id)
    .bind(weekday)
    .fetch_optional(pool)
    .await?;

    Ok(hours)
}
