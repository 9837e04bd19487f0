use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbVendor {
    pub id: Uuid,
    pub name: String,
    /// IANA zone name, e.g. "America/New_York". Schedule times are wall
    /// clock in this zone.
    pub timezone: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbVendorHours {
    pub vendor_id: Uuid,
    /// 0 = Monday .. 6 = Sunday.
    pub weekday: i16,
    pub is_open: bool,
    pub open_time: NaiveTime,
    pub close_time: NaiveTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbService {
    pub id: Uuid,
    pub vendor_id: Uuid,
    pub name: String,
    pub duration_minutes: i32,
    pub price_cents: i64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbStaff {
    pub id: Uuid,
    pub vendor_id: Uuid,
    pub name: String,
    pub position: String,
    pub is_active: bool,
    /// When true the member performs every service; otherwise only those
    /// listed in staff_services.
    pub all_services: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbStaffSchedule {
    pub staff_id: Uuid,
    pub weekday: i16,
    pub is_available: bool,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbScheduleBreak {
    pub id: Uuid,
    pub staff_id: Uuid,
    pub weekday: i16,
    pub break_start: NaiveTime,
    pub break_end: NaiveTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbBooking {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub vendor_id: Uuid,
    pub service_id: Uuid,
    pub staff_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    /// Snapshots taken from the service at booking time; later service
    /// edits never rewrite history.
    pub duration_minutes: i32,
    pub price_cents: i64,
    pub status: String,
    pub created_at: DateTime<Utc>,
}
