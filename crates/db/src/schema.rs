use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create vendors table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS vendors (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name VARCHAR(255) NOT NULL,
            timezone VARCHAR(64) NOT NULL DEFAULT 'UTC',
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create vendor_hours table (business-hours template, one row per weekday)
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS vendor_hours (
            vendor_id UUID NOT NULL REFERENCES vendors(id),
            weekday SMALLINT NOT NULL CHECK (weekday BETWEEN 0 AND 6),
            is_open BOOLEAN NOT NULL DEFAULT TRUE,
            open_time TIME NOT NULL,
            close_time TIME NOT NULL,
            PRIMARY KEY (vendor_id, weekday),
            CONSTRAINT valid_business_hours CHECK (close_time > open_time)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create services table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS services (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            vendor_id UUID NOT NULL REFERENCES vendors(id),
            name VARCHAR(255) NOT NULL,
            duration_minutes INTEGER NOT NULL CHECK (duration_minutes >= 15),
            price_cents BIGINT NOT NULL CHECK (price_cents >= 0),
            is_active BOOLEAN NOT NULL DEFAULT TRUE,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create staff table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS staff (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            vendor_id UUID NOT NULL REFERENCES vendors(id),
            name VARCHAR(255) NOT NULL,
            position VARCHAR(255) NOT NULL DEFAULT '',
            is_active BOOLEAN NOT NULL DEFAULT TRUE,
            all_services BOOLEAN NOT NULL DEFAULT TRUE,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create staff_services table (explicit permissions when not all_services)
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS staff_services (
            staff_id UUID NOT NULL REFERENCES staff(id),
            service_id UUID NOT NULL REFERENCES services(id),
            PRIMARY KEY (staff_id, service_id)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create staff_schedules table (weekly template, one row per weekday)
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS staff_schedules (
            staff_id UUID NOT NULL REFERENCES staff(id),
            weekday SMALLINT NOT NULL CHECK (weekday BETWEEN 0 AND 6),
            is_available BOOLEAN NOT NULL DEFAULT TRUE,
            start_time TIME NOT NULL,
            end_time TIME NOT NULL,
            PRIMARY KEY (staff_id, weekday),
            CONSTRAINT valid_working_hours CHECK (end_time > start_time)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create schedule_breaks table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS schedule_breaks (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            staff_id UUID NOT NULL,
            weekday SMALLINT NOT NULL,
            break_start TIME NOT NULL,
            break_end TIME NOT NULL,
            FOREIGN KEY (staff_id, weekday) REFERENCES staff_schedules(staff_id, weekday),
            CONSTRAINT valid_break CHECK (break_end > break_start)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create bookings table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS bookings (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            customer_id UUID NOT NULL,
            vendor_id UUID NOT NULL REFERENCES vendors(id),
            service_id UUID NOT NULL REFERENCES services(id),
            staff_id UUID NOT NULL REFERENCES staff(id),
            start_time TIMESTAMP WITH TIME ZONE NOT NULL,
            end_time TIMESTAMP WITH TIME ZONE NOT NULL,
            duration_minutes INTEGER NOT NULL CHECK (duration_minutes > 0),
            price_cents BIGINT NOT NULL,
            status VARCHAR(16) NOT NULL DEFAULT 'pending'
                CHECK (status IN ('pending', 'confirmed', 'completed', 'cancelled')),
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_booking_range CHECK (end_time > start_time)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Backstop for the no-double-booking invariant: two active bookings can
    // never share a staff member and an exact start instant.
    sqlx::query(
        r#"
        CREATE UNIQUE INDEX IF NOT EXISTS uniq_active_booking_slot
            ON bookings(staff_id, start_time)
            WHERE status IN ('pending', 'confirmed');
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes
    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_services_vendor_id ON services(vendor_id);
        CREATE INDEX IF NOT EXISTS idx_staff_vendor_id ON staff(vendor_id);
        CREATE INDEX IF NOT EXISTS idx_staff_services_service_id ON staff_services(service_id);
        CREATE INDEX IF NOT EXISTS idx_schedule_breaks_staff_weekday ON schedule_breaks(staff_id, weekday);
        CREATE INDEX IF NOT EXISTS idx_bookings_staff_start ON bookings(staff_id, start_time);
        CREATE INDEX IF NOT EXISTS idx_bookings_vendor_start ON bookings(vendor_id, start_time);
        CREATE INDEX IF NOT EXISTS idx_bookings_customer_id ON bookings(customer_id);
        "#,
    )
    .execute(pool)
    .await?;

    info!("Database schema initialized successfully.");
    Ok(())
}
