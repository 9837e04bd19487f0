use bookwise_core::models::booking::BookingStatus;
use bookwise_core::models::schedule::DaySchedule;
use chrono::{DateTime, NaiveDate, Utc};
use mockall::mock;
use uuid::Uuid;

use crate::models::{DbBooking, DbService, DbStaff, DbVendor, DbVendorHours};
use crate::repositories::booking::NewBooking;

// Mock repositories for testing
mock! {
    pub VendorRepo {
        pub async fn get_vendor_by_id(
            &self,
            id: Uuid,
        ) -> eyre::Result<Option<DbVendor>>;

        pub async fn get_vendor_hours_for_weekday(
            &self,
            vendor_id: Uuid,
            weekday: i16,
        ) -> eyre::Result<Option<DbVendorHours>>;
    }
}

mock! {
    pub ServiceRepo {
        pub async fn get_service_by_id(
            &self,
            id: Uuid,
        ) -> eyre::Result<Option<DbService>>;
    }
}

mock! {
    pub StaffRepo {
        pub async fn get_staff_by_id(
            &self,
            id: Uuid,
        ) -> eyre::Result<Option<DbStaff>>;

        pub async fn get_eligible_staff(
            &self,
            vendor_id: Uuid,
            service_id: Uuid,
        ) -> eyre::Result<Vec<DbStaff>>;

        pub async fn load_day_schedule(
            &self,
            staff_id: Uuid,
            weekday: i16,
        ) -> eyre::Result<Option<DaySchedule>>;
    }
}

mock! {
    pub BookingRepo {
        pub async fn get_booking_by_id(
            &self,
            id: Uuid,
        ) -> eyre::Result<Option<DbBooking>>;

        pub async fn get_active_bookings_in_range(
            &self,
            staff_ids: Vec<Uuid>,
            from: DateTime<Utc>,
            to: DateTime<Utc>,
        ) -> eyre::Result<Vec<DbBooking>>;

        pub async fn create_booking_checked(
            &self,
            booking: NewBooking,
            local_date: NaiveDate,
        ) -> eyre::Result<Option<DbBooking>>;

        pub async fn update_booking_status(
            &self,
            id: Uuid,
            status: BookingStatus,
        ) -> eyre::Result<DbBooking>;
    }
}
