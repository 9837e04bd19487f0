use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::schedule::TimeOfDay;

/// One candidate slot in an availability response. Booked slots stay in the
/// list with `available: false` so the UI can render them disabled instead
/// of hiding them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotView {
    pub time: TimeOfDay,
    pub available: bool,
    /// Lowest-id staff member free at this time, when one exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub staff_id: Option<Uuid>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessHours {
    pub open: TimeOfDay,
    pub close: TimeOfDay,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityResponse {
    pub is_open: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_hours: Option<BusinessHours>,
    pub time_slots: Vec<SlotView>,
    pub available_slots: Vec<TimeOfDay>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl AvailabilityResponse {
    /// A closed day with an explanation, e.g. "no staff for this service".
    /// Distinct from an open day where every slot happens to be taken.
    pub fn closed(business_hours: Option<BusinessHours>, message: impl Into<String>) -> Self {
        Self {
            is_open: false,
            business_hours,
            time_slots: Vec::new(),
            available_slots: Vec::new(),
            message: Some(message.into()),
        }
    }
}
