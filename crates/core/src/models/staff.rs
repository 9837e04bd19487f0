use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Customer's choice of who performs the service: a named staff member, or
/// whoever is free at the chosen time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaffPreference {
    Any,
    Specific(Uuid),
}

impl StaffPreference {
    pub fn from_request(staff_id: Option<Uuid>) -> Self {
        match staff_id {
            Some(id) => StaffPreference::Specific(id),
            None => StaffPreference::Any,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffSummary {
    pub id: Uuid,
    pub name: String,
    pub position: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffListResponse {
    pub staff: Vec<StaffSummary>,
}
