use thiserror::Error;

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Booking conflict: {0}")]
    Conflict(String),

    #[error("Staff not eligible: {0}")]
    NotEligible(String),

    #[error("Database error: {0}")]
    Database(#[from] eyre::Report),

    #[error("Internal server error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl BookingError {
    /// Stable machine-readable discriminant, carried alongside the
    /// human-readable message in API error bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            BookingError::NotFound(_) => "not_found",
            BookingError::Validation(_) => "validation",
            BookingError::Conflict(_) => "conflict",
            BookingError::NotEligible(_) => "not_eligible",
            BookingError::Database(_) => "database",
            BookingError::Internal(_) => "internal",
        }
    }
}

pub type BookingResult<T> = Result<T, BookingError>;
