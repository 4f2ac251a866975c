//! Krishi Core Library
//!
//! Shared record types, form validation and wire types for the Krishi record
//! server and its clients.

pub mod api;
pub mod models;
pub mod record_id;
pub mod validation;

pub use api::{ApiResponse, HealthState, HealthStatus};
pub use models::{NewRecord, Record, SoilType};
pub use record_id::{RecordId, RecordIdError};
pub use validation::{validate, RecordForm, RequiredField, ValidationError};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
