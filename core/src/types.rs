//! Argument types for the Yclients API.
//!
//! # Design
//! Companies, staff, clients and records are opaque JSON owned by the
//! service, so they travel as `Fields` (a JSON object) or `Value`. Only the
//! multi-parameter filters get structs; every filter field is optional and
//! `Default` means "no filter". Filters are `Deserialize` so they can be
//! loaded from configuration or test vectors.

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ApiError;

/// An opaque JSON object passed through to the API unchanged.
pub type Fields = Map<String, Value>;

/// Filters for the bookable services and bookable staff listings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookingFilter {
    pub staff_id: Option<u64>,
    /// Desired booking time.
    pub datetime: Option<DateTime<FixedOffset>>,
    /// Services already chosen within the same booking.
    pub service_ids: Vec<u64>,
    /// Promotions already chosen within the same booking.
    pub event_ids: Vec<u64>,
}

/// Filters for the bookable dates listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookDatesFilter {
    pub staff_id: Option<u64>,
    pub service_ids: Vec<u64>,
    /// Any day of the month to list.
    pub date: Option<NaiveDate>,
    pub event_ids: Vec<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompaniesFilter {
    pub group_id: Option<u64>,
    /// Only companies open for online booking.
    pub active: Option<bool>,
    /// Only companies that passed moderation.
    pub moderated: Option<bool>,
    /// Include the `next_slot` field for every company.
    pub for_booking: Option<bool>,
    /// Only companies the user can manage. Needs a user token.
    pub my: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientsFilter {
    pub fullname: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub page: Option<u32>,
    pub count: Option<u32>,
}

/// Filters for the records listing. `start_date`/`end_date` bound the visit
/// date, `c_start_date`/`c_end_date` bound the creation date.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordsFilter {
    pub page: Option<u32>,
    pub count: Option<u32>,
    pub staff_id: Option<u64>,
    pub client_id: Option<u64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub c_start_date: Option<NaiveDate>,
    pub c_end_date: Option<NaiveDate>,
    pub changed_after: Option<DateTime<FixedOffset>>,
    pub changed_before: Option<DateTime<FixedOffset>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommentsFilter {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub staff_id: Option<u64>,
    pub rating: Option<u8>,
}

/// Reminder settings for an online booking, in hours before the visit.
/// Zero disables the reminder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Notify {
    pub notify_by_sms: Option<u32>,
    pub notify_by_email: Option<u32>,
}

/// Optional parts of an online booking.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookRecordOptions {
    /// SMS confirmation code sent by `post_book_code`.
    pub code: Option<String>,
    pub notify: Option<Notify>,
    pub comment: Option<String>,
    /// External record id.
    pub api_id: Option<String>,
}

/// A record created from the back office.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewRecord {
    pub staff_id: u64,
    /// Service entries, e.g. `{"id": 1, "first_cost": 900, "discount": 0, "cost": 900}`.
    pub services: Vec<Value>,
    /// Client fields, e.g. `phone`, `name`, `email`.
    pub client: Fields,
    pub datetime: DateTime<FixedOffset>,
    /// Duration in seconds.
    pub seance_length: u32,
    pub save_if_busy: bool,
    pub send_sms: bool,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub sms_remain_hours: Option<u32>,
    #[serde(default)]
    pub email_remain_hours: Option<u32>,
    #[serde(default)]
    pub api_id: Option<String>,
    #[serde(default)]
    pub attendance: Option<i8>,
}

const APPOINTMENT_FIELDS: [&str; 3] = ["id", "staff_id", "datetime"];

/// Check that every key is present and non-null.
pub(crate) fn require_fields(fields: &Fields, keys: &[&str], what: &str) -> Result<(), ApiError> {
    let missing: Vec<&str> = keys
        .iter()
        .copied()
        .filter(|key| fields.get(*key).map_or(true, Value::is_null))
        .collect();
    if missing.is_empty() {
        return Ok(());
    }
    Err(ApiError::validation(format!(
        "{what} must contain all required fields: {} (missing {})",
        keys.join(", "),
        missing.join(", ")
    )))
}

pub(crate) fn validate_appointments(appointments: &[Fields]) -> Result<(), ApiError> {
    appointments
        .iter()
        .try_for_each(|appointment| require_fields(appointment, &APPOINTMENT_FIELDS, "appointment"))
}

pub(crate) fn appointments_value(appointments: &[Fields]) -> Value {
    Value::Array(appointments.iter().cloned().map(Value::Object).collect())
}
