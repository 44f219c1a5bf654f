use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A doctor employees can book appointments with.
///
/// Doctors are created once by the startup seed routine and are effectively
/// immutable afterwards. `available_days` holds weekday names ("Monday",
/// ...); `timings` is a free-text window such as "09:00 AM - 01:00 PM".
/// Availability is a client-side filter only; the booking path does not
/// consult it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    pub doctor_code: String,
    pub name: String,
    pub department: String,
    pub available_days: Vec<String>,
    pub timings: String,
}
