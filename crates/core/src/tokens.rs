//! Per-doctor-per-day token allocation.
//!
//! Tokens order patients in a doctor's queue for one UTC calendar day:
//! the first booking gets token 1, the next 2, and so on. Allocation reads
//! the current maximum for the (doctor, day) pair and adds one.
//!
//! Known weakness, preserved deliberately: the read and the subsequent
//! write in `AppointmentService::create` are not atomic. Two concurrent
//! bookings for the same doctor and day can both observe the same maximum
//! and receive the same token. See DESIGN.md for the strategies a fix
//! would need (serialized allocation per key, or an atomic
//! find-max-and-increment in the store).

use crate::models::appointment::Appointment;
use crate::store::{DocumentStore, APPOINTMENTS};
use crate::CoreResult;
use chrono::{DateTime, Duration, NaiveTime, Utc};

/// The UTC day containing `date`, as a `[start, end)` interval.
pub fn day_bounds(date: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = date.date_naive().and_time(NaiveTime::MIN).and_utc();
    (start, start + Duration::days(1))
}

/// Next token number for `doctor_code` on the UTC day of
/// `appointment_date`: the current maximum plus one, or 1 when the doctor
/// has no appointments that day.
///
/// Deterministic given the store contents at call time.
pub fn allocate_token(
    store: &DocumentStore,
    doctor_code: &str,
    appointment_date: DateTime<Utc>,
) -> CoreResult<u32> {
    let (day_start, day_end) = day_bounds(appointment_date);

    let last_token = store
        .scan::<Appointment>(APPOINTMENTS)?
        .into_iter()
        .filter(|a| a.doctor_code == doctor_code)
        .filter(|a| a.appointment_date >= day_start && a.appointment_date < day_end)
        .map(|a| a.token_number)
        .max();

    Ok(last_token.map_or(1, |t| t + 1))
}
