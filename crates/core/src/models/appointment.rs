use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum AppointmentStatus {
    Upcoming,
    Completed,
    Cancelled,
}

impl FromStr for AppointmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Upcoming" => Ok(Self::Upcoming),
            "Completed" => Ok(Self::Completed),
            "Cancelled" => Ok(Self::Cancelled),
            other => Err(format!("unknown appointment status: {other:?}")),
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Upcoming => "Upcoming",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
        };
        f.write_str(name)
    }
}

/// A booked appointment.
///
/// The `patient_*` fields are a denormalized snapshot of whoever the
/// appointment is for, taken at booking time. They are value copies, not
/// references into the employee record, so the appointment stays an
/// audit-stable account of who was seen even if the employee's dependents
/// are edited later.
///
/// `token_number` is the patient's queue position for that doctor on that
/// UTC calendar day: contiguous from 1, assigned in creation order.
/// `employee_code` and `doctor_code` are plain references; nothing enforces
/// that they point at existing records.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: String,
    pub employee_code: String,
    pub patient_name: String,
    #[serde(default)]
    pub patient_age: u32,
    #[serde(default)]
    pub patient_gender: String,
    #[serde(default)]
    pub patient_relation: String,
    #[serde(default)]
    pub patient_phone: String,
    #[serde(default)]
    pub patient_address: String,
    pub appointment_date: DateTime<Utc>,
    pub appointment_time: String,
    pub doctor_code: String,
    #[serde(default)]
    pub notes: String,
    pub status: AppointmentStatus,
    pub token_number: u32,
    #[serde(default)]
    pub medical_report: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_from_str() {
        for status in [
            AppointmentStatus::Upcoming,
            AppointmentStatus::Completed,
            AppointmentStatus::Cancelled,
        ] {
            assert_eq!(status.to_string().parse::<AppointmentStatus>(), Ok(status));
        }
        assert!("upcoming".parse::<AppointmentStatus>().is_err());
        assert!("".parse::<AppointmentStatus>().is_err());
    }

    #[test]
    fn appointment_serializes_with_camel_case_wire_names() {
        let appointment = Appointment {
            id: "a1".into(),
            employee_code: "EMP001".into(),
            patient_name: "Asha Verma".into(),
            patient_age: 34,
            patient_gender: "Female".into(),
            patient_relation: "Self".into(),
            patient_phone: "9876543210".into(),
            patient_address: "12 Lake Road".into(),
            appointment_date: "2025-06-10T00:00:00Z".parse().unwrap(),
            appointment_time: "10:30".into(),
            doctor_code: "DOC001".into(),
            notes: String::new(),
            status: AppointmentStatus::Upcoming,
            token_number: 1,
            medical_report: String::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let value = serde_json::to_value(&appointment).unwrap();
        assert_eq!(value["employeeCode"], "EMP001");
        assert_eq!(value["tokenNumber"], 1);
        assert_eq!(value["status"], "Upcoming");
        assert_eq!(value["medicalReport"], "");
    }
}
