//! Request and response shapes for the REST API.
//!
//! Field names follow the camelCase wire convention the clients expect.
//! Request fields arrive as `Option`s so a missing field becomes a
//! validation error with the route's own message rather than a body
//! rejection.

use carebook_core::{Appointment, Dependent, Doctor, Employee, Gender};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Employee view returned by read paths: the stored record minus the
/// password hash.
#[derive(Clone, Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeProfile {
    pub employee_code: String,
    pub employee_first_name: String,
    pub employee_last_name: String,
    pub employee_gender: Gender,
    pub employee_phone_number: String,
    #[serde(rename = "employeeDOB")]
    pub employee_dob: NaiveDate,
    pub dependents: Vec<Dependent>,
}

impl From<Employee> for EmployeeProfile {
    fn from(employee: Employee) -> Self {
        Self {
            employee_code: employee.employee_code,
            employee_first_name: employee.employee_first_name,
            employee_last_name: employee.employee_last_name,
            employee_gender: employee.employee_gender,
            employee_phone_number: employee.employee_phone_number,
            employee_dob: employee.employee_dob,
            dependents: employee.dependents,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterReq {
    pub employee_first_name: Option<String>,
    pub employee_last_name: Option<String>,
    pub employee_gender: Option<Gender>,
    pub employee_code: Option<String>,
    pub employee_phone_number: Option<String>,
    #[serde(rename = "employeeDOB")]
    pub employee_dob: Option<NaiveDate>,
    pub employee_password: Option<String>,
    #[serde(default)]
    pub dependents: Vec<Dependent>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RegisterRes {
    pub message: String,
    pub employee: EmployeeProfile,
}

/// Error body for `/register`, which reports failures under an `error`
/// key (every other route uses `MessageRes`).
#[derive(Debug, Serialize, ToSchema)]
pub struct RegisterErrorRes {
    pub error: String,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginReq {
    pub employee_code: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginRes {
    pub success: bool,
    pub message: String,
    pub employee: EmployeeProfile,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DoctorLoginReq {
    pub doctor_code: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DoctorLoginRes {
    pub success: bool,
    pub message: String,
    pub doctor: Doctor,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DoctorsRes {
    pub success: bool,
    pub doctors: Vec<Doctor>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAppointmentReq {
    pub employee_code: Option<String>,
    pub patient_name: Option<String>,
    pub patient_age: Option<u32>,
    pub patient_gender: Option<String>,
    pub patient_relation: Option<String>,
    pub patient_phone: Option<String>,
    pub patient_address: Option<String>,
    /// RFC 3339 timestamp or a bare `YYYY-MM-DD` calendar date.
    pub appointment_date: Option<String>,
    pub appointment_time: Option<String>,
    pub doctor_code: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AppointmentRes {
    pub success: bool,
    pub message: String,
    pub appointment: Appointment,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AppointmentsRes {
    pub success: bool,
    pub appointments: Vec<Appointment>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeAppointmentsQuery {
    pub employee_code: Option<String>,
    pub patient_name: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAppointmentReq {
    /// One of "Upcoming", "Completed" or "Cancelled". An empty string
    /// counts as absent.
    pub status: Option<String>,
    pub medical_report: Option<String>,
}

/// Generic `{success, message}` body, used for errors and for the delete
/// confirmation.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageRes {
    pub success: bool,
    pub message: String,
}
