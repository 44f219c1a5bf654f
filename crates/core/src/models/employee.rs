use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Gender {
    Male,
    Female,
    Other,
}

/// Relation of a dependent to the employee who registered them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Relation {
    Son,
    Daughter,
    Wife,
    Mother,
    Father,
}

/// A family member an employee may book appointments for.
///
/// Dependents are appended at registration time only; no endpoint mutates
/// them afterwards.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Dependent {
    pub name: String,
    pub relation: Relation,
    pub gender: Gender,
    pub dob: NaiveDate,
}

/// A registered hospital employee.
///
/// `password_hash` holds the bcrypt hash of the registration password. It
/// is stored alongside the record but must never appear in a response;
/// read paths project into `EmployeeProfile` instead.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub employee_code: String,
    pub employee_first_name: String,
    pub employee_last_name: String,
    pub employee_gender: Gender,
    pub employee_phone_number: String,
    #[serde(rename = "employeeDOB")]
    pub employee_dob: NaiveDate,
    pub password_hash: String,
    #[serde(default)]
    pub dependents: Vec<Dependent>,
    pub created_at: DateTime<Utc>,
}
