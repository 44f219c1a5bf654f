//! Employee and doctor identity management.
//!
//! Employees carry individual bcrypt-hashed passwords. Doctors share a
//! single plaintext secret from `CoreConfig` — a deliberately weaker
//! credential check kept as its own code path rather than unified with
//! employee auth, so the difference in security posture stays visible.
//!
//! Both login paths return the same `InvalidCredentials` error for "no
//! such record" and "wrong password", so callers cannot enumerate codes.

use crate::config::CoreConfig;
use crate::models::doctor::Doctor;
use crate::models::employee::{Dependent, Employee, Gender};
use crate::store::{DocumentStore, DOCTORS, EMPLOYEES};
use crate::{CoreError, CoreResult};
use chrono::{NaiveDate, Utc};
use std::sync::Arc;

/// Registration input. Every field except `dependents` is required;
/// selection of what is "present" happens here rather than at JSON
/// deserialization so a missing field yields a validation error instead of
/// a body-rejection.
#[derive(Clone, Debug, Default)]
pub struct EmployeeRegistration {
    pub employee_code: Option<String>,
    pub employee_first_name: Option<String>,
    pub employee_last_name: Option<String>,
    pub employee_gender: Option<Gender>,
    pub employee_phone_number: Option<String>,
    pub employee_dob: Option<NaiveDate>,
    pub employee_password: Option<String>,
    pub dependents: Vec<Dependent>,
}

#[derive(Clone, Debug)]
pub struct IdentityService {
    store: DocumentStore,
    cfg: Arc<CoreConfig>,
}

impl IdentityService {
    pub fn new(store: DocumentStore, cfg: Arc<CoreConfig>) -> Self {
        Self { store, cfg }
    }

    /// Registers a new employee.
    ///
    /// Fails with `Validation` when any required field is missing or blank,
    /// and with `Conflict` when an employee with the same code or the same
    /// phone number already exists (the earlier record wins). The password
    /// is bcrypt-hashed before anything is persisted; the plaintext is
    /// dropped here.
    pub fn register_employee(&self, registration: EmployeeRegistration) -> CoreResult<Employee> {
        let missing = || CoreError::Validation("all fields are required".into());

        let employee_code = required_text(registration.employee_code).ok_or_else(missing)?;
        let first_name = required_text(registration.employee_first_name).ok_or_else(missing)?;
        let last_name = required_text(registration.employee_last_name).ok_or_else(missing)?;
        let phone = required_text(registration.employee_phone_number).ok_or_else(missing)?;
        let password = registration
            .employee_password
            .filter(|p| !p.is_empty())
            .ok_or_else(missing)?;
        let gender = registration.employee_gender.ok_or_else(missing)?;
        let dob = registration.employee_dob.ok_or_else(missing)?;

        // A code the store cannot use as a document id is malformed input,
        // not a storage failure.
        let existing = match self.store.get::<Employee>(EMPLOYEES, &employee_code) {
            Err(CoreError::InvalidDocumentId(id)) => {
                return Err(CoreError::Validation(format!(
                    "employee code {id:?} contains unsupported characters"
                )))
            }
            other => other?,
        };
        if existing.is_some() {
            return Err(CoreError::Conflict(format!(
                "employee code {employee_code} already registered"
            )));
        }
        let phone_taken = self
            .store
            .scan::<Employee>(EMPLOYEES)?
            .iter()
            .any(|e| e.employee_phone_number == phone);
        if phone_taken {
            return Err(CoreError::Conflict(format!(
                "phone number {phone} already registered"
            )));
        }

        let password_hash =
            bcrypt::hash(password, bcrypt::DEFAULT_COST).map_err(CoreError::PasswordHash)?;

        let employee = Employee {
            employee_code: employee_code.clone(),
            employee_first_name: first_name,
            employee_last_name: last_name,
            employee_gender: gender,
            employee_phone_number: phone,
            employee_dob: dob,
            password_hash,
            dependents: registration.dependents,
            created_at: Utc::now(),
        };
        self.store.put(EMPLOYEES, &employee_code, &employee)?;
        Ok(employee)
    }

    /// Verifies an employee login.
    ///
    /// An unknown code and a wrong password are indistinguishable: both
    /// return `InvalidCredentials`. bcrypt's verify does the hash
    /// comparison in constant time.
    pub fn verify_employee_login(&self, employee_code: &str, password: &str) -> CoreResult<Employee> {
        let employee = match self.store.get::<Employee>(EMPLOYEES, employee_code.trim()) {
            Ok(Some(employee)) => employee,
            Ok(None) | Err(CoreError::InvalidDocumentId(_)) => {
                return Err(CoreError::InvalidCredentials)
            }
            Err(e) => return Err(e),
        };

        let matches =
            bcrypt::verify(password, &employee.password_hash).map_err(CoreError::PasswordHash)?;
        if matches {
            Ok(employee)
        } else {
            Err(CoreError::InvalidCredentials)
        }
    }

    /// Verifies a doctor login against the shared doctor secret, then looks
    /// the doctor up by code. A wrong secret and an unknown code are
    /// indistinguishable.
    pub fn verify_doctor_login(&self, doctor_code: &str, password: &str) -> CoreResult<Doctor> {
        if password != self.cfg.doctor_password() {
            return Err(CoreError::InvalidCredentials);
        }

        match self.store.get::<Doctor>(DOCTORS, doctor_code.trim()) {
            Ok(Some(doctor)) => Ok(doctor),
            Ok(None) | Err(CoreError::InvalidDocumentId(_)) => Err(CoreError::InvalidCredentials),
            Err(e) => Err(e),
        }
    }

    /// All doctors, ordered by doctor code.
    pub fn list_doctors(&self) -> CoreResult<Vec<Doctor>> {
        let mut doctors = self.store.scan::<Doctor>(DOCTORS)?;
        doctors.sort_by(|a, b| a.doctor_code.cmp(&b.doctor_code));
        Ok(doctors)
    }
}

fn required_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
