//! Appointment booking, listing, updating and deletion.
//!
//! Booking validates the five required fields, allocates the next token for
//! the doctor's day (see `crate::tokens`) and persists the record with
//! status `Upcoming`. It does **not** check that the doctor is available on
//! that weekday, nor that the employee or doctor codes reference existing
//! records — the client filters doctors before submission, and that
//! simplification is preserved here on purpose.
//!
//! Updates are partial: only the supplied fields change. Status transitions
//! are unrestricted (any enum value may follow any other); the client
//! disables further edits once a terminal state is reached. Deletion is
//! only allowed for cancelled appointments.

use crate::models::appointment::{Appointment, AppointmentStatus};
use crate::store::{DocumentStore, APPOINTMENTS};
use crate::tokens::allocate_token;
use crate::{CoreError, CoreResult};
use chrono::{DateTime, Utc};

/// Booking input. `employee_code`, `patient_name`, `appointment_date`,
/// `appointment_time` and `doctor_code` are required; the rest of the
/// patient snapshot defaults to empty values when absent.
#[derive(Clone, Debug, Default)]
pub struct AppointmentDraft {
    pub employee_code: Option<String>,
    pub patient_name: Option<String>,
    pub patient_age: Option<u32>,
    pub patient_gender: Option<String>,
    pub patient_relation: Option<String>,
    pub patient_phone: Option<String>,
    pub patient_address: Option<String>,
    pub appointment_date: Option<DateTime<Utc>>,
    pub appointment_time: Option<String>,
    pub doctor_code: Option<String>,
    pub notes: Option<String>,
}

/// Partial update applied by `AppointmentService::update`. At least one
/// field must be present.
#[derive(Clone, Debug, Default)]
pub struct AppointmentUpdate {
    pub status: Option<AppointmentStatus>,
    pub medical_report: Option<String>,
}

#[derive(Clone, Debug)]
pub struct AppointmentService {
    store: DocumentStore,
}

impl AppointmentService {
    pub fn new(store: DocumentStore) -> Self {
        Self { store }
    }

    /// Books an appointment.
    ///
    /// Nothing is persisted when validation fails. The token read and the
    /// write below are not atomic; see `crate::tokens` for the documented
    /// race.
    pub fn create(&self, draft: AppointmentDraft) -> CoreResult<Appointment> {
        let missing = || CoreError::Validation("missing required fields for appointment".into());

        let employee_code = required_text(draft.employee_code).ok_or_else(missing)?;
        let patient_name = required_text(draft.patient_name).ok_or_else(missing)?;
        let appointment_time = required_text(draft.appointment_time).ok_or_else(missing)?;
        let doctor_code = required_text(draft.doctor_code).ok_or_else(missing)?;
        let appointment_date = draft.appointment_date.ok_or_else(missing)?;

        let token_number = allocate_token(&self.store, &doctor_code, appointment_date)?;

        let now = Utc::now();
        let appointment = Appointment {
            id: uuid::Uuid::new_v4().simple().to_string(),
            employee_code,
            patient_name,
            patient_age: draft.patient_age.unwrap_or(0),
            patient_gender: draft.patient_gender.unwrap_or_default(),
            patient_relation: draft.patient_relation.unwrap_or_default(),
            patient_phone: draft.patient_phone.unwrap_or_default(),
            patient_address: draft.patient_address.unwrap_or_default(),
            appointment_date,
            appointment_time,
            doctor_code,
            notes: draft.notes.unwrap_or_default(),
            status: AppointmentStatus::Upcoming,
            token_number,
            medical_report: String::new(),
            created_at: now,
            updated_at: now,
        };
        self.store.put(APPOINTMENTS, &appointment.id, &appointment)?;
        Ok(appointment)
    }

    /// Appointments booked by an employee for one patient name.
    ///
    /// The employee code matches exactly after trimming; the patient name
    /// matches case-insensitively after trimming. Sorted by date, then
    /// time string, then token number.
    pub fn list_for_patient(
        &self,
        employee_code: &str,
        patient_name: &str,
    ) -> CoreResult<Vec<Appointment>> {
        let employee_code = employee_code.trim();
        let patient_name = patient_name.trim();

        let mut appointments: Vec<Appointment> = self
            .store
            .scan::<Appointment>(APPOINTMENTS)?
            .into_iter()
            .filter(|a| a.employee_code == employee_code)
            .filter(|a| a.patient_name.trim().eq_ignore_ascii_case(patient_name))
            .collect();
        sort_schedule(&mut appointments);
        Ok(appointments)
    }

    /// A doctor's full schedule, sorted by date, time string, then token.
    pub fn list_for_doctor(&self, doctor_code: &str) -> CoreResult<Vec<Appointment>> {
        let doctor_code = doctor_code.trim();

        let mut appointments: Vec<Appointment> = self
            .store
            .scan::<Appointment>(APPOINTMENTS)?
            .into_iter()
            .filter(|a| a.doctor_code == doctor_code)
            .collect();
        sort_schedule(&mut appointments);
        Ok(appointments)
    }

    /// Applies a partial status / medical-report update.
    ///
    /// Fields absent from `update` keep their prior values; `updated_at`
    /// is refreshed. No restriction is placed on status transitions.
    pub fn update(&self, id: &str, update: AppointmentUpdate) -> CoreResult<Appointment> {
        if update.status.is_none() && update.medical_report.is_none() {
            return Err(CoreError::Validation(
                "no update data provided (status or medical report)".into(),
            ));
        }

        let mut appointment = self
            .store
            .get::<Appointment>(APPOINTMENTS, id)?
            .ok_or_else(|| CoreError::NotFound(format!("appointment {id}")))?;

        if let Some(status) = update.status {
            appointment.status = status;
        }
        if let Some(medical_report) = update.medical_report {
            appointment.medical_report = medical_report;
        }
        appointment.updated_at = Utc::now();

        self.store.put(APPOINTMENTS, id, &appointment)?;
        Ok(appointment)
    }

    /// Deletes an appointment, which is only allowed once it has been
    /// cancelled.
    pub fn delete(&self, id: &str) -> CoreResult<()> {
        let appointment = self
            .store
            .get::<Appointment>(APPOINTMENTS, id)?
            .ok_or_else(|| CoreError::NotFound(format!("appointment {id}")))?;

        if appointment.status != AppointmentStatus::Cancelled {
            return Err(CoreError::Forbidden(
                "only cancelled appointments can be deleted".into(),
            ));
        }

        self.store.remove(APPOINTMENTS, id)?;
        Ok(())
    }
}

fn sort_schedule(appointments: &mut [Appointment]) {
    appointments.sort_by(|a, b| {
        (a.appointment_date, &a.appointment_time, a.token_number).cmp(&(
            b.appointment_date,
            &b.appointment_time,
            b.token_number,
        ))
    });
}

fn required_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn service(dir: &TempDir) -> AppointmentService {
        AppointmentService::new(DocumentStore::open(dir.path()).unwrap())
    }

    fn draft(employee: &str, patient: &str, doctor: &str, date: &str) -> AppointmentDraft {
        AppointmentDraft {
            employee_code: Some(employee.into()),
            patient_name: Some(patient.into()),
            patient_age: Some(34),
            patient_gender: Some("Female".into()),
            patient_relation: Some("Self".into()),
            patient_phone: Some("9876543210".into()),
            patient_address: Some("12 Lake Road".into()),
            appointment_date: Some(date.parse().unwrap()),
            appointment_time: Some("10:30".into()),
            doctor_code: Some(doctor.into()),
            notes: None,
        }
    }

    #[test]
    fn create_assigns_sequential_tokens_per_doctor_day() {
        let dir = TempDir::new().unwrap();
        let svc = service(&dir);

        for expected in 1..=3 {
            let appointment = svc
                .create(draft("EMP001", "Asha Verma", "DOC001", "2025-06-10T09:00:00Z"))
                .unwrap();
            assert_eq!(appointment.token_number, expected);
            assert_eq!(appointment.status, AppointmentStatus::Upcoming);
        }

        let other_doctor = svc
            .create(draft("EMP001", "Asha Verma", "DOC002", "2025-06-10T09:00:00Z"))
            .unwrap();
        assert_eq!(other_doctor.token_number, 1);
    }

    #[test]
    fn create_rejects_missing_required_fields_without_persisting() {
        let dir = TempDir::new().unwrap();
        let svc = service(&dir);

        let complete = draft("EMP001", "Asha Verma", "DOC001", "2025-06-10T09:00:00Z");
        let strips: [fn(&mut AppointmentDraft); 5] = [
            |d: &mut AppointmentDraft| d.employee_code = None,
            |d: &mut AppointmentDraft| d.patient_name = Some("  ".into()),
            |d: &mut AppointmentDraft| d.appointment_date = None,
            |d: &mut AppointmentDraft| d.appointment_time = None,
            |d: &mut AppointmentDraft| d.doctor_code = None,
        ];
        for strip in strips {
            let mut incomplete = complete.clone();
            strip(&mut incomplete);
            assert!(matches!(
                svc.create(incomplete),
                Err(CoreError::Validation(_))
            ));
        }

        let stored = DocumentStore::open(dir.path())
            .unwrap()
            .scan::<Appointment>(APPOINTMENTS)
            .unwrap();
        assert!(stored.is_empty());
    }

    #[test]
    fn optional_snapshot_fields_default_when_absent() {
        let dir = TempDir::new().unwrap();
        let svc = service(&dir);

        let appointment = svc
            .create(AppointmentDraft {
                employee_code: Some("EMP001".into()),
                patient_name: Some("Asha Verma".into()),
                appointment_date: Some("2025-06-10T09:00:00Z".parse().unwrap()),
                appointment_time: Some("10:30".into()),
                doctor_code: Some("DOC001".into()),
                ..AppointmentDraft::default()
            })
            .unwrap();

        assert_eq!(appointment.patient_age, 0);
        assert_eq!(appointment.patient_gender, "");
        assert_eq!(appointment.notes, "");
        assert_eq!(appointment.medical_report, "");
    }

    #[test]
    fn listing_filters_by_employee_and_patient_case_insensitively() {
        let dir = TempDir::new().unwrap();
        let svc = service(&dir);

        svc.create(draft("EMP001", "Asha Verma", "DOC001", "2025-06-11T09:00:00Z"))
            .unwrap();
        svc.create(draft("EMP001", "Ravi Verma", "DOC001", "2025-06-10T09:00:00Z"))
            .unwrap();
        svc.create(draft("EMP002", "Asha Verma", "DOC001", "2025-06-10T09:00:00Z"))
            .unwrap();

        let found = svc.list_for_patient(" EMP001 ", "asha verma").unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].patient_name, "Asha Verma");
        assert_eq!(found[0].employee_code, "EMP001");
    }

    #[test]
    fn doctor_schedule_is_sorted_by_date_time_then_token() {
        let dir = TempDir::new().unwrap();
        let svc = service(&dir);

        let mut later = draft("EMP001", "Asha Verma", "DOC001", "2025-06-11T00:00:00Z");
        later.appointment_time = Some("09:00".into());
        let mut afternoon = draft("EMP002", "Ravi Verma", "DOC001", "2025-06-10T00:00:00Z");
        afternoon.appointment_time = Some("14:00".into());
        let mut morning = draft("EMP003", "Meena Rao", "DOC001", "2025-06-10T00:00:00Z");
        morning.appointment_time = Some("09:30".into());

        svc.create(later).unwrap();
        svc.create(afternoon).unwrap();
        svc.create(morning).unwrap();
        svc.create(draft("EMP004", "Kiran Das", "DOC002", "2025-06-10T00:00:00Z"))
            .unwrap();

        let schedule = svc.list_for_doctor("DOC001").unwrap();
        let times: Vec<&str> = schedule.iter().map(|a| a.appointment_time.as_str()).collect();
        assert_eq!(times, ["09:30", "14:00", "09:00"]);
        assert!(schedule.iter().all(|a| a.doctor_code == "DOC001"));
    }

    #[test]
    fn update_requires_at_least_one_field() {
        let dir = TempDir::new().unwrap();
        let svc = service(&dir);
        let appointment = svc
            .create(draft("EMP001", "Asha Verma", "DOC001", "2025-06-10T09:00:00Z"))
            .unwrap();

        assert!(matches!(
            svc.update(&appointment.id, AppointmentUpdate::default()),
            Err(CoreError::Validation(_))
        ));
    }

    #[test]
    fn update_is_partial() {
        let dir = TempDir::new().unwrap();
        let svc = service(&dir);
        let appointment = svc
            .create(draft("EMP001", "Asha Verma", "DOC001", "2025-06-10T09:00:00Z"))
            .unwrap();

        let with_report = svc
            .update(
                &appointment.id,
                AppointmentUpdate {
                    status: None,
                    medical_report: Some("BP normal, follow up in 2 weeks".into()),
                },
            )
            .unwrap();
        assert_eq!(with_report.status, AppointmentStatus::Upcoming);
        assert_eq!(with_report.medical_report, "BP normal, follow up in 2 weeks");

        let completed = svc
            .update(
                &appointment.id,
                AppointmentUpdate {
                    status: Some(AppointmentStatus::Completed),
                    medical_report: None,
                },
            )
            .unwrap();
        assert_eq!(completed.status, AppointmentStatus::Completed);
        assert_eq!(completed.medical_report, "BP normal, follow up in 2 weeks");
    }

    #[test]
    fn update_of_unknown_id_is_not_found() {
        let dir = TempDir::new().unwrap();
        let svc = service(&dir);

        let err = svc.update(
            "feedfacefeedfacefeedfacefeedface",
            AppointmentUpdate {
                status: Some(AppointmentStatus::Cancelled),
                medical_report: None,
            },
        );
        assert!(matches!(err, Err(CoreError::NotFound(_))));
    }

    #[test]
    fn delete_is_forbidden_unless_cancelled() {
        let dir = TempDir::new().unwrap();
        let svc = service(&dir);
        let appointment = svc
            .create(draft("EMP001", "Asha Verma", "DOC001", "2025-06-10T09:00:00Z"))
            .unwrap();

        assert!(matches!(
            svc.delete(&appointment.id),
            Err(CoreError::Forbidden(_))
        ));

        svc.update(
            &appointment.id,
            AppointmentUpdate {
                status: Some(AppointmentStatus::Completed),
                medical_report: None,
            },
        )
        .unwrap();
        assert!(matches!(
            svc.delete(&appointment.id),
            Err(CoreError::Forbidden(_))
        ));

        svc.update(
            &appointment.id,
            AppointmentUpdate {
                status: Some(AppointmentStatus::Cancelled),
                medical_report: None,
            },
        )
        .unwrap();
        svc.delete(&appointment.id).unwrap();

        assert!(matches!(
            svc.delete(&appointment.id),
            Err(CoreError::NotFound(_))
        ));
    }

    // The end-to-end sequence from the booking workflow: three bookings for
    // DOC001, one for DOC002 on the same day, then cancel and delete the
    // middle DOC001 booking.
    #[test]
    fn cancelling_and_deleting_leaves_other_tokens_untouched() {
        let dir = TempDir::new().unwrap();
        let svc = service(&dir);

        let t1 = svc
            .create(draft("EMP001", "Asha Verma", "DOC001", "2025-06-10T09:00:00Z"))
            .unwrap();
        let t2 = svc
            .create(draft("EMP001", "Ravi Verma", "DOC001", "2025-06-10T09:00:00Z"))
            .unwrap();
        let t3 = svc
            .create(draft("EMP002", "Meena Rao", "DOC001", "2025-06-10T09:00:00Z"))
            .unwrap();
        let other = svc
            .create(draft("EMP002", "Kiran Das", "DOC002", "2025-06-10T09:00:00Z"))
            .unwrap();

        assert_eq!(
            (t1.token_number, t2.token_number, t3.token_number, other.token_number),
            (1, 2, 3, 1)
        );

        svc.update(
            &t2.id,
            AppointmentUpdate {
                status: Some(AppointmentStatus::Cancelled),
                medical_report: None,
            },
        )
        .unwrap();
        svc.delete(&t2.id).unwrap();

        let remaining = svc.list_for_doctor("DOC001").unwrap();
        let tokens: Vec<u32> = remaining.iter().map(|a| a.token_number).collect();
        assert_eq!(tokens, [1, 3]);
    }
}
