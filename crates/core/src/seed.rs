//! One-time doctor seeding.
//!
//! The hospital's doctor roster is fixed. It is written into the store at
//! startup, only when the `doctors` collection is empty, which makes the
//! routine idempotent across restarts.

use crate::models::doctor::Doctor;
use crate::store::{DocumentStore, DOCTORS};
use crate::CoreResult;

/// Seeds the doctor roster if the collection is empty.
///
/// Returns the number of doctors written (0 when the collection already
/// had records).
pub fn seed_doctors(store: &DocumentStore) -> CoreResult<usize> {
    if !store.is_empty(DOCTORS)? {
        tracing::info!("doctors already exist, skipping seeding");
        return Ok(0);
    }

    let roster = doctor_roster();
    for doctor in &roster {
        store.put(DOCTORS, &doctor.doctor_code, doctor)?;
    }
    tracing::info!(
        "seeded doctors: {}",
        roster
            .iter()
            .map(|d| d.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );
    Ok(roster.len())
}

fn doctor_roster() -> Vec<Doctor> {
    let day = |d: &str| d.to_string();
    vec![
        Doctor {
            doctor_code: "DOC001".into(),
            name: "Dr. Aditya Sinha".into(),
            department: "General Medicine".into(),
            available_days: vec![day("Monday"), day("Wednesday"), day("Friday")],
            timings: "09:00 AM - 01:00 PM".into(),
        },
        Doctor {
            doctor_code: "DOC002".into(),
            name: "Dr. Zaid Alam".into(),
            department: "Pediatrics".into(),
            available_days: vec![day("Tuesday"), day("Thursday")],
            timings: "02:00 PM - 06:00 PM".into(),
        },
        Doctor {
            doctor_code: "DOC003".into(),
            name: "Dr. Lucky Singh".into(),
            department: "Orthopedics".into(),
            available_days: vec![
                day("Monday"),
                day("Tuesday"),
                day("Wednesday"),
                day("Thursday"),
                day("Friday"),
                day("Saturday"),
            ],
            timings: "02:00 PM - 06:00 PM".into(),
        },
        Doctor {
            doctor_code: "DOC004".into(),
            name: "Dr. Anil Kumar Sinha".into(),
            // Spelling carried over from the hospital's roster data.
            department: "Cardialogist".into(),
            available_days: vec![day("Thursday"), day("Friday")],
            timings: "02:00 PM - 08:00 PM".into(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn seeds_once_and_only_once() {
        let dir = TempDir::new().unwrap();
        let store = DocumentStore::open(dir.path()).unwrap();

        assert_eq!(seed_doctors(&store).unwrap(), 4);
        assert_eq!(seed_doctors(&store).unwrap(), 0);

        let doctors = store.scan::<Doctor>(DOCTORS).unwrap();
        assert_eq!(doctors.len(), 4);
    }

    #[test]
    fn does_not_overwrite_an_existing_roster() {
        let dir = TempDir::new().unwrap();
        let store = DocumentStore::open(dir.path()).unwrap();

        let custom = Doctor {
            doctor_code: "DOC900".into(),
            name: "Dr. Nivedita Rao".into(),
            department: "Dermatology".into(),
            available_days: vec!["Monday".into()],
            timings: "09:00 AM - 11:00 AM".into(),
        };
        store.put(DOCTORS, &custom.doctor_code, &custom).unwrap();

        assert_eq!(seed_doctors(&store).unwrap(), 0);
        let doctors = store.scan::<Doctor>(DOCTORS).unwrap();
        assert_eq!(doctors, vec![custom]);
    }
}
