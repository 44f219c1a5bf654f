//! Persistent record types.
//!
//! All models serialize with the camelCase field names the HTTP clients
//! expect, so the stored documents and the wire representation stay
//! identical. The one exception is the employee password hash, which is
//! persisted but never leaves the store on a read path (see
//! `api-rest`'s `EmployeeProfile`).

pub mod appointment;
pub mod doctor;
pub mod employee;
