//! # Carebook Core
//!
//! Core business logic for the Carebook hospital appointment system.
//!
//! This crate contains pure data operations over a file-backed JSON document
//! store:
//! - Employee registration and credential verification
//! - Doctor lookup and one-time seeding
//! - Appointment booking with per-doctor-per-day token allocation
//! - Appointment status / medical-report updates and guarded deletion
//!
//! **No API concerns**: HTTP routing, request parsing and response shaping
//! belong in `api-rest`.

pub mod config;
pub mod error;
pub mod models;
pub mod repositories;
pub mod seed;
pub mod store;
pub mod tokens;

pub use config::CoreConfig;
pub use error::{CoreError, CoreResult};
pub use models::appointment::{Appointment, AppointmentStatus};
pub use models::doctor::Doctor;
pub use models::employee::{Dependent, Employee, Gender, Relation};
pub use repositories::appointments::{AppointmentDraft, AppointmentService, AppointmentUpdate};
pub use repositories::identity::{EmployeeRegistration, IdentityService};
pub use store::DocumentStore;
