//! # API REST
//!
//! REST API for the Carebook hospital appointment system.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - Request parsing and response shaping (JSON, CORS)
//! - OpenAPI documentation via utoipa
//!
//! Business rules live in `carebook-core`; this crate only translates
//! between HTTP and the core services.

#![warn(rust_2018_idioms)]

pub mod dto;
pub mod handlers;

use axum::{
    routing::{delete, get, patch, post},
    Router,
};
use carebook_core::{CoreConfig, DocumentStore};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;

/// Application state shared across REST API handlers.
///
/// The store handle and configuration are cheap to clone; handlers build
/// the core services they need per request.
#[derive(Clone)]
pub struct AppState {
    pub store: DocumentStore,
    pub cfg: Arc<CoreConfig>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health_check,
        handlers::register,
        handlers::login,
        handlers::doctor_login,
        handlers::list_doctors,
        handlers::create_appointment,
        handlers::employee_appointments,
        handlers::doctor_appointments,
        handlers::update_appointment,
        handlers::delete_appointment,
    ),
    components(schemas(
        dto::RegisterReq,
        dto::RegisterRes,
        dto::RegisterErrorRes,
        dto::LoginReq,
        dto::LoginRes,
        dto::DoctorLoginReq,
        dto::DoctorLoginRes,
        dto::DoctorsRes,
        dto::CreateAppointmentReq,
        dto::AppointmentRes,
        dto::AppointmentsRes,
        dto::UpdateAppointmentReq,
        dto::MessageRes,
        dto::EmployeeProfile,
        carebook_core::Gender,
        carebook_core::Relation,
        carebook_core::Dependent,
        carebook_core::Doctor,
        carebook_core::Appointment,
        carebook_core::AppointmentStatus,
    ))
)]
pub struct ApiDoc;

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health-check", get(handlers::health_check))
        .route("/register", post(handlers::register))
        .route("/login", post(handlers::login))
        .route("/doctor-login", post(handlers::doctor_login))
        .route("/api/doctors", get(handlers::list_doctors))
        .route("/api/appointments/create", post(handlers::create_appointment))
        .route("/api/appointments", get(handlers::employee_appointments))
        .route(
            "/api/doctor/appointments/:doctor_code",
            get(handlers::doctor_appointments),
        )
        .route(
            "/api/appointments/:id/update",
            patch(handlers::update_appointment),
        )
        .route("/api/appointments/:id", delete(handlers::delete_appointment))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
