//! HTTP request handlers.
//!
//! Each handler parses the request, calls into a `carebook-core` service
//! and translates the outcome to the wire shapes the clients rely on.
//! Error translation happens here, per route, because the routes do not
//! share message strings (and `/register` reports errors under a
//! different key). Unexpected failures are logged and become opaque 500s.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use carebook_core::{
    AppointmentDraft, AppointmentService, AppointmentStatus, AppointmentUpdate, CoreError,
    EmployeeRegistration, IdentityService,
};

use crate::dto::{
    AppointmentRes, AppointmentsRes, CreateAppointmentReq, DoctorLoginReq, DoctorLoginRes,
    DoctorsRes, EmployeeAppointmentsQuery, LoginReq, LoginRes, MessageRes, RegisterErrorRes,
    RegisterReq, RegisterRes, UpdateAppointmentReq,
};
use crate::AppState;

fn identity(state: &AppState) -> IdentityService {
    IdentityService::new(state.store.clone(), state.cfg.clone())
}

fn appointments(state: &AppState) -> AppointmentService {
    AppointmentService::new(state.store.clone())
}

fn fail(status: StatusCode, message: &str) -> (StatusCode, Json<MessageRes>) {
    (
        status,
        Json(MessageRes {
            success: false,
            message: message.into(),
        }),
    )
}

/// Mirrors the clients' presence check: an absent field and an empty
/// string are both "missing".
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[utoipa::path(
    get,
    path = "/health-check",
    responses(
        (status = 200, description = "Liveness probe", body = String)
    )
)]
/// Liveness probe. Plain text so load balancers need no JSON handling.
#[axum::debug_handler]
pub async fn health_check() -> &'static str {
    "Server is healthy"
}

#[utoipa::path(
    post,
    path = "/register",
    request_body = RegisterReq,
    responses(
        (status = 201, description = "Employee registered", body = RegisterRes),
        (status = 400, description = "Missing fields", body = RegisterErrorRes),
        (status = 409, description = "Code or phone already registered", body = RegisterErrorRes),
        (status = 500, description = "Internal server error", body = RegisterErrorRes)
    )
)]
/// Register a new employee, with optional dependents.
#[axum::debug_handler]
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterReq>,
) -> Result<(StatusCode, Json<RegisterRes>), (StatusCode, Json<RegisterErrorRes>)> {
    let registration = EmployeeRegistration {
        employee_code: req.employee_code,
        employee_first_name: req.employee_first_name,
        employee_last_name: req.employee_last_name,
        employee_gender: req.employee_gender,
        employee_phone_number: req.employee_phone_number,
        employee_dob: req.employee_dob,
        employee_password: req.employee_password,
        dependents: req.dependents,
    };

    let reject = |status: StatusCode, error: &str| {
        (
            status,
            Json(RegisterErrorRes {
                error: error.into(),
            }),
        )
    };

    match identity(&state).register_employee(registration) {
        Ok(employee) => Ok((
            StatusCode::CREATED,
            Json(RegisterRes {
                message: "Employee registered".into(),
                employee: employee.into(),
            }),
        )),
        Err(CoreError::Validation(_)) => Err(reject(
            StatusCode::BAD_REQUEST,
            "All fields are required",
        )),
        Err(CoreError::Conflict(_)) => Err(reject(
            StatusCode::CONFLICT,
            "Employee already exists",
        )),
        Err(e) => {
            tracing::error!("Register error: {e:?}");
            Err(reject(StatusCode::INTERNAL_SERVER_ERROR, "Server error"))
        }
    }
}

#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginReq,
    responses(
        (status = 200, description = "Login successful", body = LoginRes),
        (status = 400, description = "Missing code or password", body = MessageRes),
        (status = 401, description = "Invalid credentials", body = MessageRes),
        (status = 500, description = "Internal server error", body = MessageRes)
    )
)]
/// Employee login. An unknown code and a wrong password produce
/// byte-identical 401 responses.
#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginReq>,
) -> Result<Json<LoginRes>, (StatusCode, Json<MessageRes>)> {
    let (Some(code), Some(password)) = (present(req.employee_code), present(req.password)) else {
        return Err(fail(
            StatusCode::BAD_REQUEST,
            "Employee code and password are required.",
        ));
    };

    match identity(&state).verify_employee_login(&code, &password) {
        Ok(employee) => Ok(Json(LoginRes {
            success: true,
            message: "Login successful".into(),
            employee: employee.into(),
        })),
        Err(CoreError::InvalidCredentials) => Err(fail(
            StatusCode::UNAUTHORIZED,
            "Invalid employee code or password.",
        )),
        Err(e) => {
            tracing::error!("Login error: {e:?}");
            Err(fail(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Server error during login.",
            ))
        }
    }
}

#[utoipa::path(
    post,
    path = "/doctor-login",
    request_body = DoctorLoginReq,
    responses(
        (status = 200, description = "Login successful", body = DoctorLoginRes),
        (status = 400, description = "Missing code or password", body = MessageRes),
        (status = 401, description = "Invalid credentials", body = MessageRes),
        (status = 500, description = "Internal server error", body = MessageRes)
    )
)]
/// Doctor login against the shared doctor secret.
#[axum::debug_handler]
pub async fn doctor_login(
    State(state): State<AppState>,
    Json(req): Json<DoctorLoginReq>,
) -> Result<Json<DoctorLoginRes>, (StatusCode, Json<MessageRes>)> {
    let (Some(code), Some(password)) = (present(req.doctor_code), present(req.password)) else {
        return Err(fail(
            StatusCode::BAD_REQUEST,
            "Doctor code and password are required.",
        ));
    };

    match identity(&state).verify_doctor_login(&code, &password) {
        Ok(doctor) => Ok(Json(DoctorLoginRes {
            success: true,
            message: "Doctor login successful".into(),
            doctor,
        })),
        Err(CoreError::InvalidCredentials) => {
            Err(fail(StatusCode::UNAUTHORIZED, "Invalid credentials."))
        }
        Err(e) => {
            tracing::error!("Doctor login error: {e:?}");
            Err(fail(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Server error during doctor login.",
            ))
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/doctors",
    responses(
        (status = 200, description = "All doctors", body = DoctorsRes),
        (status = 500, description = "Internal server error", body = MessageRes)
    )
)]
/// Full doctor listing; the client filters by weekday.
#[axum::debug_handler]
pub async fn list_doctors(
    State(state): State<AppState>,
) -> Result<Json<DoctorsRes>, (StatusCode, Json<MessageRes>)> {
    match identity(&state).list_doctors() {
        Ok(doctors) => Ok(Json(DoctorsRes {
            success: true,
            doctors,
        })),
        Err(e) => {
            tracing::error!("Error fetching doctors: {e:?}");
            Err(fail(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Server error fetching doctors.",
            ))
        }
    }
}

fn parse_appointment_date(raw: &str) -> Result<DateTime<Utc>, ()> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN).and_utc());
    }
    Err(())
}

#[utoipa::path(
    post,
    path = "/api/appointments/create",
    request_body = CreateAppointmentReq,
    responses(
        (status = 201, description = "Appointment booked", body = AppointmentRes),
        (status = 400, description = "Missing or invalid fields", body = MessageRes),
        (status = 500, description = "Internal server error", body = MessageRes)
    )
)]
/// Book an appointment. Allocates the next token for the doctor's day and
/// stores the patient snapshot with status `Upcoming`.
#[axum::debug_handler]
pub async fn create_appointment(
    State(state): State<AppState>,
    Json(req): Json<CreateAppointmentReq>,
) -> Result<(StatusCode, Json<AppointmentRes>), (StatusCode, Json<MessageRes>)> {
    let appointment_date = match present(req.appointment_date) {
        None => None,
        Some(raw) => Some(
            parse_appointment_date(raw.trim())
                .map_err(|()| fail(StatusCode::BAD_REQUEST, "Invalid appointment date."))?,
        ),
    };

    let draft = AppointmentDraft {
        employee_code: req.employee_code,
        patient_name: req.patient_name,
        patient_age: req.patient_age,
        patient_gender: req.patient_gender,
        patient_relation: req.patient_relation,
        patient_phone: req.patient_phone,
        patient_address: req.patient_address,
        appointment_date,
        appointment_time: req.appointment_time,
        doctor_code: req.doctor_code,
        notes: req.notes,
    };

    match appointments(&state).create(draft) {
        Ok(appointment) => Ok((
            StatusCode::CREATED,
            Json(AppointmentRes {
                success: true,
                message: "Appointment Created and Saved".into(),
                appointment,
            }),
        )),
        Err(CoreError::Validation(_)) => Err(fail(
            StatusCode::BAD_REQUEST,
            "Missing required fields for appointment.",
        )),
        Err(e) => {
            tracing::error!("Error saving appointment: {e:?}");
            Err(fail(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Server Error saving appointment",
            ))
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/appointments",
    responses(
        (status = 200, description = "Appointments for one employee and patient", body = AppointmentsRes),
        (status = 400, description = "Missing query parameters", body = MessageRes),
        (status = 500, description = "Internal server error", body = MessageRes)
    )
)]
/// Appointments booked by an employee for one patient (the employee
/// dashboard view). Requires `employeeCode` and `patientName` query
/// parameters.
#[axum::debug_handler]
pub async fn employee_appointments(
    State(state): State<AppState>,
    Query(query): Query<EmployeeAppointmentsQuery>,
) -> Result<Json<AppointmentsRes>, (StatusCode, Json<MessageRes>)> {
    let (Some(employee_code), Some(patient_name)) =
        (present(query.employee_code), present(query.patient_name))
    else {
        return Err(fail(
            StatusCode::BAD_REQUEST,
            "Missing employeeCode or patientName",
        ));
    };

    match appointments(&state).list_for_patient(&employee_code, &patient_name) {
        Ok(found) => Ok(Json(AppointmentsRes {
            success: true,
            appointments: found,
        })),
        Err(e) => {
            tracing::error!("Error fetching employee appointments: {e:?}");
            Err(fail(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string()))
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/doctor/appointments/{doctor_code}",
    responses(
        (status = 200, description = "A doctor's schedule", body = AppointmentsRes),
        (status = 400, description = "Blank doctor code", body = MessageRes),
        (status = 500, description = "Internal server error", body = MessageRes)
    )
)]
/// A doctor's full schedule, sorted by date, time, then token number.
#[axum::debug_handler]
pub async fn doctor_appointments(
    State(state): State<AppState>,
    Path(doctor_code): Path<String>,
) -> Result<Json<AppointmentsRes>, (StatusCode, Json<MessageRes>)> {
    if doctor_code.trim().is_empty() {
        return Err(fail(StatusCode::BAD_REQUEST, "Doctor code is required."));
    }

    match appointments(&state).list_for_doctor(&doctor_code) {
        Ok(found) => Ok(Json(AppointmentsRes {
            success: true,
            appointments: found,
        })),
        Err(e) => {
            tracing::error!("Error fetching doctor's appointments: {e:?}");
            Err(fail(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Server error fetching doctor's appointments.",
            ))
        }
    }
}

#[utoipa::path(
    patch,
    path = "/api/appointments/{id}/update",
    request_body = UpdateAppointmentReq,
    responses(
        (status = 200, description = "Appointment updated", body = AppointmentRes),
        (status = 400, description = "No update data or invalid status", body = MessageRes),
        (status = 404, description = "Unknown appointment", body = MessageRes),
        (status = 500, description = "Internal server error", body = MessageRes)
    )
)]
/// Partial update of an appointment's status and/or medical report.
#[axum::debug_handler]
pub async fn update_appointment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateAppointmentReq>,
) -> Result<Json<AppointmentRes>, (StatusCode, Json<MessageRes>)> {
    let status = match req.status.as_deref() {
        None | Some("") => None,
        Some(raw) => Some(raw.parse::<AppointmentStatus>().map_err(|_| {
            fail(StatusCode::BAD_REQUEST, "Invalid appointment status.")
        })?),
    };

    let update = AppointmentUpdate {
        status,
        medical_report: req.medical_report,
    };

    match appointments(&state).update(&id, update) {
        Ok(appointment) => Ok(Json(AppointmentRes {
            success: true,
            message: "Appointment updated successfully.".into(),
            appointment,
        })),
        Err(CoreError::Validation(_)) => Err(fail(
            StatusCode::BAD_REQUEST,
            "No update data provided (status or medical report).",
        )),
        Err(CoreError::NotFound(_)) => {
            Err(fail(StatusCode::NOT_FOUND, "Appointment not found."))
        }
        Err(e) => {
            tracing::error!("Error updating appointment: {e:?}");
            Err(fail(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Server error updating appointment.",
            ))
        }
    }
}

#[utoipa::path(
    delete,
    path = "/api/appointments/{id}",
    responses(
        (status = 200, description = "Appointment deleted", body = MessageRes),
        (status = 403, description = "Appointment not cancelled", body = MessageRes),
        (status = 404, description = "Unknown appointment", body = MessageRes),
        (status = 500, description = "Internal server error", body = MessageRes)
    )
)]
/// Delete an appointment. Only cancelled appointments may be deleted.
#[axum::debug_handler]
pub async fn delete_appointment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageRes>, (StatusCode, Json<MessageRes>)> {
    match appointments(&state).delete(&id) {
        Ok(()) => Ok(Json(MessageRes {
            success: true,
            message: "Cancelled appointment deleted successfully.".into(),
        })),
        Err(CoreError::NotFound(_)) => {
            Err(fail(StatusCode::NOT_FOUND, "Appointment not found"))
        }
        Err(CoreError::Forbidden(_)) => Err(fail(
            StatusCode::FORBIDDEN,
            "Only cancelled appointments can be deleted.",
        )),
        Err(e) => {
            tracing::error!("Error deleting appointment: {e:?}");
            Err(fail(StatusCode::INTERNAL_SERVER_ERROR, "Server error"))
        }
    }
}
