use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use medibase_auth::{AdminOnly, AdminOrStaff, DoctorOrAdmin, StaffTier};
use medibase_core::{AppError, MessageResponse};
use tracing::instrument;

use crate::db::parse_id;
use crate::middleware::role::RequireRole;
use crate::modules::appointments::model::{
    Appointment, CreateAppointmentDto, UpdateAppointmentDto,
};
use crate::modules::appointments::service::AppointmentService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// List all appointments, earliest first
#[utoipa::path(
    get,
    path = "/api/appointments",
    responses(
        (status = 200, description = "List of appointments", body = Vec<Appointment>),
        (status = 401, description = "Missing or invalid token", body = MessageResponse),
        (status = 403, description = "Role not permitted", body = MessageResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Appointments"
)]
#[instrument(skip_all)]
pub async fn get_appointments(
    _gate: RequireRole<StaffTier>,
    State(state): State<AppState>,
) -> Json<Vec<Appointment>> {
    Json(AppointmentService::get_appointments(&state.db.appointments).await)
}

#[utoipa::path(
    get,
    path = "/api/appointments/{id}",
    params(("id" = String, Path, description = "Appointment id")),
    responses(
        (status = 200, description = "Appointment", body = Appointment),
        (status = 401, description = "Missing or invalid token", body = MessageResponse),
        (status = 403, description = "Role not permitted", body = MessageResponse),
        (status = 404, description = "Appointment not found", body = MessageResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Appointments"
)]
#[instrument(skip_all)]
pub async fn get_appointment(
    _gate: RequireRole<StaffTier>,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Appointment>, AppError> {
    let id = parse_id(&id, "appointment")?;
    let appointment = AppointmentService::get_appointment(&state.db.appointments, id).await?;
    Ok(Json(appointment))
}

/// Book an appointment
///
/// Both the patient and the doctor must already exist.
#[utoipa::path(
    post,
    path = "/api/appointments",
    request_body = CreateAppointmentDto,
    responses(
        (status = 201, description = "Appointment created", body = Appointment),
        (status = 400, description = "Invalid body, date or reference", body = MessageResponse),
        (status = 401, description = "Missing or invalid token", body = MessageResponse),
        (status = 403, description = "Role not permitted", body = MessageResponse),
        (status = 422, description = "Validation failed", body = MessageResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Appointments"
)]
#[instrument(skip_all)]
pub async fn create_appointment(
    RequireRole(auth, _): RequireRole<AdminOrStaff>,
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateAppointmentDto>,
) -> Result<(StatusCode, Json<Appointment>), AppError> {
    let appointment = AppointmentService::create_appointment(&state.db, dto).await?;
    tracing::info!(
        appointment_id = %appointment.id,
        created_by = %auth.user_id(),
        "Appointment created"
    );
    Ok((StatusCode::CREATED, Json(appointment)))
}

#[utoipa::path(
    put,
    path = "/api/appointments/{id}",
    params(("id" = String, Path, description = "Appointment id")),
    request_body = UpdateAppointmentDto,
    responses(
        (status = 200, description = "Appointment updated", body = Appointment),
        (status = 400, description = "Invalid body or date", body = MessageResponse),
        (status = 401, description = "Missing or invalid token", body = MessageResponse),
        (status = 403, description = "Role not permitted", body = MessageResponse),
        (status = 404, description = "Appointment not found", body = MessageResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Appointments"
)]
#[instrument(skip_all)]
pub async fn update_appointment(
    _gate: RequireRole<StaffTier>,
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(dto): ValidatedJson<UpdateAppointmentDto>,
) -> Result<Json<Appointment>, AppError> {
    let id = parse_id(&id, "appointment")?;
    let appointment =
        AppointmentService::update_appointment(&state.db.appointments, id, dto).await?;
    Ok(Json(appointment))
}

#[utoipa::path(
    delete,
    path = "/api/appointments/{id}",
    params(("id" = String, Path, description = "Appointment id")),
    responses(
        (status = 200, description = "Appointment removed", body = MessageResponse),
        (status = 401, description = "Missing or invalid token", body = MessageResponse),
        (status = 403, description = "Role not permitted", body = MessageResponse),
        (status = 404, description = "Appointment not found", body = MessageResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Appointments"
)]
#[instrument(skip_all)]
pub async fn delete_appointment(
    RequireRole(auth, _): RequireRole<AdminOnly>,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = parse_id(&id, "appointment")?;
    AppointmentService::delete_appointment(&state.db.appointments, id).await?;
    tracing::info!(appointment_id = %id, deleted_by = %auth.user_id(), "Appointment removed");
    Ok(Json(MessageResponse::new("Appointment removed")))
}

/// Appointments between two dates, both inclusive
#[utoipa::path(
    get,
    path = "/api/appointments/range/{start}/{end}",
    params(
        ("start" = String, Path, description = "RFC 3339 timestamp or YYYY-MM-DD"),
        ("end" = String, Path, description = "RFC 3339 timestamp or YYYY-MM-DD")
    ),
    responses(
        (status = 200, description = "Appointments in range", body = Vec<Appointment>),
        (status = 400, description = "Invalid date", body = MessageResponse),
        (status = 401, description = "Missing or invalid token", body = MessageResponse),
        (status = 403, description = "Role not permitted", body = MessageResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Appointments"
)]
#[instrument(skip_all)]
pub async fn get_appointments_in_range(
    _gate: RequireRole<StaffTier>,
    State(state): State<AppState>,
    Path((start, end)): Path<(String, String)>,
) -> Result<Json<Vec<Appointment>>, AppError> {
    let appointments =
        AppointmentService::get_appointments_in_range(&state.db.appointments, &start, &end)
            .await?;
    Ok(Json(appointments))
}

#[utoipa::path(
    get,
    path = "/api/appointments/doctor/{doctor_id}",
    params(("doctor_id" = String, Path, description = "Doctor id")),
    responses(
        (status = 200, description = "The doctor's appointments", body = Vec<Appointment>),
        (status = 401, description = "Missing or invalid token", body = MessageResponse),
        (status = 403, description = "Role not permitted", body = MessageResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Appointments"
)]
#[instrument(skip_all)]
pub async fn get_doctor_appointments(
    _gate: RequireRole<DoctorOrAdmin>,
    State(state): State<AppState>,
    Path(doctor_id): Path<String>,
) -> Result<Json<Vec<Appointment>>, AppError> {
    let doctor_id = parse_id(&doctor_id, "doctor")?;
    Ok(Json(
        AppointmentService::get_doctor_appointments(&state.db.appointments, doctor_id).await,
    ))
}

#[utoipa::path(
    get,
    path = "/api/appointments/patient/{patient_id}",
    params(("patient_id" = String, Path, description = "Patient id")),
    responses(
        (status = 200, description = "The patient's appointments", body = Vec<Appointment>),
        (status = 401, description = "Missing or invalid token", body = MessageResponse),
        (status = 403, description = "Role not permitted", body = MessageResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Appointments"
)]
#[instrument(skip_all)]
pub async fn get_patient_appointments(
    _gate: RequireRole<StaffTier>,
    State(state): State<AppState>,
    Path(patient_id): Path<String>,
) -> Result<Json<Vec<Appointment>>, AppError> {
    let patient_id = parse_id(&patient_id, "patient")?;
    Ok(Json(
        AppointmentService::get_patient_appointments(&state.db.appointments, patient_id).await,
    ))
}
