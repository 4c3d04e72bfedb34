use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use medibase_auth::{AdminOnly, AdminOrStaff, StaffTier};
use medibase_core::{AppError, MessageResponse};
use tracing::instrument;

use crate::db::parse_id;
use crate::middleware::auth::Authenticated;
use crate::middleware::role::RequireRole;
use crate::modules::doctors::model::{CreateDoctorDto, DayAvailability, Doctor, UpdateDoctorDto};
use crate::modules::doctors::service::DoctorService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    get,
    path = "/api/doctors",
    responses(
        (status = 200, description = "List of doctors", body = Vec<Doctor>),
        (status = 401, description = "Missing or invalid token", body = MessageResponse),
        (status = 403, description = "Role not permitted", body = MessageResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Doctors"
)]
#[instrument(skip_all)]
pub async fn get_doctors(
    _gate: RequireRole<AdminOrStaff>,
    State(state): State<AppState>,
) -> Json<Vec<Doctor>> {
    Json(DoctorService::get_doctors(&state.db.doctors).await)
}

#[utoipa::path(
    get,
    path = "/api/doctors/{id}",
    params(("id" = String, Path, description = "Doctor id")),
    responses(
        (status = 200, description = "Doctor", body = Doctor),
        (status = 401, description = "Missing or invalid token", body = MessageResponse),
        (status = 403, description = "Role not permitted", body = MessageResponse),
        (status = 404, description = "Doctor not found", body = MessageResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Doctors"
)]
#[instrument(skip_all)]
pub async fn get_doctor(
    _gate: RequireRole<StaffTier>,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Doctor>, AppError> {
    let id = parse_id(&id, "doctor")?;
    let doctor = DoctorService::get_doctor(&state.db.doctors, id).await?;
    Ok(Json(doctor))
}

/// Register a doctor profile
///
/// The registration number must be unique across all doctors.
#[utoipa::path(
    post,
    path = "/api/doctors",
    request_body = CreateDoctorDto,
    responses(
        (status = 201, description = "Doctor created", body = Doctor),
        (status = 400, description = "Invalid body or duplicate registration number", body = MessageResponse),
        (status = 401, description = "Missing or invalid token", body = MessageResponse),
        (status = 403, description = "Role not permitted", body = MessageResponse),
        (status = 422, description = "Validation failed", body = MessageResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Doctors"
)]
#[instrument(skip_all)]
pub async fn create_doctor(
    RequireRole(auth, _): RequireRole<AdminOnly>,
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateDoctorDto>,
) -> Result<(StatusCode, Json<Doctor>), AppError> {
    let doctor = DoctorService::create_doctor(&state.db.doctors, dto).await?;
    tracing::info!(doctor_id = %doctor.id, created_by = %auth.user_id(), "Doctor created");
    Ok((StatusCode::CREATED, Json(doctor)))
}

#[utoipa::path(
    put,
    path = "/api/doctors/{id}",
    params(("id" = String, Path, description = "Doctor id")),
    request_body = UpdateDoctorDto,
    responses(
        (status = 200, description = "Doctor updated", body = Doctor),
        (status = 400, description = "Invalid body or duplicate registration number", body = MessageResponse),
        (status = 401, description = "Missing or invalid token", body = MessageResponse),
        (status = 403, description = "Role not permitted", body = MessageResponse),
        (status = 404, description = "Doctor not found", body = MessageResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Doctors"
)]
#[instrument(skip_all)]
pub async fn update_doctor(
    _gate: RequireRole<AdminOnly>,
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(dto): ValidatedJson<UpdateDoctorDto>,
) -> Result<Json<Doctor>, AppError> {
    let id = parse_id(&id, "doctor")?;
    let doctor = DoctorService::update_doctor(&state.db.doctors, id, dto).await?;
    Ok(Json(doctor))
}

#[utoipa::path(
    delete,
    path = "/api/doctors/{id}",
    params(("id" = String, Path, description = "Doctor id")),
    responses(
        (status = 200, description = "Doctor removed", body = MessageResponse),
        (status = 401, description = "Missing or invalid token", body = MessageResponse),
        (status = 403, description = "Role not permitted", body = MessageResponse),
        (status = 404, description = "Doctor not found", body = MessageResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Doctors"
)]
#[instrument(skip_all)]
pub async fn delete_doctor(
    RequireRole(auth, _): RequireRole<AdminOnly>,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = parse_id(&id, "doctor")?;
    DoctorService::delete_doctor(&state.db.doctors, id).await?;
    tracing::info!(doctor_id = %id, deleted_by = %auth.user_id(), "Doctor removed");
    Ok(Json(MessageResponse::new("Doctor removed")))
}

/// Search doctors by specialization or department
#[utoipa::path(
    get,
    path = "/api/doctors/search/{query}",
    params(("query" = String, Path, description = "Case-insensitive search text")),
    responses(
        (status = 200, description = "Matching doctors", body = Vec<Doctor>),
        (status = 401, description = "Missing or invalid token", body = MessageResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Doctors"
)]
#[instrument(skip_all)]
pub async fn search_doctors(
    _auth: Authenticated,
    State(state): State<AppState>,
    Path(query): Path<String>,
) -> Json<Vec<Doctor>> {
    Json(DoctorService::search_doctors(&state.db.doctors, &query).await)
}

#[utoipa::path(
    get,
    path = "/api/doctors/{id}/availability",
    params(("id" = String, Path, description = "Doctor id")),
    responses(
        (status = 200, description = "Weekly availability", body = Vec<DayAvailability>),
        (status = 401, description = "Missing or invalid token", body = MessageResponse),
        (status = 404, description = "Doctor not found", body = MessageResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Doctors"
)]
#[instrument(skip_all)]
pub async fn get_doctor_availability(
    _auth: Authenticated,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<DayAvailability>>, AppError> {
    let id = parse_id(&id, "doctor")?;
    let availability = DoctorService::get_availability(&state.db.doctors, id).await?;
    Ok(Json(availability))
}
