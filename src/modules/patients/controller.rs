use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use medibase_auth::{AdminOnly, AdminOrStaff, StaffTier};
use medibase_core::{AppError, MessageResponse};
use tracing::instrument;

use crate::db::parse_id;
use crate::middleware::role::RequireRole;
use crate::modules::patients::model::{CreatePatientDto, Patient, UpdatePatientDto};
use crate::modules::patients::service::PatientService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// List all patients, newest first
#[utoipa::path(
    get,
    path = "/api/patients",
    responses(
        (status = 200, description = "List of patients", body = Vec<Patient>),
        (status = 401, description = "Missing or invalid token", body = MessageResponse),
        (status = 403, description = "Role not permitted", body = MessageResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Patients"
)]
#[instrument(skip_all)]
pub async fn get_patients(
    _gate: RequireRole<StaffTier>,
    State(state): State<AppState>,
) -> Json<Vec<Patient>> {
    Json(PatientService::get_patients(&state.db.patients).await)
}

/// Get a single patient
#[utoipa::path(
    get,
    path = "/api/patients/{id}",
    params(("id" = String, Path, description = "Patient id")),
    responses(
        (status = 200, description = "Patient", body = Patient),
        (status = 401, description = "Missing or invalid token", body = MessageResponse),
        (status = 403, description = "Role not permitted", body = MessageResponse),
        (status = 404, description = "Patient not found", body = MessageResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Patients"
)]
#[instrument(skip_all)]
pub async fn get_patient(
    _gate: RequireRole<StaffTier>,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Patient>, AppError> {
    let id = parse_id(&id, "patient")?;
    let patient = PatientService::get_patient(&state.db.patients, id).await?;
    Ok(Json(patient))
}

/// Register a patient
#[utoipa::path(
    post,
    path = "/api/patients",
    request_body = CreatePatientDto,
    responses(
        (status = 201, description = "Patient created", body = Patient),
        (status = 400, description = "Invalid request body", body = MessageResponse),
        (status = 401, description = "Missing or invalid token", body = MessageResponse),
        (status = 403, description = "Role not permitted", body = MessageResponse),
        (status = 422, description = "Validation failed", body = MessageResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Patients"
)]
#[instrument(skip_all)]
pub async fn create_patient(
    RequireRole(auth, _): RequireRole<AdminOrStaff>,
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreatePatientDto>,
) -> Result<(StatusCode, Json<Patient>), AppError> {
    let patient = PatientService::create_patient(&state.db.patients, dto).await?;
    tracing::info!(patient_id = %patient.id, created_by = %auth.user_id(), "Patient created");
    Ok((StatusCode::CREATED, Json(patient)))
}

/// Update a patient
#[utoipa::path(
    put,
    path = "/api/patients/{id}",
    params(("id" = String, Path, description = "Patient id")),
    request_body = UpdatePatientDto,
    responses(
        (status = 200, description = "Patient updated", body = Patient),
        (status = 401, description = "Missing or invalid token", body = MessageResponse),
        (status = 403, description = "Role not permitted", body = MessageResponse),
        (status = 404, description = "Patient not found", body = MessageResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Patients"
)]
#[instrument(skip_all)]
pub async fn update_patient(
    _gate: RequireRole<AdminOrStaff>,
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(dto): ValidatedJson<UpdatePatientDto>,
) -> Result<Json<Patient>, AppError> {
    let id = parse_id(&id, "patient")?;
    let patient = PatientService::update_patient(&state.db.patients, id, dto).await?;
    Ok(Json(patient))
}

/// Remove a patient
#[utoipa::path(
    delete,
    path = "/api/patients/{id}",
    params(("id" = String, Path, description = "Patient id")),
    responses(
        (status = 200, description = "Patient removed", body = MessageResponse),
        (status = 401, description = "Missing or invalid token", body = MessageResponse),
        (status = 403, description = "Role not permitted", body = MessageResponse),
        (status = 404, description = "Patient not found", body = MessageResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Patients"
)]
#[instrument(skip_all)]
pub async fn delete_patient(
    RequireRole(auth, _): RequireRole<AdminOnly>,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = parse_id(&id, "patient")?;
    PatientService::delete_patient(&state.db.patients, id).await?;
    tracing::info!(patient_id = %id, deleted_by = %auth.user_id(), "Patient removed");
    Ok(Json(MessageResponse::new("Patient removed")))
}

/// Search patients by name, email or phone number
#[utoipa::path(
    get,
    path = "/api/patients/search/{query}",
    params(("query" = String, Path, description = "Case-insensitive search text")),
    responses(
        (status = 200, description = "Matching patients", body = Vec<Patient>),
        (status = 401, description = "Missing or invalid token", body = MessageResponse),
        (status = 403, description = "Role not permitted", body = MessageResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Patients"
)]
#[instrument(skip_all)]
pub async fn search_patients(
    _gate: RequireRole<StaffTier>,
    State(state): State<AppState>,
    Path(query): Path<String>,
) -> Json<Vec<Patient>> {
    Json(PatientService::search_patients(&state.db.patients, &query).await)
}
