use anyhow::anyhow;
use chrono::Utc;
use medibase_core::AppError;
use uuid::Uuid;

use crate::db::Collection;
use crate::modules::patients::model::{CreatePatientDto, Patient, UpdatePatientDto};

pub struct PatientService;

impl PatientService {
    pub async fn create_patient(
        patients: &Collection<Patient>,
        dto: CreatePatientDto,
    ) -> Result<Patient, AppError> {
        let name = dto
            .resolved_name()
            .ok_or_else(|| AppError::bad_request(anyhow!("name is required")))?;
        let now = Utc::now();

        let patient = Patient {
            id: Uuid::new_v4(),
            user: dto.user,
            name,
            email: dto.email,
            phone_number: dto.phone_number,
            date_of_birth: dto.date_of_birth,
            gender: dto.gender,
            blood_group: dto.blood_group,
            allergies: dto.allergies,
            emergency_contact: dto.emergency_contact,
            insurance: dto.insurance,
            created_at: now,
            updated_at: now,
        };

        Ok(patients.insert(patient).await)
    }

    /// Newest first.
    pub async fn get_patients(patients: &Collection<Patient>) -> Vec<Patient> {
        let mut all = patients.all().await;
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        all
    }

    pub async fn get_patient(patients: &Collection<Patient>, id: Uuid) -> Result<Patient, AppError> {
        patients
            .find_by_id(id)
            .await
            .ok_or_else(|| AppError::not_found(anyhow!("Patient not found")))
    }

    pub async fn update_patient(
        patients: &Collection<Patient>,
        id: Uuid,
        dto: UpdatePatientDto,
    ) -> Result<Patient, AppError> {
        patients
            .update(id, |patient| dto.apply(patient))
            .await
            .ok_or_else(|| AppError::not_found(anyhow!("Patient not found")))
    }

    pub async fn delete_patient(patients: &Collection<Patient>, id: Uuid) -> Result<(), AppError> {
        patients
            .delete(id)
            .await
            .map(|_| ())
            .ok_or_else(|| AppError::not_found(anyhow!("Patient not found")))
    }

    pub async fn search_patients(patients: &Collection<Patient>, query: &str) -> Vec<Patient> {
        patients.find(|p| p.matches(query)).await
    }
}
