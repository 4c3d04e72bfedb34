use anyhow::anyhow;
use chrono::Utc;
use medibase_core::AppError;
use uuid::Uuid;

use crate::db::Collection;
use crate::modules::doctors::model::{CreateDoctorDto, DayAvailability, Doctor, UpdateDoctorDto};

pub struct DoctorService;

impl DoctorService {
    fn registration_taken() -> AppError {
        AppError::bad_request(anyhow!(
            "A doctor with this registration number already exists"
        ))
    }

    fn normalize_registration(raw: &str) -> Result<String, AppError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(AppError::bad_request(anyhow!("registrationNumber is required")));
        }
        Ok(trimmed.to_string())
    }

    pub async fn create_doctor(
        doctors: &Collection<Doctor>,
        dto: CreateDoctorDto,
    ) -> Result<Doctor, AppError> {
        let name = dto
            .resolved_name()
            .ok_or_else(|| AppError::bad_request(anyhow!("name is required")))?;
        let registration_number = Self::normalize_registration(&dto.registration_number)?;

        let now = Utc::now();
        let doctor = Doctor {
            id: Uuid::new_v4(),
            user_id: dto.user_id,
            name,
            specialization: dto.specialization.trim().to_string(),
            qualifications: dto.qualifications,
            experience: dto.experience,
            department: dto.department.trim().to_string(),
            registration_number,
            consultation_fee: dto.consultation_fee,
            availability: dto.availability,
            languages: dto.languages,
            rating: 0.0,
            total_ratings: 0,
            status: dto.status.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        };

        let taken = doctor.registration_number.clone();
        doctors
            .insert_unless(doctor, |d| d.registration_number == taken)
            .await
            .map_err(|_| Self::registration_taken())
    }

    /// Newest first.
    pub async fn get_doctors(doctors: &Collection<Doctor>) -> Vec<Doctor> {
        let mut all = doctors.all().await;
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        all
    }

    pub async fn get_doctor(doctors: &Collection<Doctor>, id: Uuid) -> Result<Doctor, AppError> {
        doctors
            .find_by_id(id)
            .await
            .ok_or_else(|| AppError::not_found(anyhow!("Doctor not found")))
    }

    pub async fn update_doctor(
        doctors: &Collection<Doctor>,
        id: Uuid,
        mut dto: UpdateDoctorDto,
    ) -> Result<Doctor, AppError> {
        let wanted = dto
            .registration_number
            .as_deref()
            .map(Self::normalize_registration)
            .transpose()?;
        dto.registration_number = wanted.clone();

        doctors
            .update_unless(
                id,
                |d| wanted.as_deref() == Some(d.registration_number.as_str()),
                |doctor| dto.apply(doctor),
            )
            .await
            .map_err(|_| Self::registration_taken())?
            .ok_or_else(|| AppError::not_found(anyhow!("Doctor not found")))
    }

    pub async fn delete_doctor(doctors: &Collection<Doctor>, id: Uuid) -> Result<(), AppError> {
        doctors
            .delete(id)
            .await
            .map(|_| ())
            .ok_or_else(|| AppError::not_found(anyhow!("Doctor not found")))
    }

    pub async fn search_doctors(doctors: &Collection<Doctor>, query: &str) -> Vec<Doctor> {
        doctors.find(|d| d.matches(query)).await
    }

    pub async fn get_availability(
        doctors: &Collection<Doctor>,
        id: Uuid,
    ) -> Result<Vec<DayAvailability>, AppError> {
        Self::get_doctor(doctors, id).await.map(|d| d.availability)
    }
}
