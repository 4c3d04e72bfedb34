use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::db::Document;
use crate::modules::patients::model::{UserData, resolve_name};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum DoctorStatus {
    #[default]
    Active,
    OnLeave,
    Inactive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Qualification {
    pub degree: Option<String>,
    pub institution: Option<String>,
    pub year: Option<i32>,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    pub start_time: String,
    pub end_time: String,
    #[serde(default = "default_true")]
    pub is_available: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DayAvailability {
    pub day: Weekday,
    #[serde(default)]
    pub slots: Vec<Slot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    pub id: Uuid,
    /// Directory id of the doctor's account.
    pub user_id: String,
    pub name: String,
    pub specialization: String,
    pub qualifications: Vec<Qualification>,
    pub experience: u32,
    pub department: String,
    pub registration_number: String,
    pub consultation_fee: f64,
    pub availability: Vec<DayAvailability>,
    pub languages: Vec<String>,
    pub rating: f64,
    pub total_ratings: u32,
    pub status: DoctorStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Document for Doctor {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Doctor {
    /// Case-insensitive match on specialization or department.
    pub fn matches(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.specialization.to_lowercase().contains(&needle)
            || self.department.to_lowercase().contains(&needle)
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateDoctorDto {
    #[validate(length(min = 1, message = "userId is required"))]
    pub user_id: String,
    pub name: Option<String>,
    pub user_data: Option<UserData>,
    #[validate(length(min = 1, message = "specialization is required"))]
    pub specialization: String,
    #[serde(default)]
    pub qualifications: Vec<Qualification>,
    pub experience: u32,
    #[validate(length(min = 1, message = "department is required"))]
    pub department: String,
    #[validate(length(min = 1, message = "registrationNumber is required"))]
    pub registration_number: String,
    #[validate(range(min = 0.0, message = "consultationFee must not be negative"))]
    pub consultation_fee: f64,
    #[serde(default)]
    pub availability: Vec<DayAvailability>,
    #[serde(default)]
    pub languages: Vec<String>,
    pub status: Option<DoctorStatus>,
}

impl CreateDoctorDto {
    pub fn resolved_name(&self) -> Option<String> {
        resolve_name(self.name.as_deref(), self.user_data.as_ref())
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDoctorDto {
    pub name: Option<String>,
    pub user_data: Option<UserData>,
    #[validate(length(min = 1))]
    pub specialization: Option<String>,
    pub qualifications: Option<Vec<Qualification>>,
    pub experience: Option<u32>,
    #[validate(length(min = 1))]
    pub department: Option<String>,
    #[validate(length(min = 1))]
    pub registration_number: Option<String>,
    #[validate(range(min = 0.0))]
    pub consultation_fee: Option<f64>,
    pub availability: Option<Vec<DayAvailability>>,
    pub languages: Option<Vec<String>>,
    #[validate(range(min = 0.0, max = 5.0))]
    pub rating: Option<f64>,
    pub total_ratings: Option<u32>,
    pub status: Option<DoctorStatus>,
}

impl UpdateDoctorDto {
    pub fn apply(self, doctor: &mut Doctor) {
        if let Some(name) = resolve_name(self.name.as_deref(), self.user_data.as_ref()) {
            doctor.name = name;
        }
        if let Some(specialization) = self.specialization {
            doctor.specialization = specialization;
        }
        if let Some(qualifications) = self.qualifications {
            doctor.qualifications = qualifications;
        }
        if let Some(experience) = self.experience {
            doctor.experience = experience;
        }
        if let Some(department) = self.department {
            doctor.department = department;
        }
        if let Some(registration_number) = self.registration_number {
            doctor.registration_number = registration_number.trim().to_string();
        }
        if let Some(fee) = self.consultation_fee {
            doctor.consultation_fee = fee;
        }
        if let Some(availability) = self.availability {
            doctor.availability = availability;
        }
        if let Some(languages) = self.languages {
            doctor.languages = languages;
        }
        if let Some(rating) = self.rating {
            doctor.rating = rating;
        }
        if let Some(total_ratings) = self.total_ratings {
            doctor.total_ratings = total_ratings;
        }
        if let Some(status) = self.status {
            doctor.status = status;
        }
        doctor.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_names() {
        assert_eq!(
            serde_json::to_string(&DoctorStatus::OnLeave).unwrap(),
            "\"on-leave\""
        );
        assert_eq!(DoctorStatus::default(), DoctorStatus::Active);
    }

    #[test]
    fn test_slot_defaults_to_available() {
        let day: DayAvailability = serde_json::from_str(
            r#"{"day":"monday","slots":[{"startTime":"09:00","endTime":"09:30"}]}"#,
        )
        .unwrap();
        assert_eq!(day.day, Weekday::Monday);
        assert!(day.slots[0].is_available);
    }

    #[test]
    fn test_create_dto_rejects_empty_registration_number() {
        let dto: CreateDoctorDto = serde_json::from_str(
            r#"{
                "userId": "d1",
                "name": "Dr. House",
                "specialization": "Diagnostics",
                "experience": 20,
                "department": "Internal Medicine",
                "registrationNumber": "",
                "consultationFee": 250
            }"#,
        )
        .unwrap();
        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("registration_number"));
    }
}
