//! Patient documents and request DTOs.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::db::Document;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum BloodGroup {
    #[serde(rename = "A+")]
    APositive,
    #[serde(rename = "A-")]
    ANegative,
    #[serde(rename = "B+")]
    BPositive,
    #[serde(rename = "B-")]
    BNegative,
    #[serde(rename = "AB+")]
    AbPositive,
    #[serde(rename = "AB-")]
    AbNegative,
    #[serde(rename = "O+")]
    OPositive,
    #[serde(rename = "O-")]
    ONegative,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyContact {
    pub name: Option<String>,
    pub relationship: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Insurance {
    pub provider: Option<String>,
    pub policy_number: Option<String>,
    pub valid_until: Option<NaiveDate>,
    pub coverage_details: Option<String>,
}

/// A patient record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: Uuid,
    /// Directory id of the account this patient belongs to.
    pub user: String,
    pub name: String,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
    pub blood_group: Option<BloodGroup>,
    pub allergies: Vec<String>,
    pub emergency_contact: Option<EmergencyContact>,
    pub insurance: Option<Insurance>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Document for Patient {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Patient {
    /// Case-insensitive match on name, email or phone number.
    pub fn matches(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        [Some(&self.name), self.email.as_ref(), self.phone_number.as_ref()]
            .into_iter()
            .flatten()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}

/// Profile fields sent alongside a record by older clients.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UserData {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePatientDto {
    #[validate(length(min = 1, message = "user is required"))]
    pub user: String,
    /// Falls back to `userData.name` when absent.
    pub name: Option<String>,
    pub user_data: Option<UserData>,
    #[validate(email)]
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
    pub blood_group: Option<BloodGroup>,
    #[serde(default)]
    pub allergies: Vec<String>,
    pub emergency_contact: Option<EmergencyContact>,
    pub insurance: Option<Insurance>,
}

impl CreatePatientDto {
    pub fn resolved_name(&self) -> Option<String> {
        resolve_name(self.name.as_deref(), self.user_data.as_ref())
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePatientDto {
    #[validate(length(min = 1))]
    pub name: Option<String>,
    pub user_data: Option<UserData>,
    #[validate(email)]
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub blood_group: Option<BloodGroup>,
    pub allergies: Option<Vec<String>>,
    pub emergency_contact: Option<EmergencyContact>,
    pub insurance: Option<Insurance>,
}

impl UpdatePatientDto {
    pub fn apply(self, patient: &mut Patient) {
        if let Some(name) = resolve_name(self.name.as_deref(), self.user_data.as_ref()) {
            patient.name = name;
        }
        if let Some(email) = self.email {
            patient.email = Some(email);
        }
        if let Some(phone_number) = self.phone_number {
            patient.phone_number = Some(phone_number);
        }
        if let Some(date_of_birth) = self.date_of_birth {
            patient.date_of_birth = date_of_birth;
        }
        if let Some(gender) = self.gender {
            patient.gender = gender;
        }
        if let Some(blood_group) = self.blood_group {
            patient.blood_group = Some(blood_group);
        }
        if let Some(allergies) = self.allergies {
            patient.allergies = allergies;
        }
        if let Some(emergency_contact) = self.emergency_contact {
            patient.emergency_contact = Some(emergency_contact);
        }
        if let Some(insurance) = self.insurance {
            patient.insurance = Some(insurance);
        }
        patient.updated_at = Utc::now();
    }
}

/// `userData.name` takes precedence over a top-level `name`, matching what
/// older clients expect when they send both.
pub(crate) fn resolve_name(name: Option<&str>, user_data: Option<&UserData>) -> Option<String> {
    user_data
        .and_then(|d| d.name.as_deref())
        .or(name)
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string)
}
