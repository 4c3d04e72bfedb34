use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::db::Document;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum AppointmentType {
    #[default]
    Consultation,
    FollowUp,
    Emergency,
    RoutineCheckup,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum AppointmentStatus {
    #[default]
    Scheduled,
    Completed,
    Cancelled,
    NoShow,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Completed,
    Refunded,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    #[validate(length(min = 1, message = "timeSlot.startTime is required"))]
    pub start_time: String,
    #[validate(length(min = 1, message = "timeSlot.endTime is required"))]
    pub end_time: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PrescriptionLine {
    pub medicine: Option<String>,
    pub dosage: Option<String>,
    pub frequency: Option<String>,
    pub duration: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Vitals {
    pub blood_pressure: Option<String>,
    pub temperature: Option<f64>,
    pub heart_rate: Option<u32>,
    pub respiratory_rate: Option<u32>,
    pub oxygen_saturation: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: Uuid,
    pub patient: Uuid,
    pub doctor: Uuid,
    pub appointment_date: DateTime<Utc>,
    pub time_slot: TimeSlot,
    #[serde(rename = "type")]
    pub kind: AppointmentType,
    pub status: AppointmentStatus,
    pub reason: String,
    pub symptoms: Vec<String>,
    pub diagnosis: Option<String>,
    pub prescription: Vec<PrescriptionLine>,
    pub notes: Option<String>,
    pub vitals: Option<Vitals>,
    pub follow_up_date: Option<DateTime<Utc>>,
    pub payment_status: PaymentStatus,
    pub amount: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Document for Appointment {
    fn id(&self) -> Uuid {
        self.id
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAppointmentDto {
    pub patient: Uuid,
    pub doctor: Uuid,
    /// RFC 3339 timestamp or `YYYY-MM-DD`.
    pub appointment_date: String,
    #[validate(nested)]
    pub time_slot: TimeSlot,
    #[serde(rename = "type", default)]
    pub kind: AppointmentType,
    #[validate(length(min = 1, message = "reason is required"))]
    pub reason: String,
    #[serde(default)]
    pub symptoms: Vec<String>,
    pub notes: Option<String>,
    pub vitals: Option<Vitals>,
    pub follow_up_date: Option<String>,
    #[validate(range(min = 0.0, message = "amount must not be negative"))]
    pub amount: f64,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAppointmentDto {
    pub appointment_date: Option<String>,
    #[validate(nested)]
    pub time_slot: Option<TimeSlot>,
    #[serde(rename = "type")]
    pub kind: Option<AppointmentType>,
    pub status: Option<AppointmentStatus>,
    #[validate(length(min = 1))]
    pub reason: Option<String>,
    pub symptoms: Option<Vec<String>>,
    pub diagnosis: Option<String>,
    pub prescription: Option<Vec<PrescriptionLine>>,
    pub notes: Option<String>,
    pub vitals: Option<Vitals>,
    pub follow_up_date: Option<String>,
    pub payment_status: Option<PaymentStatus>,
    #[validate(range(min = 0.0))]
    pub amount: Option<f64>,
}

/// Which end of a calendar day a bare `YYYY-MM-DD` resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayBound {
    Start,
    End,
}

/// Parses an RFC 3339 timestamp or a bare `YYYY-MM-DD` date (UTC).
pub fn parse_instant(raw: &str, bound: DayBound) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Some(instant.with_timezone(&Utc));
    }

    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?;
    let time = match bound {
        DayBound::Start => NaiveTime::MIN,
        DayBound::End => NaiveTime::from_hms_milli_opt(23, 59, 59, 999)?,
    };
    Some(Utc.from_utc_datetime(&date.and_time(time)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_instant_accepts_rfc3339() {
        let parsed = parse_instant("2025-03-01T10:30:00+02:00", DayBound::Start).unwrap();
        assert_eq!(parsed.to_rfc3339(), "2025-03-01T08:30:00+00:00");
    }

    #[test]
    fn test_parse_instant_date_bounds() {
        let start = parse_instant("2025-03-01", DayBound::Start).unwrap();
        let end = parse_instant("2025-03-01", DayBound::End).unwrap();
        assert_eq!(start.to_rfc3339(), "2025-03-01T00:00:00+00:00");
        assert!(end > start);
        assert_eq!(end.date_naive(), start.date_naive());
    }

    #[test]
    fn test_parse_instant_rejects_garbage() {
        assert!(parse_instant("next tuesday", DayBound::Start).is_none());
        assert!(parse_instant("2025-13-01", DayBound::Start).is_none());
    }

    #[test]
    fn test_type_field_wire_name() {
        let dto: CreateAppointmentDto = serde_json::from_value(serde_json::json!({
            "patient": Uuid::new_v4(),
            "doctor": Uuid::new_v4(),
            "appointmentDate": "2025-03-01",
            "timeSlot": { "startTime": "09:00", "endTime": "09:30" },
            "type": "follow-up",
            "reason": "Check-up",
            "amount": 40.0
        }))
        .unwrap();
        assert_eq!(dto.kind, AppointmentType::FollowUp);
        assert!(dto.validate().is_ok());
    }
}
