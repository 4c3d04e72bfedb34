use anyhow::anyhow;
use chrono::{DateTime, Utc};
use medibase_core::AppError;
use uuid::Uuid;

use crate::db::{Collection, Database};
use crate::modules::appointments::model::{
    Appointment, CreateAppointmentDto, DayBound, UpdateAppointmentDto, parse_instant,
};

fn parse_field(raw: &str, field: &str, bound: DayBound) -> Result<DateTime<Utc>, AppError> {
    parse_instant(raw, bound).ok_or_else(|| AppError::bad_request(anyhow!("Invalid {}", field)))
}

/// Earliest first.
fn by_date(mut appointments: Vec<Appointment>) -> Vec<Appointment> {
    appointments.sort_by(|a, b| a.appointment_date.cmp(&b.appointment_date));
    appointments
}

pub struct AppointmentService;

impl AppointmentService {
    pub async fn create_appointment(
        db: &Database,
        dto: CreateAppointmentDto,
    ) -> Result<Appointment, AppError> {
        let appointment_date = parse_field(&dto.appointment_date, "appointmentDate", DayBound::Start)?;
        let follow_up_date = dto
            .follow_up_date
            .as_deref()
            .map(|raw| parse_field(raw, "followUpDate", DayBound::Start))
            .transpose()?;

        if db.patients.find_by_id(dto.patient).await.is_none() {
            return Err(AppError::bad_request(anyhow!("Patient not found")));
        }
        if db.doctors.find_by_id(dto.doctor).await.is_none() {
            return Err(AppError::bad_request(anyhow!("Doctor not found")));
        }

        let now = Utc::now();
        let appointment = Appointment {
            id: Uuid::new_v4(),
            patient: dto.patient,
            doctor: dto.doctor,
            appointment_date,
            time_slot: dto.time_slot,
            kind: dto.kind,
            status: Default::default(),
            reason: dto.reason,
            symptoms: dto.symptoms,
            diagnosis: None,
            prescription: Vec::new(),
            notes: dto.notes,
            vitals: dto.vitals,
            follow_up_date,
            payment_status: Default::default(),
            amount: dto.amount,
            created_at: now,
            updated_at: now,
        };

        Ok(db.appointments.insert(appointment).await)
    }

    pub async fn get_appointments(appointments: &Collection<Appointment>) -> Vec<Appointment> {
        by_date(appointments.all().await)
    }

    pub async fn get_appointment(
        appointments: &Collection<Appointment>,
        id: Uuid,
    ) -> Result<Appointment, AppError> {
        appointments
            .find_by_id(id)
            .await
            .ok_or_else(|| AppError::not_found(anyhow!("Appointment not found")))
    }

    pub async fn update_appointment(
        appointments: &Collection<Appointment>,
        id: Uuid,
        dto: UpdateAppointmentDto,
    ) -> Result<Appointment, AppError> {
        let appointment_date = dto
            .appointment_date
            .as_deref()
            .map(|raw| parse_field(raw, "appointmentDate", DayBound::Start))
            .transpose()?;
        let follow_up_date = dto
            .follow_up_date
            .as_deref()
            .map(|raw| parse_field(raw, "followUpDate", DayBound::Start))
            .transpose()?;

        appointments
            .update(id, |a| {
                if let Some(date) = appointment_date {
                    a.appointment_date = date;
                }
                if let Some(time_slot) = dto.time_slot {
                    a.time_slot = time_slot;
                }
                if let Some(kind) = dto.kind {
                    a.kind = kind;
                }
                if let Some(status) = dto.status {
                    a.status = status;
                }
                if let Some(reason) = dto.reason {
                    a.reason = reason;
                }
                if let Some(symptoms) = dto.symptoms {
                    a.symptoms = symptoms;
                }
                if let Some(diagnosis) = dto.diagnosis {
                    a.diagnosis = Some(diagnosis);
                }
                if let Some(prescription) = dto.prescription {
                    a.prescription = prescription;
                }
                if let Some(notes) = dto.notes {
                    a.notes = Some(notes);
                }
                if let Some(vitals) = dto.vitals {
                    a.vitals = Some(vitals);
                }
                if follow_up_date.is_some() {
                    a.follow_up_date = follow_up_date;
                }
                if let Some(payment_status) = dto.payment_status {
                    a.payment_status = payment_status;
                }
                if let Some(amount) = dto.amount {
                    a.amount = amount;
                }
                a.updated_at = Utc::now();
            })
            .await
            .ok_or_else(|| AppError::not_found(anyhow!("Appointment not found")))
    }

    pub async fn delete_appointment(
        appointments: &Collection<Appointment>,
        id: Uuid,
    ) -> Result<(), AppError> {
        appointments
            .delete(id)
            .await
            .map(|_| ())
            .ok_or_else(|| AppError::not_found(anyhow!("Appointment not found")))
    }

    /// Both bounds inclusive. A bare `YYYY-MM-DD` end covers that whole day.
    pub async fn get_appointments_in_range(
        appointments: &Collection<Appointment>,
        start: &str,
        end: &str,
    ) -> Result<Vec<Appointment>, AppError> {
        let start = parse_field(start, "start date", DayBound::Start)?;
        let end = parse_field(end, "end date", DayBound::End)?;

        let found = appointments
            .find(|a| a.appointment_date >= start && a.appointment_date <= end)
            .await;
        Ok(by_date(found))
    }

    pub async fn get_doctor_appointments(
        appointments: &Collection<Appointment>,
        doctor_id: Uuid,
    ) -> Vec<Appointment> {
        by_date(appointments.find(|a| a.doctor == doctor_id).await)
    }

    pub async fn get_patient_appointments(
        appointments: &Collection<Appointment>,
        patient_id: Uuid,
    ) -> Vec<Appointment> {
        by_date(appointments.find(|a| a.patient == patient_id).await)
    }
}
