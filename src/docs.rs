use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use medibase_auth::Role;
use medibase_core::MessageResponse;

use crate::modules::appointments::model::{
    Appointment, AppointmentStatus, AppointmentType, CreateAppointmentDto, PaymentStatus,
    PrescriptionLine, TimeSlot, UpdateAppointmentDto, Vitals,
};
use crate::modules::doctors::model::{
    CreateDoctorDto, DayAvailability, Doctor, DoctorStatus, Qualification, Slot,
    UpdateDoctorDto, Weekday,
};
use crate::modules::patients::model::{
    BloodGroup, CreatePatientDto, EmergencyContact, Gender, Insurance, Patient,
    UpdatePatientDto, UserData,
};
use crate::modules::users::model::UserRecord;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::get_me,
        crate::modules::patients::controller::get_patients,
        crate::modules::patients::controller::get_patient,
        crate::modules::patients::controller::create_patient,
        crate::modules::patients::controller::update_patient,
        crate::modules::patients::controller::delete_patient,
        crate::modules::patients::controller::search_patients,
        crate::modules::doctors::controller::get_doctors,
        crate::modules::doctors::controller::get_doctor,
        crate::modules::doctors::controller::create_doctor,
        crate::modules::doctors::controller::update_doctor,
        crate::modules::doctors::controller::delete_doctor,
        crate::modules::doctors::controller::search_doctors,
        crate::modules::doctors::controller::get_doctor_availability,
        crate::modules::appointments::controller::get_appointments,
        crate::modules::appointments::controller::get_appointment,
        crate::modules::appointments::controller::create_appointment,
        crate::modules::appointments::controller::update_appointment,
        crate::modules::appointments::controller::delete_appointment,
        crate::modules::appointments::controller::get_appointments_in_range,
        crate::modules::appointments::controller::get_doctor_appointments,
        crate::modules::appointments::controller::get_patient_appointments,
    ),
    components(
        schemas(
            MessageResponse,
            Role,
            UserRecord,
            Patient,
            Gender,
            BloodGroup,
            EmergencyContact,
            Insurance,
            UserData,
            CreatePatientDto,
            UpdatePatientDto,
            Doctor,
            DoctorStatus,
            Qualification,
            Weekday,
            Slot,
            DayAvailability,
            CreateDoctorDto,
            UpdateDoctorDto,
            Appointment,
            AppointmentType,
            AppointmentStatus,
            PaymentStatus,
            TimeSlot,
            PrescriptionLine,
            Vitals,
            CreateAppointmentDto,
            UpdateAppointmentDto,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Current user"),
        (name = "Patients", description = "Patient records"),
        (name = "Doctors", description = "Doctor profiles and availability"),
        (name = "Appointments", description = "Appointment scheduling")
    ),
    info(
        title = "Medibase API",
        version = "0.1.0",
        description = "Hospital management REST API with JWT authentication and role-based access control.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_routes_and_bearer_scheme() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/auth/me",
            "/api/patients/{id}",
            "/api/doctors/{id}/availability",
            "/api/appointments/range/{start}/{end}",
        ] {
            assert!(doc.paths.get_path_item(path).is_some(), "missing {}", path);
        }
        assert!(
            doc.components
                .as_ref()
                .is_some_and(|c| c.security_schemes.contains_key("bearer_auth"))
        );
    }
}
