use crate::modules::appointments::controller::{
    create_appointment, delete_appointment, get_appointment, get_appointments,
    get_appointments_in_range, get_doctor_appointments, get_patient_appointments,
    update_appointment,
};
use crate::state::AppState;
use axum::{Router, routing::get};

pub fn init_appointments_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_appointments).post(create_appointment))
        .route("/range/{start}/{end}", get(get_appointments_in_range))
        .route("/doctor/{doctor_id}", get(get_doctor_appointments))
        .route("/patient/{patient_id}", get(get_patient_appointments))
        .route(
            "/{id}",
            get(get_appointment)
                .put(update_appointment)
                .delete(delete_appointment),
        )
}
