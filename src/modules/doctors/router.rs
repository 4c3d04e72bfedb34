use crate::modules::doctors::controller::{
    create_doctor, delete_doctor, get_doctor, get_doctor_availability, get_doctors,
    search_doctors, update_doctor,
};
use crate::state::AppState;
use axum::{Router, routing::get};

pub fn init_doctors_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_doctors).post(create_doctor))
        .route("/search/{query}", get(search_doctors))
        .route(
            "/{id}",
            get(get_doctor).put(update_doctor).delete(delete_doctor),
        )
        .route("/{id}/availability", get(get_doctor_availability))
}
