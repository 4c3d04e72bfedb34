use crate::modules::patients::controller::{
    create_patient, delete_patient, get_patient, get_patients, search_patients, update_patient,
};
use crate::state::AppState;
use axum::{Router, routing::get};

pub fn init_patients_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_patients).post(create_patient))
        .route("/search/{query}", get(search_patients))
        .route(
            "/{id}",
            get(get_patient).put(update_patient).delete(delete_patient),
        )
}
