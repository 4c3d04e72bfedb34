mod common;

use axum::http::StatusCode;
use common::{ADMIN_ID, DOCTOR_ID, STAFF_ID, USER_ID, send, setup_test_app, token_for};
use serde_json::{Value, json};

fn doctor_body(registration_number: &str) -> Value {
    json!({
        "userId": DOCTOR_ID,
        "userData": { "name": "Dr. Ada" },
        "specialization": "Cardiology",
        "qualifications": [{ "degree": "MD", "institution": "St. Mary's", "year": 2008 }],
        "experience": 15,
        "department": "Heart Centre",
        "registrationNumber": registration_number,
        "consultationFee": 150.0,
        "availability": [
            { "day": "monday", "slots": [{ "startTime": "09:00", "endTime": "12:00" }] }
        ],
        "languages": ["en", "fr"]
    })
}

#[tokio::test]
async fn test_only_admin_creates_doctors() {
    let app = setup_test_app();

    let (status, _) = send(
        &app,
        "POST",
        "/api/doctors",
        Some(&token_for(STAFF_ID)),
        Some(doctor_body("REG-1")),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, created) = send(
        &app,
        "POST",
        "/api/doctors",
        Some(&token_for(ADMIN_ID)),
        Some(doctor_body("REG-1")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["name"], "Dr. Ada");
    assert_eq!(created["status"], "active");
    assert_eq!(created["rating"], 0.0);
}

#[tokio::test]
async fn test_duplicate_registration_number_is_bad_request() {
    let app = setup_test_app();
    let admin = token_for(ADMIN_ID);

    let (status, _) = send(&app, "POST", "/api/doctors", Some(&admin), Some(doctor_body("REG-7"))).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) =
        send(&app, "POST", "/api/doctors", Some(&admin), Some(doctor_body("REG-7"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "A doctor with this registration number already exists"
    );
}

#[tokio::test]
async fn test_listing_is_admin_or_staff() {
    let app = setup_test_app();

    for (id, expected) in [
        (ADMIN_ID, StatusCode::OK),
        (STAFF_ID, StatusCode::OK),
        (DOCTOR_ID, StatusCode::FORBIDDEN),
        (USER_ID, StatusCode::FORBIDDEN),
    ] {
        let (status, _) = send(&app, "GET", "/api/doctors", Some(&token_for(id)), None).await;
        assert_eq!(status, expected, "{}", id);
    }
}

#[tokio::test]
async fn test_search_and_availability_need_only_authentication() {
    let app = setup_test_app();
    let (_, created) = send(
        &app,
        "POST",
        "/api/doctors",
        Some(&token_for(ADMIN_ID)),
        Some(doctor_body("REG-2")),
    )
    .await;
    let id = created["id"].as_str().unwrap().to_string();
    let user = token_for(USER_ID);

    let (status, found) = send(&app, "GET", "/api/doctors/search/cardio", Some(&user), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(found.as_array().unwrap().len(), 1);

    let (status, availability) = send(
        &app,
        "GET",
        &format!("/api/doctors/{}/availability", id),
        Some(&user),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(availability[0]["day"], "monday");
    assert_eq!(availability[0]["slots"][0]["isAvailable"], true);

    let (status, _) = send(&app, "GET", "/api/doctors/search/cardio", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_update_and_delete() {
    let app = setup_test_app();
    let admin = token_for(ADMIN_ID);
    let (_, created) = send(&app, "POST", "/api/doctors", Some(&admin), Some(doctor_body("REG-3"))).await;
    let id = created["id"].as_str().unwrap().to_string();

    let (status, updated) = send(
        &app,
        "PUT",
        &format!("/api/doctors/{}", id),
        Some(&admin),
        Some(json!({ "status": "on-leave", "consultationFee": 175.0 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "on-leave");
    assert_eq!(updated["consultationFee"], 175.0);

    let (status, body) = send(
        &app,
        "DELETE",
        &format!("/api/doctors/{}", id),
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Doctor removed" }));

    let (status, _) = send(
        &app,
        "GET",
        &format!("/api/doctors/{}/availability", id),
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_padded_registration_number_on_update_is_rejected() {
    let app = setup_test_app();
    let admin = token_for(ADMIN_ID);

    let (status, _) = send(&app, "POST", "/api/doctors", Some(&admin), Some(doctor_body("REG-9"))).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, second) =
        send(&app, "POST", "/api/doctors", Some(&admin), Some(doctor_body("REG-10"))).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = second["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/doctors/{}", id),
        Some(&admin),
        Some(json!({ "registrationNumber": " REG-9 " })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "A doctor with this registration number already exists"
    );

    let (status, found) = send(&app, "GET", "/api/doctors", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    let mut numbers: Vec<&str> = found
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["registrationNumber"].as_str().unwrap())
        .collect();
    numbers.sort();
    assert_eq!(numbers, ["REG-10", "REG-9"]);
}
