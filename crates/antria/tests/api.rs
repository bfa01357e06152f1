//! HTTP API tests driven through the router with `tower::ServiceExt`.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use chrono::NaiveDate;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use antria::bot::{Dispatcher, SessionStore};
use antria::domain::{DomainGateway, MemoryGateway, NewPatient, NewReservation, WeeklySchedule};
use antria::gateway::NullSender;
use antria::server::{AppState, build_app};

fn app() -> (Router, Arc<MemoryGateway>) {
    let store = Arc::new(MemoryGateway::new());
    store.insert_doctor("dr. Sari Wulandari", "Umum", WeeklySchedule::default());
    let department = store.ensure_department("Poli Umum");

    let dispatcher = Arc::new(Dispatcher::new(
        Arc::new(SessionStore::new(Duration::from_secs(300))),
        store.clone() as Arc<dyn DomainGateway>,
        Arc::new(NullSender),
        department.id,
        "628123456789",
    ));
    let state = AppState {
        store: store.clone(),
        dispatcher,
    };
    (build_app(state, 30), store)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_endpoints_respond() {
    let (app, _) = app();
    for uri in ["/livez", "/readyz"] {
        let response = app.clone().oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK, "uri {uri}");
    }
}

#[tokio::test]
async fn version_reports_the_crate() {
    let (app, _) = app();
    let response = app.oneshot(get("/version")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["name"], "antria");
}

#[tokio::test]
async fn create_patient_validates_and_conflicts() {
    let (app, _) = app();

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/v1/patients",
            json!({
                "name": "Budi Santoso",
                "nik": "12345",
                "phone": "081234567890",
                "birth_date": "1990-05-15",
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let valid = json!({
        "name": "Budi Santoso",
        "nik": "1234567890123456",
        "phone": "081234567890",
        "birth_date": "1990-05-15",
    });
    let response = app
        .clone()
        .oneshot(post_json("/api/v1/patients", valid.clone()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    // Phone is canonicalized on the way in.
    assert_eq!(body["phone"], "6281234567890");

    let response = app
        .oneshot(post_json("/api/v1/patients", valid))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "conflict");
}

#[tokio::test]
async fn doctors_roundtrip() {
    let (app, _) = app();

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/v1/doctors",
            json!({
                "name": "drg. Agus Prasetyo",
                "specialty": "Gigi",
                "schedule": { "senin": ["08:00", "14:00"] },
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app.oneshot(get("/api/v1/doctors")).await.unwrap();
    let body = body_json(response).await;
    let doctors = body.as_array().unwrap();
    assert_eq!(doctors.len(), 2);
}

#[tokio::test]
async fn reservation_status_transitions() {
    let (app, store) = app();

    let patient = store
        .create_patient(NewPatient {
            name: "Budi Santoso".into(),
            nik: "1234567890123456".into(),
            phone: "6281234567890".into(),
            birth_date: NaiveDate::from_ymd_opt(1990, 5, 15).unwrap(),
        })
        .await
        .unwrap();
    let doctors = store.list_doctors().await.unwrap();
    let reservation = store
        .create_reservation(NewReservation {
            patient_id: patient.id,
            doctor_id: doctors[0].id.clone(),
            department_id: "dept".into(),
            date: NaiveDate::from_ymd_opt(2026, 8, 10).unwrap(),
            time: "08:00".into(),
        })
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(post_json(
            &format!("/api/v1/reservations/{}/confirm", reservation.id),
            json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "confirmed");

    let response = app
        .clone()
        .oneshot(post_json("/api/v1/reservations/missing/cancel", json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.oneshot(get("/api/v1/reservations")).await.unwrap();
    let body = body_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn bot_message_injection_drives_the_dialogue() {
    let (app, _) = app();

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/v1/bot/messages",
            json!({ "sender": "6281234567890", "text": "MENU" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["from_state"], "IDLE");
    assert_eq!(body["to_state"], "IDLE");
    assert!(
        body["reply"]
            .as_str()
            .unwrap()
            .contains("Selamat Datang")
    );

    let response = app
        .oneshot(post_json(
            "/api/v1/bot/messages",
            json!({ "sender": "6281234567890", "text": "  " }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
