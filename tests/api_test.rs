use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use autoprofi_backend::lists::ListCache;
use autoprofi_backend::routes::router;
use autoprofi_backend::session::{ADMIN_TOKEN_HEADER, SessionGate};
use autoprofi_backend::state::AppState;
use autoprofi_backend::store::MemoryRecordStore;

const PASSWORD: &str = "AutoProfi2024!";

fn app() -> Router {
    let state = AppState {
        store: Arc::new(MemoryRecordStore::new()),
        gate: Arc::new(SessionGate::new(PASSWORD)),
        lists: Arc::new(ListCache::new()),
    };
    router(state)
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(ADMIN_TOKEN_HEADER, token);
    }
    let request = match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .expect("request"),
        None => builder.body(Body::empty()).expect("request"),
    };

    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    // Rejections from the extractors come back as plain text.
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn login(app: &Router) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/auth/login",
        None,
        Some(json!({ "password": PASSWORD })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["token"].as_str().expect("token").to_string()
}

#[tokio::test]
async fn health_is_open() {
    let app = app();
    let (status, _) = send(&app, "GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn wrong_password_is_rejected() {
    let app = app();
    let (status, body) = send(
        &app,
        "POST",
        "/auth/login",
        None,
        Some(json!({ "password": "admin" })),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Wrong password");
}

#[tokio::test]
async fn admin_routes_require_an_active_session() {
    let app = app();

    let (status, _) = send(&app, "GET", "/admin/records?table=courses", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let token = login(&app).await;
    let (status, body) = send(
        &app,
        "GET",
        "/admin/records?table=courses",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn logout_invalidates_the_token() {
    let app = app();
    let token = login(&app).await;

    let (status, _) = send(&app, "POST", "/auth/logout", Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(
        &app,
        "GET",
        "/admin/records?table=courses",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn course_crud_through_the_admin_surface() {
    let app = app();
    let token = login(&app).await;

    let (status, created) = send(
        &app,
        "POST",
        "/admin/records?table=courses",
        Some(&token),
        Some(json!({
            "title": "Категория B (легковой автомобиль)",
            "category": "B",
            "description": "Полный курс обучения вождению",
            "duration": "3 месяца",
            "price": "35000",
            "features": "130 часов теории, 56 часов практики"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["price"], json!(35000));
    assert_eq!(
        created["features"],
        json!(["130 часов теории", "56 часов практики"])
    );
    let id = created["id"].as_i64().expect("id");

    let (status, updated) = send(
        &app,
        "PUT",
        &format!("/admin/records/{}?table=courses", id),
        Some(&token),
        Some(json!({ "price": 36000 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], json!(id));
    assert_eq!(updated["price"], json!(36000));
    assert_eq!(updated["title"], created["title"]);

    let (status, listed) = send(
        &app,
        "GET",
        "/admin/records?table=courses",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed, json!([updated]));

    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/admin/records/{}?table=courses", id),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, listed) = send(
        &app,
        "GET",
        "/admin/records?table=courses",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn public_enrollment_lands_with_status_new() {
    let app = app();

    let (status, enrollment) = send(
        &app,
        "POST",
        "/enrollments",
        None,
        Some(json!({
            "full_name": "Петров Пётр",
            "phone": "+79001234567",
            "email": "petrov@example.com",
            "course_id": 1,
            "message": "Хочу на категорию B"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(enrollment["status"], "new");
    assert!(enrollment["id"].is_i64());

    let token = login(&app).await;
    let (_, listed) = send(
        &app,
        "GET",
        "/admin/records?table=enrollments",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(listed.as_array().expect("array").len(), 1);
}

#[tokio::test]
async fn stats_report_aggregates_over_the_stored_records() {
    let app = app();
    let token = login(&app).await;

    let (status, course) = send(
        &app,
        "POST",
        "/admin/records?table=courses",
        Some(&token),
        Some(json!({
            "title": "Категория B",
            "category": "B",
            "description": "",
            "duration": "3 месяца",
            "price": 35000,
            "features": ""
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let course_id = course["id"].as_i64().expect("id");

    let (status, _) = send(
        &app,
        "POST",
        "/enrollments",
        None,
        Some(json!({
            "full_name": "Петров Пётр",
            "phone": "+79001234567",
            "course_id": course_id
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(&app, "GET", "/admin/stats", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, overview) = send(&app, "GET", "/admin/stats", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(overview["total_courses"], json!(1));
    assert_eq!(overview["total_enrollments"], json!(1));
    // A fresh "new" enrollment has not paid yet.
    assert_eq!(overview["total_revenue"], json!(0));
    assert_eq!(
        overview["status_breakdown"],
        json!([{ "status": "new", "total": 1 }])
    );

    let (status, per_course) = send(
        &app,
        "GET",
        "/admin/stats?type=courses",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(per_course[0]["id"], json!(course_id));
    assert_eq!(per_course[0]["enrollment_count"], json!(1));

    let (status, recent) = send(
        &app,
        "GET",
        "/admin/stats?type=recent&limit=5",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(recent[0]["full_name"], "Петров Пётр");
    assert_eq!(recent[0]["course_title"], "Категория B");

    let (status, _) = send(
        &app,
        "GET",
        "/admin/stats?type=bogus",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn public_course_list_needs_no_session() {
    let app = app();
    let (status, body) = send(&app, "GET", "/courses", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}
