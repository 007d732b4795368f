use axum::http::{self, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use mock_server::{app, LOGIN, PARTNER_TOKEN, PASSWORD};
use serde_json::{json, Value};
use tower::ServiceExt;

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn partner() -> String {
    format!("Bearer {PARTNER_TOKEN}")
}

fn user(token: &str) -> String {
    format!("Bearer {PARTNER_TOKEN}, User {token}")
}

fn request(method: &str, uri: &str, auth: Option<&str>, body: Option<Value>) -> Request<String> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json");
    if let Some(auth) = auth {
        builder = builder.header(http::header::AUTHORIZATION, auth);
    }
    builder
        .body(body.map(|b| b.to_string()).unwrap_or_default())
        .unwrap()
}

async fn login(app: &Router) -> String {
    let resp = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/v1/auth",
            Some(&partner()),
            Some(json!({"login": LOGIN, "password": PASSWORD})),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    body_json(resp).await["user_token"].as_str().unwrap().to_string()
}

// --- auth ---

#[tokio::test]
async fn auth_requires_partner_token() {
    let resp = app()
        .oneshot(request(
            "POST",
            "/api/v1/auth",
            None,
            Some(json!({"login": LOGIN, "password": PASSWORD})),
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(resp).await;
    assert_eq!(body["errors"]["code"], 401);
}

#[tokio::test]
async fn auth_rejects_wrong_password() {
    let resp = app()
        .oneshot(request(
            "POST",
            "/api/v1/auth",
            Some(&partner()),
            Some(json!({"login": LOGIN, "password": "nope"})),
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn auth_issues_user_token() {
    let app = app();
    let token = login(&app).await;
    assert_eq!(token.len(), 32);
}

// --- companies ---

#[tokio::test]
async fn list_companies_empty() {
    let resp = app()
        .oneshot(request("GET", "/api/v1/companies", Some(&partner()), None))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await, json!([]));
}

#[tokio::test]
async fn my_companies_need_user_token() {
    let resp = app()
        .oneshot(request("GET", "/api/v1/companies?my=1", Some(&partner()), None))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn create_company_requires_user() {
    let resp = app()
        .oneshot(request(
            "POST",
            "/api/v1/companies",
            Some(&partner()),
            Some(json!({"title": "Salon"})),
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn create_company_requires_title() {
    let app = app();
    let token = login(&app).await;
    let resp = app
        .oneshot(request(
            "POST",
            "/api/v1/companies",
            Some(&user(&token)),
            Some(json!({"country_id": 1})),
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn get_company_not_found() {
    let resp = app()
        .oneshot(request("GET", "/api/v1/company/999", Some(&partner()), None))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(resp).await["errors"]["message"], "Not found");
}

#[tokio::test]
async fn get_company_bad_id_returns_400() {
    let resp = app()
        .oneshot(request("GET", "/api/v1/company/not-a-number", Some(&partner()), None))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- full lifecycle ---

#[tokio::test]
async fn company_and_client_lifecycle() {
    let app = app();
    let token = login(&app).await;

    // create company
    let resp = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/v1/companies",
            Some(&user(&token)),
            Some(json!({"title": "Salon", "group_id": 3})),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let company = body_json(resp).await;
    let company_id = company["id"].as_u64().unwrap();

    // rename it
    let resp = app
        .clone()
        .oneshot(request(
            "PUT",
            &format!("/api/v1/company/{company_id}"),
            Some(&user(&token)),
            Some(json!({"title": "Salon Two", "id": 12345})),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let updated = body_json(resp).await;
    assert_eq!(updated["title"], "Salon Two");
    assert_eq!(updated["id"], company_id);

    // group filter
    let resp = app
        .clone()
        .oneshot(request("GET", "/api/v1/companies?group_id=3", Some(&partner()), None))
        .await
        .unwrap();
    assert_eq!(body_json(resp).await.as_array().unwrap().len(), 1);

    // add a client
    let resp = app
        .clone()
        .oneshot(request(
            "POST",
            &format!("/api/v1/clients/{company_id}"),
            Some(&user(&token)),
            Some(json!({"name": "Ann Lee", "phone": "79161502239"})),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let client_id = body_json(resp).await["id"].as_u64().unwrap();

    // search by name
    let resp = app
        .clone()
        .oneshot(request(
            "GET",
            &format!("/api/v1/clients/{company_id}?fullname=Ann"),
            Some(&user(&token)),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(body_json(resp).await.as_array().unwrap().len(), 1);

    // delete the client
    let resp = app
        .clone()
        .oneshot(request(
            "DELETE",
            &format!("/api/v1/client/{company_id}/{client_id}"),
            Some(&user(&token)),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(resp).await.is_empty());

    // delete the company
    let resp = app
        .clone()
        .oneshot(request(
            "DELETE",
            &format!("/api/v1/company/{company_id}"),
            Some(&partner()),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    // gone
    let resp = app
        .oneshot(request(
            "GET",
            &format!("/api/v1/company/{company_id}"),
            Some(&partner()),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- records ---

#[tokio::test]
async fn records_lifecycle() {
    let app = app();
    let token = login(&app).await;

    let resp = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/v1/companies",
            Some(&user(&token)),
            Some(json!({"title": "Salon"})),
        ))
        .await
        .unwrap();
    let company_id = body_json(resp).await["id"].as_u64().unwrap();

    // an empty service list is refused
    let resp = app
        .clone()
        .oneshot(request(
            "POST",
            &format!("/api/v1/records/{company_id}"),
            Some(&user(&token)),
            Some(json!({
                "staff_id": 5,
                "services": [],
                "client": {"phone": "79161502239"},
                "datetime": "2016-03-01T12:00:00+0300",
                "seance_length": 3600
            })),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let resp = app
        .clone()
        .oneshot(request(
            "POST",
            &format!("/api/v1/records/{company_id}"),
            Some(&user(&token)),
            Some(json!({
                "staff_id": 5,
                "services": [{"id": 331}],
                "client": {"phone": "79161502239"},
                "datetime": "2016-03-01T12:00:00+0300",
                "seance_length": 3600
            })),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let record_id = body_json(resp).await["id"].as_u64().unwrap();

    // staff filter
    let resp = app
        .clone()
        .oneshot(request(
            "GET",
            &format!("/api/v1/records/{company_id}?staff_id=6"),
            Some(&user(&token)),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(body_json(resp).await, json!([]));

    let resp = app
        .clone()
        .oneshot(request(
            "PUT",
            &format!("/api/v1/record/{company_id}/{record_id}"),
            Some(&user(&token)),
            Some(json!({"comment": "late"})),
        ))
        .await
        .unwrap();
    assert_eq!(body_json(resp).await["comment"], "late");

    // partner-only auth is not enough
    let resp = app
        .clone()
        .oneshot(request(
            "DELETE",
            &format!("/api/v1/record/{company_id}/{record_id}"),
            Some(&partner()),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = app
        .oneshot(request(
            "DELETE",
            &format!("/api/v1/record/{company_id}/{record_id}"),
            Some(&user(&token)),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
}
