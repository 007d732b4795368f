//! In-memory imitation of a slice of the Yclients REST API.
//!
//! Covers login, companies, the client database and records, with the same
//! `Authorization: Bearer <partner>[, User <user>]` checks the real service
//! applies. Errors use the service's `{"errors": {"code", "message"}}` shape.

use std::{
    collections::{BTreeMap, HashMap, HashSet},
    sync::Arc,
};

use axum::{
    extract::{Path, Query, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

pub const PARTNER_TOKEN: &str = "test-partner-token";
pub const LOGIN: &str = "admin@example.com";
pub const PASSWORD: &str = "secret";

#[derive(Debug, Clone)]
pub struct MockConfig {
    pub partner_token: String,
    pub login: String,
    pub password: String,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            partner_token: PARTNER_TOKEN.to_string(),
            login: LOGIN.to_string(),
            password: PASSWORD.to_string(),
        }
    }
}

#[derive(Default)]
struct Store {
    user_tokens: HashSet<String>,
    companies: BTreeMap<u64, Map<String, Value>>,
    /// company id -> client id -> client
    clients: HashMap<u64, BTreeMap<u64, Map<String, Value>>>,
    /// company id -> record id -> record
    records: HashMap<u64, BTreeMap<u64, Map<String, Value>>>,
    next_id: u64,
}

impl Store {
    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

struct AppState {
    config: MockConfig,
    store: RwLock<Store>,
}

type Shared = Arc<AppState>;

pub fn app() -> Router {
    app_with(MockConfig::default())
}

pub fn app_with(config: MockConfig) -> Router {
    let state: Shared = Arc::new(AppState {
        config,
        store: RwLock::new(Store::default()),
    });
    let api = Router::new()
        .route("/auth", post(auth))
        .route("/companies", get(list_companies).post(create_company))
        .route(
            "/company/{id}",
            get(get_company).put(update_company).delete(delete_company),
        )
        .route("/clients/{company_id}", get(list_clients).post(create_client))
        .route(
            "/client/{company_id}/{id}",
            get(get_client).put(update_client).delete(delete_client),
        )
        .route("/records/{company_id}", get(list_records).post(create_record))
        .route(
            "/record/{company_id}/{id}",
            get(get_record).put(update_record).delete(delete_record),
        );
    Router::new().nest("/api/v1", api).with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

pub async fn run_with(listener: TcpListener, config: MockConfig) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(config)).await
}

// ---------------------------------------------------------------------------
// Errors and authorization
// ---------------------------------------------------------------------------

#[derive(Debug)]
struct ApiFailure {
    status: StatusCode,
    message: String,
}

impl ApiFailure {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    fn unauthorized() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "Unauthorized")
    }

    fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, "Not found")
    }

    fn unprocessable(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, message)
    }
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        let body = json!({
            "errors": {"code": self.status.as_u16(), "message": self.message}
        });
        (self.status, Json(body)).into_response()
    }
}

/// Parsed `Authorization` header.
#[derive(Debug, PartialEq, Eq)]
pub struct Credentials {
    pub partner: String,
    pub user: Option<String>,
}

/// Parse `Bearer <partner>` or `Bearer <partner>, User <user>`.
pub fn parse_authorization(header: &str) -> Option<Credentials> {
    let rest = header.trim().strip_prefix("Bearer ")?;
    let (partner, user) = match rest.split_once(',') {
        Some((partner, user)) => {
            let user = user.trim().strip_prefix("User ")?.trim();
            (partner.trim(), Some(user.to_string()))
        }
        None => (rest.trim(), None),
    };
    if partner.is_empty() {
        return None;
    }
    Some(Credentials {
        partner: partner.to_string(),
        user,
    })
}

fn require_partner(state: &AppState, headers: &HeaderMap) -> Result<Credentials, ApiFailure> {
    let credentials = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(parse_authorization)
        .ok_or_else(ApiFailure::unauthorized)?;
    if credentials.partner != state.config.partner_token {
        return Err(ApiFailure::unauthorized());
    }
    Ok(credentials)
}

async fn require_user(state: &AppState, headers: &HeaderMap) -> Result<String, ApiFailure> {
    let credentials = require_partner(state, headers)?;
    let user = credentials.user.ok_or_else(ApiFailure::unauthorized)?;
    if !state.store.read().await.user_tokens.contains(&user) {
        return Err(ApiFailure::unauthorized());
    }
    Ok(user)
}

fn object(body: Value) -> Result<Map<String, Value>, ApiFailure> {
    match body {
        Value::Object(map) => Ok(map),
        _ => Err(ApiFailure::unprocessable("expected a JSON object")),
    }
}

fn require_keys(body: &Map<String, Value>, keys: &[&str]) -> Result<(), ApiFailure> {
    match keys.iter().find(|key| body.get(**key).map_or(true, Value::is_null)) {
        Some(key) => Err(ApiFailure::unprocessable(format!("field {key} is required"))),
        None => Ok(()),
    }
}

fn is_truthy(value: Option<&String>) -> bool {
    matches!(value.map(String::as_str), Some("1") | Some("true"))
}

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct Login {
    login: String,
    password: String,
}

async fn auth(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(input): Json<Login>,
) -> Result<(StatusCode, Json<Value>), ApiFailure> {
    require_partner(&state, &headers)?;
    if input.login != state.config.login || input.password != state.config.password {
        return Err(ApiFailure::unauthorized());
    }
    let token = Uuid::new_v4().simple().to_string();
    state.store.write().await.user_tokens.insert(token.clone());
    Ok((StatusCode::CREATED, Json(json!({"user_token": token}))))
}

// ---------------------------------------------------------------------------
// Companies
// ---------------------------------------------------------------------------

async fn list_companies(
    State(state): State<Shared>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Json<Value>, ApiFailure> {
    if is_truthy(query.get("my")) {
        require_user(&state, &headers).await?;
    } else {
        require_partner(&state, &headers)?;
    }
    let store = state.store.read().await;
    let companies = store
        .companies
        .values()
        .filter(|company| match query.get("group_id") {
            Some(group) => company.get("group_id").map(|g| g.to_string()) == Some(group.clone()),
            None => true,
        })
        .cloned()
        .map(Value::Object)
        .collect();
    Ok(Json(Value::Array(companies)))
}

async fn create_company(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Value>), ApiFailure> {
    require_user(&state, &headers).await?;
    let mut company = object(body)?;
    require_keys(&company, &["title"])?;
    let mut store = state.store.write().await;
    let id = store.next_id();
    company.insert("id".to_string(), json!(id));
    store.companies.insert(id, company.clone());
    Ok((StatusCode::CREATED, Json(Value::Object(company))))
}

async fn get_company(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<u64>,
) -> Result<Json<Value>, ApiFailure> {
    require_partner(&state, &headers)?;
    let store = state.store.read().await;
    let company = store.companies.get(&id).ok_or_else(ApiFailure::not_found)?;
    Ok(Json(Value::Object(company.clone())))
}

async fn update_company(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<u64>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiFailure> {
    require_user(&state, &headers).await?;
    let fields = object(body)?;
    let mut store = state.store.write().await;
    let company = store.companies.get_mut(&id).ok_or_else(ApiFailure::not_found)?;
    for (key, value) in fields {
        if key != "id" {
            company.insert(key, value);
        }
    }
    Ok(Json(Value::Object(company.clone())))
}

async fn delete_company(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<u64>,
) -> Result<StatusCode, ApiFailure> {
    require_partner(&state, &headers)?;
    let mut store = state.store.write().await;
    store.companies.remove(&id).ok_or_else(ApiFailure::not_found)?;
    store.clients.remove(&id);
    store.records.remove(&id);
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Clients
// ---------------------------------------------------------------------------

async fn list_clients(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(company_id): Path<u64>,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Json<Value>, ApiFailure> {
    require_user(&state, &headers).await?;
    let store = state.store.read().await;
    if !store.companies.contains_key(&company_id) {
        return Err(ApiFailure::not_found());
    }
    let field_contains = |client: &Map<String, Value>, param: &str, field: &str| match query.get(param) {
        Some(needle) => client
            .get(field)
            .and_then(Value::as_str)
            .is_some_and(|v| v.contains(needle.as_str())),
        None => true,
    };
    let clients = store
        .clients
        .get(&company_id)
        .into_iter()
        .flat_map(|clients| clients.values())
        .filter(|client| {
            field_contains(client, "fullname", "name")
                && field_contains(client, "phone", "phone")
                && field_contains(client, "email", "email")
        })
        .cloned()
        .map(Value::Object)
        .collect();
    Ok(Json(Value::Array(clients)))
}

async fn create_client(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(company_id): Path<u64>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Value>), ApiFailure> {
    require_user(&state, &headers).await?;
    let mut client = object(body)?;
    require_keys(&client, &["name", "phone"])?;
    let mut store = state.store.write().await;
    if !store.companies.contains_key(&company_id) {
        return Err(ApiFailure::not_found());
    }
    let id = store.next_id();
    client.insert("id".to_string(), json!(id));
    store
        .clients
        .entry(company_id)
        .or_default()
        .insert(id, client.clone());
    Ok((StatusCode::CREATED, Json(Value::Object(client))))
}

async fn get_client(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path((company_id, id)): Path<(u64, u64)>,
) -> Result<Json<Value>, ApiFailure> {
    require_user(&state, &headers).await?;
    let store = state.store.read().await;
    let client = store
        .clients
        .get(&company_id)
        .and_then(|clients| clients.get(&id))
        .ok_or_else(ApiFailure::not_found)?;
    Ok(Json(Value::Object(client.clone())))
}

async fn update_client(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path((company_id, id)): Path<(u64, u64)>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiFailure> {
    require_user(&state, &headers).await?;
    let fields = object(body)?;
    let mut store = state.store.write().await;
    let client = store
        .clients
        .get_mut(&company_id)
        .and_then(|clients| clients.get_mut(&id))
        .ok_or_else(ApiFailure::not_found)?;
    for (key, value) in fields {
        if key != "id" {
            client.insert(key, value);
        }
    }
    Ok(Json(Value::Object(client.clone())))
}

async fn delete_client(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path((company_id, id)): Path<(u64, u64)>,
) -> Result<StatusCode, ApiFailure> {
    require_user(&state, &headers).await?;
    let mut store = state.store.write().await;
    store
        .clients
        .get_mut(&company_id)
        .and_then(|clients| clients.remove(&id))
        .ok_or_else(ApiFailure::not_found)?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

const RECORD_FIELDS: [&str; 5] = ["staff_id", "services", "client", "datetime", "seance_length"];

async fn list_records(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(company_id): Path<u64>,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Json<Value>, ApiFailure> {
    require_user(&state, &headers).await?;
    let store = state.store.read().await;
    if !store.companies.contains_key(&company_id) {
        return Err(ApiFailure::not_found());
    }
    let id_matches = |record: &Map<String, Value>, param: &str| match query.get(param) {
        Some(wanted) => record.get(param).map(|v| v.to_string()).as_ref() == Some(wanted),
        None => true,
    };
    let records = store
        .records
        .get(&company_id)
        .into_iter()
        .flat_map(|records| records.values())
        .filter(|record| id_matches(record, "staff_id"))
        .cloned()
        .map(Value::Object)
        .collect();
    Ok(Json(Value::Array(records)))
}

async fn create_record(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(company_id): Path<u64>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Value>), ApiFailure> {
    require_user(&state, &headers).await?;
    let mut record = object(body)?;
    require_keys(&record, &RECORD_FIELDS)?;
    if record.get("services").and_then(Value::as_array).is_some_and(Vec::is_empty) {
        return Err(ApiFailure::unprocessable("Service list is empty"));
    }
    let mut store = state.store.write().await;
    if !store.companies.contains_key(&company_id) {
        return Err(ApiFailure::not_found());
    }
    let id = store.next_id();
    record.insert("id".to_string(), json!(id));
    record.insert("company_id".to_string(), json!(company_id));
    store
        .records
        .entry(company_id)
        .or_default()
        .insert(id, record.clone());
    Ok((StatusCode::CREATED, Json(Value::Object(record))))
}

async fn get_record(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path((company_id, id)): Path<(u64, u64)>,
) -> Result<Json<Value>, ApiFailure> {
    require_user(&state, &headers).await?;
    let store = state.store.read().await;
    let record = store
        .records
        .get(&company_id)
        .and_then(|records| records.get(&id))
        .ok_or_else(ApiFailure::not_found)?;
    Ok(Json(Value::Object(record.clone())))
}

async fn update_record(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path((company_id, id)): Path<(u64, u64)>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiFailure> {
    require_user(&state, &headers).await?;
    let fields = object(body)?;
    let mut store = state.store.write().await;
    let record = store
        .records
        .get_mut(&company_id)
        .and_then(|records| records.get_mut(&id))
        .ok_or_else(ApiFailure::not_found)?;
    for (key, value) in fields {
        if key != "id" && key != "company_id" {
            record.insert(key, value);
        }
    }
    Ok(Json(Value::Object(record.clone())))
}

async fn delete_record(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path((company_id, id)): Path<(u64, u64)>,
) -> Result<StatusCode, ApiFailure> {
    require_user(&state, &headers).await?;
    let mut store = state.store.write().await;
    store
        .records
        .get_mut(&company_id)
        .and_then(|records| records.remove(&id))
        .ok_or_else(ApiFailure::not_found)?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_partner_only_header() {
        let creds = parse_authorization("Bearer abc").unwrap();
        assert_eq!(creds.partner, "abc");
        assert!(creds.user.is_none());
    }

    #[test]
    fn parses_partner_and_user_header() {
        let creds = parse_authorization("Bearer abc, User xyz").unwrap();
        assert_eq!(
            creds,
            Credentials {
                partner: "abc".to_string(),
                user: Some("xyz".to_string()),
            }
        );
    }

    #[test]
    fn rejects_malformed_headers() {
        assert!(parse_authorization("Basic abc").is_none());
        assert!(parse_authorization("Bearer ").is_none());
        assert!(parse_authorization("Bearer abc, Token xyz").is_none());
    }

    #[test]
    fn truthy_query_values() {
        assert!(is_truthy(Some(&"1".to_string())));
        assert!(is_truthy(Some(&"true".to_string())));
        assert!(!is_truthy(Some(&"0".to_string())));
        assert!(!is_truthy(None));
    }

    #[test]
    fn required_keys_reject_null() {
        let body = json!({"name": "Ann", "phone": null}).as_object().cloned().unwrap();
        assert!(require_keys(&body, &["name"]).is_ok());
        assert!(require_keys(&body, &["name", "phone"]).is_err());
    }
}
