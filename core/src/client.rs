//! Stateless HTTP request builder and response parser for the Yclients API.
//!
//! # Design
//! `YclientsClient` holds the base URL and the partner token and carries no
//! other state between calls. Every endpoint has a `build_*` method (see
//! `endpoints/`) that funnels into the single private `request` routine:
//! it checks authorization, encodes parameters and produces an
//! `HttpRequest`. `parse_response` is shared by all endpoints since every
//! response is JSON. The caller executes the HTTP round-trip in between,
//! directly or through `Yclients`.

use std::fmt;

use serde_json::Value;
use tracing::debug;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::params::{encode_query, is_empty};

pub const DEFAULT_BASE_URL: &str = "https://api.yclients.com/api/v1";

/// Authorization level an endpoint needs.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Auth<'a> {
    /// `Bearer <partner>`
    Partner,
    /// `Bearer <partner>, User <user>`
    User(&'a str),
}

impl<'a> Auth<'a> {
    /// User auth when a token is given, partner auth otherwise.
    pub fn user_or_partner(user_token: Option<&'a str>) -> Self {
        user_token.map_or(Auth::Partner, Auth::User)
    }

    fn kind(self) -> &'static str {
        match self {
            Auth::Partner => "partner",
            Auth::User(_) => "user",
        }
    }
}

impl fmt::Debug for Auth<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind())
    }
}

/// Synchronous, stateless request builder for the Yclients API.
#[derive(Clone)]
pub struct YclientsClient {
    base_url: String,
    partner_token: Option<String>,
}

impl YclientsClient {
    pub fn new(partner_token: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            partner_token: Some(partner_token.into()),
        }
    }

    /// A client with no partner token yet. Every endpoint fails with
    /// `MissingPartnerToken` until one is set.
    pub fn without_partner_token() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            partner_token: None,
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_partner_token(mut self, partner_token: impl Into<String>) -> Self {
        self.partner_token = Some(partner_token.into());
        self
    }

    pub fn set_partner_token(&mut self, partner_token: impl Into<String>) -> &mut Self {
        self.partner_token = Some(partner_token.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn has_partner_token(&self) -> bool {
        self.partner_token.is_some()
    }

    /// Assemble a request. GET parameters go into the query string, other
    /// methods send them as a JSON body. Empty parameters produce neither.
    pub(crate) fn request(
        &self,
        method: HttpMethod,
        path: &str,
        params: impl Into<Value>,
        auth: Auth<'_>,
    ) -> Result<HttpRequest, ApiError> {
        let authorization = self.authorization(auth)?;
        let params: Value = params.into();

        let mut url = format!("{}/{path}", self.base_url);
        let mut body = None;
        match (method, params) {
            (HttpMethod::Get, Value::Object(map)) => {
                let query = encode_query(&map);
                if !query.is_empty() {
                    url.push('?');
                    url.push_str(&query);
                }
            }
            (HttpMethod::Get, _) => {}
            (_, payload) if !is_empty(&payload) => {
                let json = serde_json::to_string(&payload)
                    .map_err(|e| ApiError::SerializationError(e.to_string()))?;
                body = Some(json);
            }
            _ => {}
        }

        debug!(%method, path, ?auth, has_body = body.is_some(), "prepared Yclients request");

        Ok(HttpRequest {
            method,
            url,
            headers: vec![
                ("content-type".to_string(), "application/json".to_string()),
                ("authorization".to_string(), authorization),
            ],
            body,
        })
    }

    fn authorization(&self, auth: Auth<'_>) -> Result<String, ApiError> {
        let partner = self
            .partner_token
            .as_deref()
            .ok_or(ApiError::MissingPartnerToken)?;
        Ok(match auth {
            Auth::Partner => format!("Bearer {partner}"),
            Auth::User(user) => format!("Bearer {partner}, User {user}"),
        })
    }

    /// Decode any endpoint's response.
    ///
    /// A 2xx response yields its JSON body, or `Value::Null` when the body is
    /// empty. Anything else becomes `ApiError::HttpError`.
    pub fn parse_response(&self, response: HttpResponse) -> Result<Value, ApiError> {
        check_status(&response)?;
        if response.body.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
    }
}

impl fmt::Debug for YclientsClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("YclientsClient")
            .field("base_url", &self.base_url)
            .field("partner_token", &self.partner_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Map non-success status codes to `ApiError::HttpError`.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}

/// Accept a caller-supplied path segment only when it consists of unreserved
/// URL characters, so it cannot change which resource is addressed.
pub(crate) fn checked_segment<'a>(what: &str, value: &'a str) -> Result<&'a str, ApiError> {
    let unreserved = |c: char| c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_' | '~');
    if value.is_empty() || value == "." || value == ".." || !value.chars().all(unreserved) {
        return Err(ApiError::validation(format!(
            "{what} is not a valid path segment: {value:?}"
        )));
    }
    Ok(value)
}

/// Render an optional trailing path segment. An absent id leaves the
/// trailing slash in place, which the API treats as "list all".
pub(crate) fn segment<T: fmt::Display>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::Params;
    use serde_json::json;

    fn client() -> YclientsClient {
        YclientsClient::new("partner-token").with_base_url("http://localhost:3000/api/v1")
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    #[test]
    fn default_base_url_points_at_v1() {
        let client = YclientsClient::new("t");
        assert_eq!(client.base_url(), "https://api.yclients.com/api/v1");
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = YclientsClient::new("t").with_base_url("http://localhost:3000/api/v1/");
        let req = client
            .request(HttpMethod::Get, "companies", Params::new(), Auth::Partner)
            .unwrap();
        assert_eq!(req.url, "http://localhost:3000/api/v1/companies");
    }

    #[test]
    fn partner_auth_header() {
        let req = client()
            .request(HttpMethod::Get, "company/1", Params::new(), Auth::Partner)
            .unwrap();
        assert_eq!(req.header("Authorization"), Some("Bearer partner-token"));
        assert_eq!(req.header("content-type"), Some("application/json"));
    }

    #[test]
    fn user_auth_header_combines_tokens() {
        let req = client()
            .request(HttpMethod::Get, "clients/1", Params::new(), Auth::User("user-token"))
            .unwrap();
        assert_eq!(req.header("authorization"), Some("Bearer partner-token, User user-token"));
    }

    #[test]
    fn missing_partner_token_is_rejected() {
        let client = YclientsClient::without_partner_token();
        assert!(!client.has_partner_token());
        let err = client
            .request(HttpMethod::Get, "company/1", Params::new(), Auth::Partner)
            .unwrap_err();
        assert!(matches!(err, ApiError::MissingPartnerToken));
    }

    #[test]
    fn partner_token_can_be_set_later() {
        let mut client = YclientsClient::without_partner_token();
        client.set_partner_token("late");
        let req = client
            .request(HttpMethod::Get, "company/1", Params::new(), Auth::Partner)
            .unwrap();
        assert_eq!(req.header("authorization"), Some("Bearer late"));
    }

    #[test]
    fn get_params_become_query() {
        let params = Params::new().set("staff_id", 5u64).set("my", true);
        let req = client()
            .request(HttpMethod::Get, "companies", params, Auth::Partner)
            .unwrap();
        assert_eq!(req.url, "http://localhost:3000/api/v1/companies?staff_id=5&my=1");
        assert!(req.body.is_none());
    }

    #[test]
    fn post_params_become_json_body() {
        let params = Params::new().set("login", "me").set("password", "secret");
        let req = client()
            .request(HttpMethod::Post, "auth", params, Auth::Partner)
            .unwrap();
        assert_eq!(req.url, "http://localhost:3000/api/v1/auth");
        let body: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, json!({"login": "me", "password": "secret"}));
    }

    #[test]
    fn empty_params_send_no_body() {
        let req = client()
            .request(HttpMethod::Delete, "company/1", Params::new(), Auth::Partner)
            .unwrap();
        assert!(req.body.is_none());
        assert_eq!(req.url, "http://localhost:3000/api/v1/company/1");
    }

    #[test]
    fn debug_redacts_partner_token() {
        let rendered = format!("{:?}", client());
        assert!(!rendered.contains("partner-token"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn parse_success_returns_json() {
        let value = client()
            .parse_response(response(200, r#"{"user_token":"abc"}"#))
            .unwrap();
        assert_eq!(value["user_token"], "abc");
    }

    #[test]
    fn parse_empty_body_is_null() {
        let value = client().parse_response(response(204, "")).unwrap();
        assert!(value.is_null());
    }

    #[test]
    fn parse_error_status_keeps_body() {
        let err = client()
            .parse_response(response(404, r#"{"errors":{"code":404,"message":"Not found"}}"#))
            .unwrap_err();
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.json_body().unwrap()["errors"]["code"], 404);
    }

    #[test]
    fn parse_bad_json() {
        let err = client().parse_response(response(200, "not json")).unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }

    #[test]
    fn checked_segment_accepts_unreserved_characters() {
        assert_eq!(checked_segment("locale", "ru-RU").unwrap(), "ru-RU");
        assert_eq!(checked_segment("hash", "567df655_a.b~c").unwrap(), "567df655_a.b~c");
    }

    #[test]
    fn checked_segment_rejects_path_and_query_characters() {
        for value in ["", ".", "..", "a/b", "a?x=1", "a#frag", "a b", "a%2F", "ru\nRU"] {
            let err = checked_segment("hash", value).unwrap_err();
            assert!(matches!(err, ApiError::Validation(_)), "{value:?}");
        }
    }

    #[test]
    fn segment_renders_absent_as_empty() {
        assert_eq!(segment(Some(42u64)), "42");
        assert_eq!(segment::<u64>(None), "");
    }
}
