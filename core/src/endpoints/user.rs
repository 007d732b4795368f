//! User authentication and the end user's own bookings.

use serde_json::Value;
use tracing::warn;

use crate::api::Yclients;
use crate::client::{checked_segment, segment, Auth, YclientsClient};
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest};
use crate::params::Params;
use crate::transport::Transport;

impl YclientsClient {
    /// Exchange a login and password for a user token.
    pub fn build_auth(&self, login: &str, password: &str) -> Result<HttpRequest, ApiError> {
        let params = Params::new().set("login", login).set("password", password);
        self.request(HttpMethod::Post, "auth", params, Auth::Partner)
    }

    /// Exchange a phone number and the SMS code sent to it for a user token.
    pub fn build_post_user_auth(&self, phone: &str, code: &str) -> Result<HttpRequest, ApiError> {
        let params = Params::new().set("phone", phone).set("code", code);
        self.request(HttpMethod::Post, "user/auth", params, Auth::Partner)
    }

    /// A booking made by the user. Anonymous callers need the record hash
    /// from the booking response; authorized callers pass a user token.
    pub fn build_get_user_records(
        &self,
        record_id: u64,
        record_hash: Option<&str>,
        user_token: Option<&str>,
    ) -> Result<HttpRequest, ApiError> {
        warn_without_credentials("get_user_records", record_hash, user_token);
        self.request(
            HttpMethod::Get,
            &user_records_path(record_id, record_hash)?,
            Params::new(),
            Auth::user_or_partner(user_token),
        )
    }

    pub fn build_delete_user_records(
        &self,
        record_id: u64,
        record_hash: Option<&str>,
        user_token: Option<&str>,
    ) -> Result<HttpRequest, ApiError> {
        warn_without_credentials("delete_user_records", record_hash, user_token);
        self.request(
            HttpMethod::Delete,
            &user_records_path(record_id, record_hash)?,
            Params::new(),
            Auth::user_or_partner(user_token),
        )
    }
}

fn user_records_path(record_id: u64, record_hash: Option<&str>) -> Result<String, ApiError> {
    let record_hash = record_hash
        .map(|hash| checked_segment("record hash", hash))
        .transpose()?;
    Ok(format!("user/records/{record_id}/{}", segment(record_hash)))
}

// The API rejects these calls, but the request is still sent so the caller
// sees the service's own error.
fn warn_without_credentials(operation: &str, record_hash: Option<&str>, user_token: Option<&str>) {
    if record_hash.is_none() && user_token.is_none() {
        warn!(operation, "user records need either a record hash or a user token");
    }
}

impl<T: Transport> Yclients<T> {
    pub fn auth(&self, login: &str, password: &str) -> Result<Value, ApiError> {
        self.send(self.client().build_auth(login, password)?)
    }

    pub fn post_user_auth(&self, phone: &str, code: &str) -> Result<Value, ApiError> {
        self.send(self.client().build_post_user_auth(phone, code)?)
    }

    pub fn get_user_records(
        &self,
        record_id: u64,
        record_hash: Option<&str>,
        user_token: Option<&str>,
    ) -> Result<Value, ApiError> {
        self.send(
            self.client()
                .build_get_user_records(record_id, record_hash, user_token)?,
        )
    }

    pub fn delete_user_records(
        &self,
        record_id: u64,
        record_hash: Option<&str>,
        user_token: Option<&str>,
    ) -> Result<Value, ApiError> {
        self.send(
            self.client()
                .build_delete_user_records(record_id, record_hash, user_token)?,
        )
    }
}
