//! Companies and per-company back-office listings (users, cash accounts,
//! storages).

use serde_json::Value;
use tracing::warn;

use crate::api::Yclients;
use crate::client::{Auth, YclientsClient};
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest};
use crate::params::Params;
use crate::transport::Transport;
use crate::types::{require_fields, CompaniesFilter, Fields};

impl YclientsClient {
    /// List companies. `filter.my` restricts the list to companies the user
    /// manages and only works with a user token.
    pub fn build_get_companies(
        &self,
        filter: &CompaniesFilter,
        user_token: Option<&str>,
    ) -> Result<HttpRequest, ApiError> {
        if filter.my == Some(true) && user_token.is_none() {
            warn!("listing \"my\" companies needs a user token");
        }
        let params = Params::new()
            .opt("group_id", filter.group_id)
            .opt("active", filter.active)
            .opt("moderated", filter.moderated)
            .opt("forBooking", filter.for_booking)
            .opt("my", filter.my);
        self.request(HttpMethod::Get, "companies", params, Auth::user_or_partner(user_token))
    }

    /// Create a company. `fields` must contain `title`.
    pub fn build_post_company(&self, fields: &Fields, user_token: &str) -> Result<HttpRequest, ApiError> {
        require_fields(fields, &["title"], "company")?;
        self.request(
            HttpMethod::Post,
            "companies",
            Params::new().extend(fields),
            Auth::User(user_token),
        )
    }

    pub fn build_get_company(&self, id: u64) -> Result<HttpRequest, ApiError> {
        self.request(HttpMethod::Get, &format!("company/{id}"), Params::new(), Auth::Partner)
    }

    pub fn build_put_company(&self, id: u64, fields: &Fields, user_token: &str) -> Result<HttpRequest, ApiError> {
        self.request(
            HttpMethod::Put,
            &format!("company/{id}"),
            Params::new().extend(fields),
            Auth::User(user_token),
        )
    }

    pub fn build_delete_company(&self, id: u64) -> Result<HttpRequest, ApiError> {
        self.request(HttpMethod::Delete, &format!("company/{id}"), Params::new(), Auth::Partner)
    }

    pub fn build_get_company_users(&self, company_id: u64, user_token: &str) -> Result<HttpRequest, ApiError> {
        self.request(
            HttpMethod::Get,
            &format!("company_users/{company_id}"),
            Params::new(),
            Auth::User(user_token),
        )
    }

    pub fn build_get_accounts(&self, company_id: u64, user_token: &str) -> Result<HttpRequest, ApiError> {
        self.request(
            HttpMethod::Get,
            &format!("accounts/{company_id}"),
            Params::new(),
            Auth::User(user_token),
        )
    }

    pub fn build_get_storages(&self, company_id: u64, user_token: &str) -> Result<HttpRequest, ApiError> {
        self.request(
            HttpMethod::Get,
            &format!("storages/{company_id}"),
            Params::new(),
            Auth::User(user_token),
        )
    }
}

impl<T: Transport> Yclients<T> {
    pub fn get_companies(&self, filter: &CompaniesFilter, user_token: Option<&str>) -> Result<Value, ApiError> {
        self.send(self.client().build_get_companies(filter, user_token)?)
    }

    pub fn post_company(&self, fields: &Fields, user_token: &str) -> Result<Value, ApiError> {
        self.send(self.client().build_post_company(fields, user_token)?)
    }

    pub fn get_company(&self, id: u64) -> Result<Value, ApiError> {
        self.send(self.client().build_get_company(id)?)
    }

    pub fn put_company(&self, id: u64, fields: &Fields, user_token: &str) -> Result<Value, ApiError> {
        self.send(self.client().build_put_company(id, fields, user_token)?)
    }

    pub fn delete_company(&self, id: u64) -> Result<Value, ApiError> {
        self.send(self.client().build_delete_company(id)?)
    }

    pub fn get_company_users(&self, company_id: u64, user_token: &str) -> Result<Value, ApiError> {
        self.send(self.client().build_get_company_users(company_id, user_token)?)
    }

    pub fn get_accounts(&self, company_id: u64, user_token: &str) -> Result<Value, ApiError> {
        self.send(self.client().build_get_accounts(company_id, user_token)?)
    }

    pub fn get_storages(&self, company_id: u64, user_token: &str) -> Result<Value, ApiError> {
        self.send(self.client().build_get_storages(company_id, user_token)?)
    }
}
