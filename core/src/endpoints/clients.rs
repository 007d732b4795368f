//! Client database and client reviews.

use serde_json::Value;

use crate::api::Yclients;
use crate::client::{Auth, YclientsClient};
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest};
use crate::params::{format_date, Params};
use crate::transport::Transport;
use crate::types::{ClientsFilter, CommentsFilter, Fields};

impl YclientsClient {
    pub fn build_get_clients(
        &self,
        company_id: u64,
        user_token: &str,
        filter: &ClientsFilter,
    ) -> Result<HttpRequest, ApiError> {
        let params = Params::new()
            .opt("fullname", filter.fullname.as_deref())
            .opt("phone", filter.phone.as_deref())
            .opt("email", filter.email.as_deref())
            .opt("page", filter.page)
            .opt("count", filter.count);
        self.request(
            HttpMethod::Get,
            &format!("clients/{company_id}"),
            params,
            Auth::User(user_token),
        )
    }

    pub fn build_post_clients(
        &self,
        company_id: u64,
        name: &str,
        phone: &str,
        user_token: &str,
        fields: &Fields,
    ) -> Result<HttpRequest, ApiError> {
        let params = Params::new().set("name", name).set("phone", phone).extend(fields);
        self.request(
            HttpMethod::Post,
            &format!("clients/{company_id}"),
            params,
            Auth::User(user_token),
        )
    }

    pub fn build_get_client(&self, company_id: u64, id: u64, user_token: &str) -> Result<HttpRequest, ApiError> {
        self.request(
            HttpMethod::Get,
            &format!("client/{company_id}/{id}"),
            Params::new(),
            Auth::User(user_token),
        )
    }

    pub fn build_put_client(
        &self,
        company_id: u64,
        id: u64,
        user_token: &str,
        fields: &Fields,
    ) -> Result<HttpRequest, ApiError> {
        self.request(
            HttpMethod::Put,
            &format!("client/{company_id}/{id}"),
            Params::new().extend(fields),
            Auth::User(user_token),
        )
    }

    pub fn build_delete_client(&self, company_id: u64, id: u64, user_token: &str) -> Result<HttpRequest, ApiError> {
        self.request(
            HttpMethod::Delete,
            &format!("client/{company_id}/{id}"),
            Params::new(),
            Auth::User(user_token),
        )
    }

    pub fn build_get_comments(
        &self,
        company_id: u64,
        user_token: &str,
        filter: &CommentsFilter,
    ) -> Result<HttpRequest, ApiError> {
        let params = Params::new()
            .opt("start_date", filter.start_date.as_ref().map(format_date))
            .opt("end_date", filter.end_date.as_ref().map(format_date))
            .opt("staff_id", filter.staff_id)
            .opt("rating", filter.rating);
        self.request(
            HttpMethod::Get,
            &format!("comments/{company_id}"),
            params,
            Auth::User(user_token),
        )
    }
}

impl<T: Transport> Yclients<T> {
    pub fn get_clients(&self, company_id: u64, user_token: &str, filter: &ClientsFilter) -> Result<Value, ApiError> {
        self.send(self.client().build_get_clients(company_id, user_token, filter)?)
    }

    pub fn post_clients(
        &self,
        company_id: u64,
        name: &str,
        phone: &str,
        user_token: &str,
        fields: &Fields,
    ) -> Result<Value, ApiError> {
        self.send(
            self.client()
                .build_post_clients(company_id, name, phone, user_token, fields)?,
        )
    }

    pub fn get_client(&self, company_id: u64, id: u64, user_token: &str) -> Result<Value, ApiError> {
        self.send(self.client().build_get_client(company_id, id, user_token)?)
    }

    pub fn put_client(&self, company_id: u64, id: u64, user_token: &str, fields: &Fields) -> Result<Value, ApiError> {
        self.send(self.client().build_put_client(company_id, id, user_token, fields)?)
    }

    pub fn delete_client(&self, company_id: u64, id: u64, user_token: &str) -> Result<Value, ApiError> {
        self.send(self.client().build_delete_client(company_id, id, user_token)?)
    }

    pub fn get_comments(&self, company_id: u64, user_token: &str, filter: &CommentsFilter) -> Result<Value, ApiError> {
        self.send(self.client().build_get_comments(company_id, user_token, filter)?)
    }
}
