//! Service categories, services and promotional events.

use serde_json::Value;

use crate::api::Yclients;
use crate::client::{segment, Auth, YclientsClient};
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest};
use crate::params::Params;
use crate::transport::Transport;
use crate::types::Fields;

impl YclientsClient {
    pub fn build_get_service_categories(
        &self,
        company_id: u64,
        category_id: u64,
        staff_id: Option<u64>,
    ) -> Result<HttpRequest, ApiError> {
        self.request(
            HttpMethod::Get,
            &format!("service_categories/{company_id}/{category_id}"),
            Params::new().opt("staff_id", staff_id),
            Auth::Partner,
        )
    }

    /// `fields` usually carries `title`, `api_id`, `weight` and `staff`.
    pub fn build_post_service_categories(
        &self,
        company_id: u64,
        category_id: u64,
        fields: &Fields,
        user_token: &str,
    ) -> Result<HttpRequest, ApiError> {
        self.request(
            HttpMethod::Post,
            &format!("service_categories/{company_id}/{category_id}"),
            Params::new().extend(fields),
            Auth::User(user_token),
        )
    }

    pub fn build_get_service_category(&self, company_id: u64, category_id: u64) -> Result<HttpRequest, ApiError> {
        self.request(
            HttpMethod::Get,
            &format!("service_category/{company_id}/{category_id}"),
            Params::new(),
            Auth::Partner,
        )
    }

    pub fn build_put_service_category(
        &self,
        company_id: u64,
        category_id: u64,
        fields: &Fields,
        user_token: &str,
    ) -> Result<HttpRequest, ApiError> {
        self.request(
            HttpMethod::Put,
            &format!("service_category/{company_id}/{category_id}"),
            Params::new().extend(fields),
            Auth::User(user_token),
        )
    }

    pub fn build_delete_service_category(
        &self,
        company_id: u64,
        category_id: u64,
        user_token: &str,
    ) -> Result<HttpRequest, ApiError> {
        self.request(
            HttpMethod::Delete,
            &format!("service_category/{company_id}/{category_id}"),
            Params::new(),
            Auth::User(user_token),
        )
    }

    /// All services of a company, or one service when `service_id` is set.
    pub fn build_get_services(
        &self,
        company_id: u64,
        service_id: Option<u64>,
        staff_id: Option<u64>,
        category_id: Option<u64>,
    ) -> Result<HttpRequest, ApiError> {
        let params = Params::new()
            .opt("staff_id", staff_id)
            .opt("category_id", category_id);
        self.request(
            HttpMethod::Get,
            &format!("services/{company_id}/{}", segment(service_id)),
            params,
            Auth::Partner,
        )
    }

    /// Create a service. Entries in `fields` take precedence over
    /// `category_id` and `title`.
    pub fn build_post_services(
        &self,
        company_id: u64,
        service_id: u64,
        category_id: u64,
        title: &str,
        user_token: &str,
        fields: &Fields,
    ) -> Result<HttpRequest, ApiError> {
        self.request(
            HttpMethod::Post,
            &format!("services/{company_id}/{service_id}"),
            service_params(category_id, title, fields),
            Auth::User(user_token),
        )
    }

    pub fn build_put_services(
        &self,
        company_id: u64,
        service_id: u64,
        category_id: u64,
        title: &str,
        user_token: &str,
        fields: &Fields,
    ) -> Result<HttpRequest, ApiError> {
        self.request(
            HttpMethod::Put,
            &format!("services/{company_id}/{service_id}"),
            service_params(category_id, title, fields),
            Auth::User(user_token),
        )
    }

    pub fn build_delete_services(
        &self,
        company_id: u64,
        service_id: u64,
        user_token: &str,
    ) -> Result<HttpRequest, ApiError> {
        self.request(
            HttpMethod::Delete,
            &format!("services/{company_id}/{service_id}"),
            Params::new(),
            Auth::User(user_token),
        )
    }

    /// All events of a company, or one event when `event_id` is set.
    pub fn build_get_events(&self, company_id: u64, event_id: Option<u64>) -> Result<HttpRequest, ApiError> {
        self.request(
            HttpMethod::Get,
            &format!("events/{company_id}/{}", segment(event_id)),
            Params::new(),
            Auth::Partner,
        )
    }
}

fn service_params(category_id: u64, title: &str, fields: &Fields) -> Params {
    Params::new()
        .set("category_id", category_id)
        .set("title", title)
        .extend(fields)
}

impl<T: Transport> Yclients<T> {
    pub fn get_service_categories(
        &self,
        company_id: u64,
        category_id: u64,
        staff_id: Option<u64>,
    ) -> Result<Value, ApiError> {
        self.send(
            self.client()
                .build_get_service_categories(company_id, category_id, staff_id)?,
        )
    }

    pub fn post_service_categories(
        &self,
        company_id: u64,
        category_id: u64,
        fields: &Fields,
        user_token: &str,
    ) -> Result<Value, ApiError> {
        self.send(
            self.client()
                .build_post_service_categories(company_id, category_id, fields, user_token)?,
        )
    }

    pub fn get_service_category(&self, company_id: u64, category_id: u64) -> Result<Value, ApiError> {
        self.send(self.client().build_get_service_category(company_id, category_id)?)
    }

    pub fn put_service_category(
        &self,
        company_id: u64,
        category_id: u64,
        fields: &Fields,
        user_token: &str,
    ) -> Result<Value, ApiError> {
        self.send(
            self.client()
                .build_put_service_category(company_id, category_id, fields, user_token)?,
        )
    }

    pub fn delete_service_category(
        &self,
        company_id: u64,
        category_id: u64,
        user_token: &str,
    ) -> Result<Value, ApiError> {
        self.send(
            self.client()
                .build_delete_service_category(company_id, category_id, user_token)?,
        )
    }

    pub fn get_services(
        &self,
        company_id: u64,
        service_id: Option<u64>,
        staff_id: Option<u64>,
        category_id: Option<u64>,
    ) -> Result<Value, ApiError> {
        self.send(
            self.client()
                .build_get_services(company_id, service_id, staff_id, category_id)?,
        )
    }

    pub fn post_services(
        &self,
        company_id: u64,
        service_id: u64,
        category_id: u64,
        title: &str,
        user_token: &str,
        fields: &Fields,
    ) -> Result<Value, ApiError> {
        self.send(self.client().build_post_services(
            company_id,
            service_id,
            category_id,
            title,
            user_token,
            fields,
        )?)
    }

    pub fn put_services(
        &self,
        company_id: u64,
        service_id: u64,
        category_id: u64,
        title: &str,
        user_token: &str,
        fields: &Fields,
    ) -> Result<Value, ApiError> {
        self.send(self.client().build_put_services(
            company_id,
            service_id,
            category_id,
            title,
            user_token,
            fields,
        )?)
    }

    pub fn delete_services(&self, company_id: u64, service_id: u64, user_token: &str) -> Result<Value, ApiError> {
        self.send(
            self.client()
                .build_delete_services(company_id, service_id, user_token)?,
        )
    }

    pub fn get_events(&self, company_id: u64, event_id: Option<u64>) -> Result<Value, ApiError> {
        self.send(self.client().build_get_events(company_id, event_id)?)
    }
}
