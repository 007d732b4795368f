//! Staff members, their work schedule and the timetable journal.

use chrono::NaiveDate;
use serde_json::Value;

use crate::api::Yclients;
use crate::client::{segment, Auth, YclientsClient};
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest};
use crate::params::{format_date, Params};
use crate::transport::Transport;
use crate::types::Fields;

impl YclientsClient {
    /// All staff of a company, or one employee when `staff_id` is set.
    pub fn build_get_staff(&self, company_id: u64, staff_id: Option<u64>) -> Result<HttpRequest, ApiError> {
        self.request(
            HttpMethod::Get,
            &format!("staff/{company_id}/{}", segment(staff_id)),
            Params::new(),
            Auth::Partner,
        )
    }

    pub fn build_post_staff(
        &self,
        company_id: u64,
        staff_id: u64,
        name: &str,
        user_token: &str,
        fields: &Fields,
    ) -> Result<HttpRequest, ApiError> {
        self.request(
            HttpMethod::Post,
            &format!("staff/{company_id}/{staff_id}"),
            Params::new().set("name", name).extend(fields),
            Auth::User(user_token),
        )
    }

    pub fn build_put_staff(
        &self,
        company_id: u64,
        staff_id: u64,
        fields: &Fields,
        user_token: &str,
    ) -> Result<HttpRequest, ApiError> {
        self.request(
            HttpMethod::Put,
            &format!("staff/{company_id}/{staff_id}"),
            Params::new().extend(fields),
            Auth::User(user_token),
        )
    }

    pub fn build_delete_staff(&self, company_id: u64, staff_id: u64, user_token: &str) -> Result<HttpRequest, ApiError> {
        self.request(
            HttpMethod::Delete,
            &format!("staff/{company_id}/{staff_id}"),
            Params::new(),
            Auth::User(user_token),
        )
    }

    pub fn build_put_schedule(
        &self,
        company_id: u64,
        staff_id: u64,
        user_token: &str,
        fields: &Fields,
    ) -> Result<HttpRequest, ApiError> {
        self.request(
            HttpMethod::Put,
            &format!("schedule/{company_id}/{staff_id}"),
            Params::new().extend(fields),
            Auth::User(user_token),
        )
    }

    /// Working dates around `date`, optionally for one employee.
    pub fn build_get_timetable_dates(
        &self,
        company_id: u64,
        date: NaiveDate,
        staff_id: Option<u64>,
        user_token: &str,
    ) -> Result<HttpRequest, ApiError> {
        self.request(
            HttpMethod::Get,
            &format!("timetable/dates/{company_id}/{}", format_date(&date)),
            Params::new().opt("staff_id", staff_id),
            Auth::User(user_token),
        )
    }

    pub fn build_get_timetable_seances(
        &self,
        company_id: u64,
        date: NaiveDate,
        staff_id: u64,
        user_token: &str,
    ) -> Result<HttpRequest, ApiError> {
        self.request(
            HttpMethod::Get,
            &format!("timetable/seances/{company_id}/{staff_id}/{}", format_date(&date)),
            Params::new(),
            Auth::User(user_token),
        )
    }
}

impl<T: Transport> Yclients<T> {
    pub fn get_staff(&self, company_id: u64, staff_id: Option<u64>) -> Result<Value, ApiError> {
        self.send(self.client().build_get_staff(company_id, staff_id)?)
    }

    pub fn post_staff(
        &self,
        company_id: u64,
        staff_id: u64,
        name: &str,
        user_token: &str,
        fields: &Fields,
    ) -> Result<Value, ApiError> {
        self.send(
            self.client()
                .build_post_staff(company_id, staff_id, name, user_token, fields)?,
        )
    }

    pub fn put_staff(
        &self,
        company_id: u64,
        staff_id: u64,
        fields: &Fields,
        user_token: &str,
    ) -> Result<Value, ApiError> {
        self.send(
            self.client()
                .build_put_staff(company_id, staff_id, fields, user_token)?,
        )
    }

    pub fn delete_staff(&self, company_id: u64, staff_id: u64, user_token: &str) -> Result<Value, ApiError> {
        self.send(self.client().build_delete_staff(company_id, staff_id, user_token)?)
    }

    pub fn put_schedule(
        &self,
        company_id: u64,
        staff_id: u64,
        user_token: &str,
        fields: &Fields,
    ) -> Result<Value, ApiError> {
        self.send(
            self.client()
                .build_put_schedule(company_id, staff_id, user_token, fields)?,
        )
    }

    pub fn get_timetable_dates(
        &self,
        company_id: u64,
        date: NaiveDate,
        staff_id: Option<u64>,
        user_token: &str,
    ) -> Result<Value, ApiError> {
        self.send(
            self.client()
                .build_get_timetable_dates(company_id, date, staff_id, user_token)?,
        )
    }

    pub fn get_timetable_seances(
        &self,
        company_id: u64,
        date: NaiveDate,
        staff_id: u64,
        user_token: &str,
    ) -> Result<Value, ApiError> {
        self.send(
            self.client()
                .build_get_timetable_seances(company_id, date, staff_id, user_token)?,
        )
    }
}
