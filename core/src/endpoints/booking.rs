//! Online booking: booking form settings, what can be booked and when, SMS
//! confirmation, and creating the booking itself.

use chrono::NaiveDate;
use serde_json::Value;

use crate::api::Yclients;
use crate::client::{checked_segment, Auth, YclientsClient};
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest};
use crate::params::{format_date, format_datetime, Params};
use crate::transport::Transport;
use crate::types::{
    appointments_value, require_fields, validate_appointments, BookDatesFilter, BookRecordOptions,
    BookingFilter, Fields,
};

/// Locale used by the booking widget when none is chosen.
pub const DEFAULT_LOCALE: &str = "ru-RU";

fn booking_params(filter: &BookingFilter) -> Params {
    Params::new()
        .opt("staff_id", filter.staff_id)
        .opt("datetime", filter.datetime.as_ref().map(format_datetime))
        .ids("service_ids", &filter.service_ids)
        .ids("event_ids", &filter.event_ids)
}

impl YclientsClient {
    pub fn build_get_bookform(&self, id: u64) -> Result<HttpRequest, ApiError> {
        self.request(HttpMethod::Get, &format!("bookform/{id}"), Params::new(), Auth::Partner)
    }

    /// Translations for the booking widget, e.g. `ru-RU`, `en-US`, `de-DE`.
    pub fn build_get_i18n(&self, locale: &str) -> Result<HttpRequest, ApiError> {
        let locale = checked_segment("locale", locale)?;
        self.request(HttpMethod::Get, &format!("i18n/{locale}"), Params::new(), Auth::Partner)
    }

    pub fn build_get_book_services(
        &self,
        company_id: u64,
        filter: &BookingFilter,
    ) -> Result<HttpRequest, ApiError> {
        self.request(
            HttpMethod::Get,
            &format!("book_services/{company_id}"),
            booking_params(filter),
            Auth::Partner,
        )
    }

    /// `without_seances` skips the nearest free slots per employee, which
    /// makes the call considerably faster.
    pub fn build_get_book_staff(
        &self,
        company_id: u64,
        filter: &BookingFilter,
        without_seances: bool,
    ) -> Result<HttpRequest, ApiError> {
        let mut params = booking_params(filter);
        if without_seances {
            params = params.set("without_seances", true);
        }
        self.request(HttpMethod::Get, &format!("book_staff/{company_id}"), params, Auth::Partner)
    }

    pub fn build_get_book_dates(
        &self,
        company_id: u64,
        filter: &BookDatesFilter,
    ) -> Result<HttpRequest, ApiError> {
        let params = Params::new()
            .opt("staff_id", filter.staff_id)
            .opt("date", filter.date.as_ref().map(format_date))
            .ids("service_ids", &filter.service_ids)
            .ids("event_ids", &filter.event_ids);
        self.request(HttpMethod::Get, &format!("book_dates/{company_id}"), params, Auth::Partner)
    }

    pub fn build_get_book_times(
        &self,
        company_id: u64,
        staff_id: u64,
        date: NaiveDate,
        service_ids: &[u64],
        event_ids: &[u64],
    ) -> Result<HttpRequest, ApiError> {
        let params = Params::new()
            .ids("service_ids", service_ids)
            .ids("event_ids", event_ids);
        let path = format!("book_times/{company_id}/{staff_id}/{}", format_date(&date));
        self.request(HttpMethod::Get, &path, params, Auth::Partner)
    }

    /// Send an SMS confirmation code to `phone` (digits only, e.g. `79991234567`).
    pub fn build_post_book_code(
        &self,
        company_id: u64,
        phone: &str,
        fullname: Option<&str>,
    ) -> Result<HttpRequest, ApiError> {
        let params = Params::new().set("phone", phone).opt("fullname", fullname);
        self.request(HttpMethod::Post, &format!("book_code/{company_id}"), params, Auth::Partner)
    }

    /// Validate appointments before booking them. Each appointment needs
    /// `id`, `staff_id` and `datetime`.
    pub fn build_post_book_check(
        &self,
        company_id: u64,
        appointments: &[Fields],
    ) -> Result<HttpRequest, ApiError> {
        validate_appointments(appointments)?;
        self.request(
            HttpMethod::Post,
            &format!("book_check/{company_id}"),
            appointments_value(appointments),
            Auth::Partner,
        )
    }

    /// Book one or more appointments for a person.
    ///
    /// `person` needs `phone`, `fullname` and `email`; each appointment needs
    /// `id`, `staff_id` and `datetime`, and there must be at least one.
    pub fn build_post_book_record(
        &self,
        company_id: u64,
        person: &Fields,
        appointments: &[Fields],
        options: &BookRecordOptions,
    ) -> Result<HttpRequest, ApiError> {
        require_fields(person, &["phone", "fullname", "email"], "client")?;
        if appointments.is_empty() {
            return Err(ApiError::validation("at least one appointment is required"));
        }
        validate_appointments(appointments)?;

        let notify = options.notify.unwrap_or_default();
        let params = Params::new()
            .extend(person)
            .set("appointments", appointments_value(appointments))
            .opt("notify_by_sms", notify.notify_by_sms)
            .opt("notify_by_email", notify.notify_by_email)
            .opt("code", options.code.as_deref())
            .opt("comment", options.comment.as_deref())
            .opt("api_id", options.api_id.as_deref());
        self.request(HttpMethod::Post, &format!("book_record/{company_id}"), params, Auth::Partner)
    }
}

impl<T: Transport> Yclients<T> {
    pub fn get_bookform(&self, id: u64) -> Result<Value, ApiError> {
        self.send(self.client().build_get_bookform(id)?)
    }

    pub fn get_i18n(&self, locale: &str) -> Result<Value, ApiError> {
        self.send(self.client().build_get_i18n(locale)?)
    }

    pub fn get_book_services(&self, company_id: u64, filter: &BookingFilter) -> Result<Value, ApiError> {
        self.send(self.client().build_get_book_services(company_id, filter)?)
    }

    pub fn get_book_staff(
        &self,
        company_id: u64,
        filter: &BookingFilter,
        without_seances: bool,
    ) -> Result<Value, ApiError> {
        self.send(self.client().build_get_book_staff(company_id, filter, without_seances)?)
    }

    pub fn get_book_dates(&self, company_id: u64, filter: &BookDatesFilter) -> Result<Value, ApiError> {
        self.send(self.client().build_get_book_dates(company_id, filter)?)
    }

    pub fn get_book_times(
        &self,
        company_id: u64,
        staff_id: u64,
        date: NaiveDate,
        service_ids: &[u64],
        event_ids: &[u64],
    ) -> Result<Value, ApiError> {
        self.send(
            self.client()
                .build_get_book_times(company_id, staff_id, date, service_ids, event_ids)?,
        )
    }

    pub fn post_book_code(
        &self,
        company_id: u64,
        phone: &str,
        fullname: Option<&str>,
    ) -> Result<Value, ApiError> {
        self.send(self.client().build_post_book_code(company_id, phone, fullname)?)
    }

    pub fn post_book_check(&self, company_id: u64, appointments: &[Fields]) -> Result<Value, ApiError> {
        self.send(self.client().build_post_book_check(company_id, appointments)?)
    }

    pub fn post_book_record(
        &self,
        company_id: u64,
        person: &Fields,
        appointments: &[Fields],
        options: &BookRecordOptions,
    ) -> Result<Value, ApiError> {
        self.send(
            self.client()
                .build_post_book_record(company_id, person, appointments, options)?,
        )
    }
}
