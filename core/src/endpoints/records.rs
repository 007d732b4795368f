//! Back-office records (appointments in the company journal).

use serde_json::Value;

use crate::api::Yclients;
use crate::client::{Auth, YclientsClient};
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest};
use crate::params::{format_date, format_datetime, Params};
use crate::transport::Transport;
use crate::types::{Fields, NewRecord, RecordsFilter};

impl YclientsClient {
    pub fn build_get_records(
        &self,
        company_id: u64,
        user_token: &str,
        filter: &RecordsFilter,
    ) -> Result<HttpRequest, ApiError> {
        let params = Params::new()
            .opt("page", filter.page)
            .opt("count", filter.count)
            .opt("staff_id", filter.staff_id)
            .opt("client_id", filter.client_id)
            .opt("start_date", filter.start_date.as_ref().map(format_date))
            .opt("end_date", filter.end_date.as_ref().map(format_date))
            .opt("c_start_date", filter.c_start_date.as_ref().map(format_date))
            .opt("c_end_date", filter.c_end_date.as_ref().map(format_date))
            .opt("changed_after", filter.changed_after.as_ref().map(format_datetime))
            .opt("changed_before", filter.changed_before.as_ref().map(format_datetime));
        self.request(
            HttpMethod::Get,
            &format!("records/{company_id}"),
            params,
            Auth::User(user_token),
        )
    }

    pub fn build_post_records(
        &self,
        company_id: u64,
        user_token: &str,
        record: &NewRecord,
    ) -> Result<HttpRequest, ApiError> {
        let params = Params::new()
            .set("staff_id", record.staff_id)
            .set("services", record.services.clone())
            .set("client", Value::Object(record.client.clone()))
            .set("datetime", format_datetime(&record.datetime))
            .set("seance_length", record.seance_length)
            .set("save_if_busy", record.save_if_busy)
            .set("send_sms", record.send_sms)
            .opt("comment", record.comment.as_deref())
            .opt("sms_remain_hours", record.sms_remain_hours)
            .opt("email_remain_hours", record.email_remain_hours)
            .opt("api_id", record.api_id.as_deref())
            .opt("attendance", record.attendance);
        self.request(
            HttpMethod::Post,
            &format!("records/{company_id}"),
            params,
            Auth::User(user_token),
        )
    }

    pub fn build_get_record(&self, company_id: u64, record_id: u64, user_token: &str) -> Result<HttpRequest, ApiError> {
        self.request(
            HttpMethod::Get,
            &format!("record/{company_id}/{record_id}"),
            Params::new(),
            Auth::User(user_token),
        )
    }

    pub fn build_put_record(
        &self,
        company_id: u64,
        record_id: u64,
        user_token: &str,
        fields: &Fields,
    ) -> Result<HttpRequest, ApiError> {
        self.request(
            HttpMethod::Put,
            &format!("record/{company_id}/{record_id}"),
            Params::new().extend(fields),
            Auth::User(user_token),
        )
    }

    pub fn build_delete_record(&self, company_id: u64, record_id: u64, user_token: &str) -> Result<HttpRequest, ApiError> {
        self.request(
            HttpMethod::Delete,
            &format!("record/{company_id}/{record_id}"),
            Params::new(),
            Auth::User(user_token),
        )
    }
}

impl<T: Transport> Yclients<T> {
    pub fn get_records(&self, company_id: u64, user_token: &str, filter: &RecordsFilter) -> Result<Value, ApiError> {
        self.send(self.client().build_get_records(company_id, user_token, filter)?)
    }

    pub fn post_records(&self, company_id: u64, user_token: &str, record: &NewRecord) -> Result<Value, ApiError> {
        self.send(self.client().build_post_records(company_id, user_token, record)?)
    }

    pub fn get_record(&self, company_id: u64, record_id: u64, user_token: &str) -> Result<Value, ApiError> {
        self.send(self.client().build_get_record(company_id, record_id, user_token)?)
    }

    pub fn put_record(
        &self,
        company_id: u64,
        record_id: u64,
        user_token: &str,
        fields: &Fields,
    ) -> Result<Value, ApiError> {
        self.send(
            self.client()
                .build_put_record(company_id, record_id, user_token, fields)?,
        )
    }

    pub fn delete_record(&self, company_id: u64, record_id: u64, user_token: &str) -> Result<Value, ApiError> {
        self.send(self.client().build_delete_record(company_id, record_id, user_token)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::tests::api;
    use chrono::{FixedOffset, NaiveDate, TimeZone};
    use serde_json::json;

    const BASE: &str = "http://mock/api/v1";

    fn client() -> YclientsClient {
        YclientsClient::new("partner").with_base_url(BASE)
    }

    fn new_record() -> NewRecord {
        let tz = FixedOffset::east_opt(3 * 3600).unwrap();
        NewRecord {
            staff_id: 5,
            services: vec![json!({"id": 331, "first_cost": 900, "discount": 0, "cost": 900})],
            client: json!({"phone": "79161502239", "name": "Ann"}).as_object().cloned().unwrap(),
            datetime: tz.with_ymd_and_hms(2016, 3, 1, 12, 0, 0).unwrap(),
            seance_length: 3600,
            save_if_busy: false,
            send_sms: true,
            comment: None,
            sms_remain_hours: Some(6),
            email_remain_hours: None,
            api_id: None,
            attendance: None,
        }
    }

    #[test]
    fn records_filter_formats_dates_and_datetimes() {
        let tz = FixedOffset::east_opt(0).unwrap();
        let filter = RecordsFilter {
            page: Some(1),
            staff_id: Some(5),
            start_date: NaiveDate::from_ymd_opt(2016, 3, 1),
            c_end_date: NaiveDate::from_ymd_opt(2016, 3, 2),
            changed_after: Some(tz.with_ymd_and_hms(2016, 3, 1, 0, 0, 0).unwrap()),
            ..RecordsFilter::default()
        };
        let req = client().build_get_records(1, "u", &filter).unwrap();
        assert_eq!(
            req.url,
            format!(
                "{BASE}/records/1?page=1&staff_id=5&start_date=2016-03-01&c_end_date=2016-03-02\
                 &changed_after=2016-03-01T00%3A00%3A00%2B0000"
            )
        );
    }

    #[test]
    fn post_records_body() {
        let req = client().build_post_records(1, "u", &new_record()).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.url, format!("{BASE}/records/1"));
        let body: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(
            body,
            json!({
                "staff_id": 5,
                "services": [{"id": 331, "first_cost": 900, "discount": 0, "cost": 900}],
                "client": {"phone": "79161502239", "name": "Ann"},
                "datetime": "2016-03-01T12:00:00+0300",
                "seance_length": 3600,
                "save_if_busy": false,
                "send_sms": true,
                "sms_remain_hours": 6
            })
        );
    }

    #[test]
    fn single_record_operations() {
        let c = client();
        assert_eq!(c.build_get_record(1, 2, "u").unwrap().url, format!("{BASE}/record/1/2"));
        let fields = json!({"comment": "late"}).as_object().cloned().unwrap();
        let put = c.build_put_record(1, 2, "u", &fields).unwrap();
        assert_eq!(put.method, HttpMethod::Put);
        let delete = c.build_delete_record(1, 2, "u").unwrap();
        assert_eq!(delete.method, HttpMethod::Delete);
        assert_eq!(delete.header("authorization"), Some("Bearer partner, User u"));
    }

    #[test]
    fn dispatcher_post_records() {
        let api = api(201, r#"{"id":100,"staff_id":5}"#);
        let created = api.post_records(1, "u", &new_record()).unwrap();
        assert_eq!(created["id"], 100);
        assert_eq!(api.transport().last().method, HttpMethod::Post);
    }
}
