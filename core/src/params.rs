//! Parameter assembly and wire formatting.
//!
//! Parameters are an ordered JSON object. GET requests flatten it into a
//! form-encoded query string, everything else sends it as a JSON body. The
//! query encoding follows the conventions the API's own web forms use:
//! booleans become `1`/`0`, lists become `key[0]=..&key[1]=..`, nested
//! objects become `key[field]=..`, and nulls are dropped.

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde_json::{Map, Value};
use url::form_urlencoded;

use crate::types::Fields;

/// ISO-8601 with a colon-less numeric offset, e.g. `2015-09-29T13:00:00+0400`.
pub const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn format_datetime(datetime: &DateTime<FixedOffset>) -> String {
    datetime.format(DATETIME_FORMAT).to_string()
}

pub fn format_date(date: &NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Ordered request parameters. Optional values are only inserted when
/// present, so an endpoint with no arguments set produces no query/body.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct Params(Map<String, Value>);

impl Params {
    pub(crate) fn new() -> Self {
        Self(Map::new())
    }

    pub(crate) fn set(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.0.insert(key.to_string(), value.into());
        self
    }

    pub(crate) fn opt<V: Into<Value>>(self, key: &str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.set(key, value),
            None => self,
        }
    }

    /// Insert an id list, skipping it entirely when empty.
    pub(crate) fn ids(self, key: &str, ids: &[u64]) -> Self {
        if ids.is_empty() {
            return self;
        }
        self.set(key, ids.to_vec())
    }

    /// Merge caller-supplied fields. Existing keys are overwritten in place.
    pub(crate) fn extend(mut self, fields: &Fields) -> Self {
        for (key, value) in fields {
            self.0.insert(key.clone(), value.clone());
        }
        self
    }
}

impl From<Params> for Value {
    fn from(params: Params) -> Self {
        Value::Object(params.0)
    }
}

/// True when a parameter value would produce neither a query nor a body.
pub(crate) fn is_empty(params: &Value) -> bool {
    match params {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

/// Form-encode an object into a query string (without the leading `?`).
pub fn encode_query(params: &Map<String, Value>) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in params {
        append(&mut serializer, key, value);
    }
    serializer.finish()
}

fn append(serializer: &mut form_urlencoded::Serializer<'_, String>, key: &str, value: &Value) {
    match value {
        Value::Null => {}
        Value::Bool(flag) => {
            serializer.append_pair(key, if *flag { "1" } else { "0" });
        }
        Value::Number(number) => {
            serializer.append_pair(key, &number.to_string());
        }
        Value::String(text) => {
            serializer.append_pair(key, text);
        }
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                append(serializer, &format!("{key}[{index}]"), item);
            }
        }
        Value::Object(fields) => {
            for (field, item) in fields {
                append(serializer, &format!("{key}[{field}]"), item);
            }
        }
    }
}
