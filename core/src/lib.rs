//! Synchronous client for the Yclients booking API.
//!
//! # Overview
//! A one-to-one mapping of API endpoints to methods. Each method assembles
//! query or body parameters from typed arguments, attaches the partner (and
//! optionally user) authorization header, issues the request and returns
//! the decoded JSON.
//!
//! # Design
//! - `YclientsClient` builds `HttpRequest` values (`build_*`) and parses
//!   `HttpResponse` values without touching the network.
//! - `Yclients` pairs it with a `Transport` (blocking ureq by default) and
//!   exposes the same endpoints as plain method calls.
//! - Companies, clients, records and the like stay opaque JSON; only
//!   multi-argument filters get structs.
//!
//! ```no_run
//! use yclients_core::{BookingFilter, Yclients};
//!
//! let api = Yclients::new("partner-token");
//! let auth = api.auth("login", "password")?;
//! let user_token = auth["user_token"].as_str().unwrap_or_default();
//! let services = api.get_book_services(4564, &BookingFilter::default())?;
//! let clients = api.get_clients(4564, user_token, &Default::default())?;
//! # Ok::<(), yclients_core::ApiError>(())
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod http;
pub mod params;
pub mod transport;
pub mod types;

pub use api::Yclients;
pub use client::{Auth, YclientsClient, DEFAULT_BASE_URL};
pub use config::YclientsConfig;
pub use endpoints::booking::DEFAULT_LOCALE;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use transport::{Transport, UreqTransport};
pub use types::{
    BookDatesFilter, BookRecordOptions, BookingFilter, ClientsFilter, CommentsFilter,
    CompaniesFilter, Fields, NewRecord, Notify, RecordsFilter,
};
