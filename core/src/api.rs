//! `Yclients`: request assembly plus a transport.
//!
//! Every endpoint method on `Yclients` has a `build_*` twin on
//! `YclientsClient` and does nothing beyond build, execute, parse.

use serde_json::Value;
use tracing::debug;

use crate::client::YclientsClient;
use crate::config::YclientsConfig;
use crate::error::ApiError;
use crate::http::HttpRequest;
use crate::transport::{Transport, UreqTransport};

/// Yclients API client that performs requests itself.
#[derive(Debug, Clone)]
pub struct Yclients<T = UreqTransport> {
    client: YclientsClient,
    transport: T,
}

impl Yclients<UreqTransport> {
    /// Client for the public API with the default 30 s timeout.
    pub fn new(partner_token: impl Into<String>) -> Self {
        Self::with_transport(YclientsClient::new(partner_token), UreqTransport::default())
    }

    pub fn from_config(config: &YclientsConfig) -> Self {
        let mut client = YclientsClient::without_partner_token().with_base_url(&config.base_url);
        if let Some(token) = &config.partner_token {
            client.set_partner_token(token.as_str());
        }
        Self::with_transport(client, UreqTransport::new(config.timeout))
    }
}

impl<T: Transport> Yclients<T> {
    pub fn with_transport(client: YclientsClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &YclientsClient {
        &self.client
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn set_partner_token(&mut self, partner_token: impl Into<String>) -> &mut Self {
        self.client.set_partner_token(partner_token);
        self
    }

    /// Execute a request built by any `YclientsClient::build_*` method.
    pub fn send(&self, request: HttpRequest) -> Result<Value, ApiError> {
        let method = request.method;
        let response = self.transport.execute(request)?;
        debug!(%method, status = response.status, "received Yclients response");
        self.client.parse_response(response)
    }
}
