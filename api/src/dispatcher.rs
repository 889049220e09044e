//! Request dispatcher
//! ------------------
//! The single funnel for every outgoing request. It is responsible for:
//!
//!  - consulting the auth marker and, when required, asking the token
//!    provider for the current token
//!  - injecting the token header when a token exists; an absent token never
//!    stops a request (the server's 401/403 is the real answer and flows
//!    back unmodified)
//!  - mapping transport failures and non-2xx statuses into `ApiError`
//!
//! The marker is a typed argument consumed here; nothing about it reaches
//! the wire. No retries, no queueing, no response caching at this layer.
use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response};
use serde::Serialize;
use tracing::{debug, instrument};

use crate::error::ApiError;

/// Header carrying the session token, as the service expects it.
pub const AUTH_HEADER: &str = "xtoken";

/// Whether an endpoint expects the session token. Consumed before the wire;
/// it can never appear as a header or a body field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Auth {
    Required,
    Anonymous,
}

/// Source of the current session token. `None` means anonymous; providers
/// degrade lookup failures to `None` so the request still goes out.
#[async_trait::async_trait]
pub trait TokenProvider: Send + Sync {
    async fn token(&self) -> Option<String>;
}

pub struct Dispatcher<P> {
    http: Client,
    base_url: String,
    tokens: Arc<P>,
}

impl<P: TokenProvider> Dispatcher<P> {
    pub fn new(base_url: &str, tokens: Arc<P>) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(10))
            .pool_idle_timeout(Duration::from_secs(30))
            .tcp_keepalive(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            tokens,
        })
    }

    /// Send a request without a body.
    pub async fn send(&self, method: Method, path: &str, auth: Auth) -> Result<Response, ApiError> {
        let req = self.http.request(method, self.url(path));
        self.dispatch(req, path, auth).await
    }

    /// Send a request with a JSON body.
    pub async fn send_json<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
        auth: Auth,
    ) -> Result<Response, ApiError> {
        let req = self.http.request(method, self.url(path)).json(body);
        self.dispatch(req, path, auth).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    #[instrument(
        skip(self, req),
        fields(path = %path),
        level = "debug"
    )]
    async fn dispatch(
        &self,
        mut req: RequestBuilder,
        path: &str,
        auth: Auth,
    ) -> Result<Response, ApiError> {
        if auth == Auth::Required {
            match self.tokens.token().await {
                Some(token) => req = req.header(AUTH_HEADER, token),
                // Sent anyway; the server decides what anonymous gets.
                None => debug!("no stored token for an auth-required request"),
            }
        }

        let resp = req.send().await?;

        let status = resp.status();
        if status.is_client_error() {
            return Err(ApiError::Client {
                status: status.as_u16(),
                body: resp.text().await.unwrap_or_default(),
            });
        }
        if status.is_server_error() {
            return Err(ApiError::Server {
                status: status.as_u16(),
                body: resp.text().await.unwrap_or_default(),
            });
        }

        Ok(resp)
    }
}
