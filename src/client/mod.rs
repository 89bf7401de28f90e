//! HTTP client for the login and OTP endpoints.
//!
//! This module keeps API connectivity in one place so both calls share
//! request construction, timeouts, and error handling. The flow controller
//! depends on the [`LoginApi`] trait rather than on this client directly,
//! so tests can substitute deterministic fakes.
//!
//! Contract:
//! - Transport failures (unreachable endpoint, malformed response body)
//!   surface as `Error::Network` with a generic message.
//! - Structured failure responses surface the server-supplied `msg` when
//!   present, else a generic fallback.
//! - No retries happen here; retry policy belongs to the caller.

use crate::{error::Error, APP_USER_AGENT};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info_span, Instrument};
use url::Url;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const LOGIN_PATH: &str = "/api/user/login";
const OTP_PATH: &str = "/api/user/otp";

const LOGIN_FALLBACK: &str = "Login failed.";

/// Login outcome carrying the email as confirmed by the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginReceipt {
    pub email: String,
}

/// OTP dispatch outcome as reported by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OtpReceipt {
    pub ok: bool,
}

/// The two remote operations the flow controller depends on.
#[allow(async_fn_in_trait)]
pub trait LoginApi {
    /// Submit a login request for `email`.
    /// # Errors
    /// Returns `Error::Login` when the server rejects the request or the
    /// response has an unexpected shape, `Error::Network` on transport failure.
    async fn login(&self, email: &str) -> Result<LoginReceipt, Error>;

    /// Ask the server to dispatch a one-time passcode to `email`.
    /// # Errors
    /// Returns `Error::Network` on transport failure or a malformed body.
    async fn request_otp(&self, email: &str) -> Result<OtpReceipt, Error>;
}

#[derive(Serialize, Debug)]
struct AuthRequest<'a> {
    email: &'a str,
}

/// Reqwest-backed [`LoginApi`] implementation.
///
/// Both calls are bounded by a connect timeout and a request timeout;
/// timeouts surface as `Error::Network` like any other transport failure.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Build a client with the default request timeout.
    /// # Errors
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(base_url: &str) -> Result<Self, Error> {
        Self::with_timeout(base_url, DEFAULT_REQUEST_TIMEOUT)
    }

    /// Build a client with an explicit request timeout.
    /// # Errors
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .user_agent(APP_USER_AGENT)
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(timeout)
            .build()
            .map_err(|err| Error::Network(format!("Error building HTTP client: {err}")))?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
        })
    }
}

impl LoginApi for ApiClient {
    async fn login(&self, email: &str) -> Result<LoginReceipt, Error> {
        let url = endpoint_url(&self.base_url, LOGIN_PATH)?;

        let span = info_span!(
            "api.login",
            http.method = "POST",
            url = %url
        );
        let response = self
            .client
            .post(&url)
            .json(&AuthRequest { email })
            .send()
            .instrument(span)
            .await
            .map_err(transport_error)?;

        debug!("login response: {}", response.status());

        // The outcome is derived from the body shape, not the status code:
        // a confirmed email means success, anything else carries a `msg`.
        let body: Value = response.json().await.map_err(transport_error)?;

        match body
            .get("data")
            .and_then(|v| v.get("email"))
            .and_then(Value::as_str)
        {
            Some(confirmed) => Ok(LoginReceipt {
                email: confirmed.to_string(),
            }),
            None => Err(Error::Login(
                server_message(&body).unwrap_or(LOGIN_FALLBACK).to_string(),
            )),
        }
    }

    async fn request_otp(&self, email: &str) -> Result<OtpReceipt, Error> {
        let url = endpoint_url(&self.base_url, OTP_PATH)?;

        let span = info_span!(
            "api.request_otp",
            http.method = "POST",
            url = %url
        );
        let response = self
            .client
            .post(&url)
            .json(&AuthRequest { email })
            .send()
            .instrument(span)
            .await
            .map_err(transport_error)?;

        debug!("otp response: {}", response.status());

        let body: Value = response.json().await.map_err(transport_error)?;

        let ok = body
            .get("ok")
            .and_then(Value::as_bool)
            .ok_or_else(|| Error::Network("Unable to decode the server response.".to_string()))?;

        Ok(OtpReceipt { ok })
    }
}

fn server_message(body: &Value) -> Option<&str> {
    body.get("msg").and_then(Value::as_str)
}

fn transport_error(err: reqwest::Error) -> Error {
    if err.is_timeout() {
        Error::Network("Request timed out. Please try again.".to_string())
    } else if err.is_decode() {
        Error::Network("Unable to decode the server response.".to_string())
    } else {
        Error::Network("Unable to reach the server.".to_string())
    }
}

/// # Errors
/// Returns an error if `url` cannot be parsed, has no host, or uses an unsupported scheme.
pub fn endpoint_url(url: &str, path: &str) -> Result<String, Error> {
    let url =
        Url::parse(url).map_err(|err| Error::Network(format!("Error parsing URL: {err}")))?;

    let scheme = url.scheme();

    let host = url
        .host()
        .ok_or_else(|| Error::Network("Error parsing URL: no host specified".to_string()))?
        .to_owned();

    let port = match url.port() {
        Some(p) => p,
        None => match scheme {
            "http" => 80,
            "https" => 443,
            _ => {
                return Err(Error::Network(format!(
                    "Error parsing URL: unsupported scheme {scheme}"
                )))
            }
        },
    };

    let endpoint_url = format!("{scheme}://{host}:{port}{path}");

    debug!("endpoint URL: {}", endpoint_url);

    Ok(endpoint_url)
}
