//! Blocking HTTP client for the reputation services.

use std::time::Duration;

use reqwest::blocking::{Client, Response};

use super::{HttpClient, HttpResponse};
use crate::error_handling::{categorize_reqwest_error, TransportError};

/// `HttpClient` backed by `reqwest::blocking`.
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    client: Client,
}

impl ReqwestClient {
    /// Builds a client with the given request timeout and User-Agent.
    ///
    /// # Errors
    ///
    /// Returns a `reqwest::Error` if the TLS backend cannot be initialized.
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(crate::config::TCP_CONNECT_TIMEOUT_SECS))
            .user_agent(user_agent.to_string())
            .build()?;
        Ok(Self { client })
    }

    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

impl HttpClient for ReqwestClient {
    fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| categorize_reqwest_error(&e, url))?;
        read_response(url, response)
    }

    fn post(&self, url: &str, body: String) -> Result<HttpResponse, TransportError> {
        let response = self
            .client
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, "text/plain")
            .body(body)
            .send()
            .map_err(|e| categorize_reqwest_error(&e, url))?;
        read_response(url, response)
    }
}

/// Converts a `reqwest` response, keeping headers and the decoded body.
pub(super) fn read_response(url: &str, response: Response) -> Result<HttpResponse, TransportError> {
    let head = response_head(&response);
    let body = response
        .text()
        .map_err(|e| categorize_reqwest_error(&e, url))?;
    Ok(HttpResponse { body, ..head })
}

/// Status, final URL and headers of a response, with an empty body.
pub(super) fn response_head(response: &Response) -> HttpResponse {
    response.headers().iter().fold(
        HttpResponse::new(response.url().as_str(), response.status().as_u16(), ""),
        |acc, (name, value)| match value.to_str() {
            Ok(value) => acc.with_header(name.as_str(), value),
            Err(_) => acc,
        },
    )
}
