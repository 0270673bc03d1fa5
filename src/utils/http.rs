// src/utils/http.rs

//! HTTP client utilities.

use std::time::Duration;

use reqwest::blocking::Client;
use url::Url;

use crate::error::Result;
use crate::models::ApiConfig;

/// One page of a keyword search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest<'a> {
    pub keyword: &'a str,
    /// Zero-based page index
    pub page: u32,
    pub per_page: u32,
}

/// Raw response: status code and undecoded body.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// Transport used by the fetcher to request listing pages.
///
/// `Err` means the request never produced a response (connection, TLS,
/// body read); any status code, success or not, comes back as `Ok`.
pub trait HttpTransport {
    fn get_page(&self, request: &PageRequest<'_>) -> Result<HttpResponse>;
}

/// Create a configured blocking HTTP client.
pub fn create_client(config: &ApiConfig) -> Result<Client> {
    let mut builder = Client::builder().user_agent(&config.user_agent);
    if let Some(secs) = config.timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    Ok(builder.build()?)
}

/// [`HttpTransport`] backed by a reqwest blocking client.
pub struct ReqwestTransport {
    client: Client,
    endpoint: Url,
}

impl ReqwestTransport {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        Ok(Self {
            client: create_client(config)?,
            endpoint: Url::parse(&config.endpoint)?,
        })
    }
}

impl HttpTransport for ReqwestTransport {
    fn get_page(&self, request: &PageRequest<'_>) -> Result<HttpResponse> {
        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&[
                ("text", request.keyword.to_string()),
                ("page", request.page.to_string()),
                ("per_page", request.per_page.to_string()),
            ])
            .send()?;
        let status = response.status().as_u16();
        let body = response.text()?;
        Ok(HttpResponse { status, body })
    }
}
