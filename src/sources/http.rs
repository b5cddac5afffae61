// src/sources/http.rs

//! REST backend source.

use std::collections::BTreeMap;

use async_trait::async_trait;
use ::url::Url;
use reqwest::header::ACCEPT_LANGUAGE;

use crate::error::{AppError, Result};
use crate::locale::Locale;
use crate::models::{Config, Endpoint, LocaleTransport, Record, decode_detail, decode_listing};
use crate::sources::ContentSource;
use crate::utils::{http, url};

/// Fetches records from the site backend over HTTP.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    base_url: String,
    transport: LocaleTransport,
    paths: BTreeMap<Endpoint, String>,
}

impl HttpSource {
    /// Build a source from configuration, with a fresh client.
    pub fn new(config: &Config) -> Result<Self> {
        let client = http::create_async_client(&config.api)?;
        Ok(Self::with_client(client, config))
    }

    /// Build a source around an existing client.
    pub fn with_client(client: reqwest::Client, config: &Config) -> Self {
        let paths = Endpoint::ALL
            .iter()
            .map(|&endpoint| (endpoint, config.endpoint_path(endpoint).to_string()))
            .collect();
        Self {
            client,
            base_url: config.api.base_url.clone(),
            transport: config.api.locale_transport,
            paths,
        }
    }

    fn path(&self, endpoint: Endpoint) -> &str {
        self.paths
            .get(&endpoint)
            .map(String::as_str)
            .unwrap_or_else(|| endpoint.default_path())
    }

    /// Full request URL for `path`, with the locale query when configured.
    pub fn request_url(&self, path: &str, locale: Locale) -> Result<Url> {
        let target = url::join_endpoint(&self.base_url, path)?;
        Ok(self.localize_url(target, locale))
    }

    /// Request URL for one record of `endpoint`.
    pub fn detail_request_url(
        &self,
        endpoint: Endpoint,
        id: &str,
        locale: Locale,
    ) -> Result<Url> {
        let listing = url::join_endpoint(&self.base_url, self.path(endpoint))?;
        let target = url::detail_url(&listing, id)?;
        Ok(self.localize_url(target, locale))
    }

    fn localize_url(&self, target: Url, locale: Locale) -> Url {
        if self.transport.sends_query() {
            url::with_lang(target, locale)
        } else {
            target
        }
    }

    async fn get_bytes(
        &self,
        endpoint: Endpoint,
        target: Url,
        locale: Locale,
    ) -> Result<Vec<u8>> {
        log::debug!("GET {target}");

        let mut request = self.client.get(target);
        if self.transport.sends_header() {
            request = request.header(ACCEPT_LANGUAGE, locale.wire_code());
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Status {
                endpoint: endpoint.key().to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response.bytes().await?.to_vec())
    }
}

#[async_trait]
impl ContentSource for HttpSource {
    fn name(&self) -> &str {
        "http"
    }

    async fn list(&self, endpoint: Endpoint, locale: Locale) -> Result<Vec<Record>> {
        let target = self.request_url(self.path(endpoint), locale)?;
        let body = self.get_bytes(endpoint, target, locale).await?;
        decode_listing(endpoint.key(), &body)
    }

    async fn detail(&self, endpoint: Endpoint, id: &str, locale: Locale) -> Result<Record> {
        let target = self.detail_request_url(endpoint, id, locale)?;
        match self.get_bytes(endpoint, target, locale).await {
            Err(AppError::Status { status: 404, .. }) => {
                Err(AppError::not_found(endpoint.key(), id))
            }
            Err(e) => Err(e),
            Ok(body) => decode_detail(endpoint.key(), &body),
        }
    }
}
