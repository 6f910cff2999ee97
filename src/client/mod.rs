//! Basecamp Classic API access: request execution, endpoint normalization,
//! session negotiation, and the cache-through orchestrator.

pub mod api;
pub mod endpoint;
pub mod session;

pub use api::BasecampClient;
pub use endpoint::Endpoint;
pub use session::{SessionBroker, SessionTokens};

use reqwest::Method;
use std::time::Duration;

use crate::cache::CacheStorage;
use crate::config::Config;
use crate::error::Result;
use crate::prompt::{Prompter, UrlOpener};
use crate::records;

/// One captured HTTP exchange: status, response headers, and body.
#[derive(Debug)]
pub struct ApiResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl ApiResponse {
    /// Case-insensitive header lookup; names are lowercased at capture time.
    pub fn header(&self, name: &str) -> Option<&str> {
        let name = name.to_ascii_lowercase();
        self.headers
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// How a request authenticates against the service
#[derive(Debug, Clone)]
pub enum AuthScheme {
    /// Documented API: key over HTTP basic auth, XML in and out
    Basic,
    /// Undocumented HTML pages: browser session cookies
    Session(SessionTokens),
}

/// High-level API facade: routes each endpoint through the cache, the
/// documented XML API, or the HTML session fallback as appropriate.
pub struct Api {
    client: BasecampClient,
    session: SessionBroker,
    store: CacheStorage,
    cache_enabled: bool,
    cache_ttl: Duration,
    token_ttl: Duration,
}

impl Api {
    pub fn new(
        config: &Config,
        store: CacheStorage,
        cache_enabled: bool,
        prompter: Box<dyn Prompter>,
        opener: Box<dyn UrlOpener>,
    ) -> Result<Self> {
        config.validate_credentials()?;
        let api_url = config.api_url.clone().unwrap_or_default();
        let api_key = config.api_key.clone().unwrap_or_default();
        let user_email = config.api_user_email.clone().unwrap_or_default();

        let client = BasecampClient::new(api_url.clone(), api_key, &user_email)?;
        let session = SessionBroker::new(format!("{api_url}/login"), prompter, opener);

        Ok(Self {
            client,
            session,
            store,
            cache_enabled,
            cache_ttl: config.cache_ttl(),
            token_ttl: config.token_ttl(),
        })
    }

    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }

    /// Fetch an endpoint body as XML, serving from the response cache when
    /// fresh. HTML-only endpoints are fetched with the browser session and
    /// adapted into the same XML shape the documented API produces.
    pub async fn get(&mut self, endpoint: &Endpoint) -> Result<String> {
        if self.cache_enabled {
            if let Some(cached) = self.store.get(&endpoint.cache_segments(), self.cache_ttl) {
                log::debug!("Cache hit for {endpoint}");
                return Ok(cached);
            }
        }

        if endpoint.html_only() {
            return self.get_html_adapted(endpoint).await;
        }

        let response = self
            .client
            .execute(&endpoint.path(), Method::GET, None, &AuthScheme::Basic)
            .await?;

        if self.cache_enabled {
            self.store.put(&endpoint.cache_segments(), &response.body);
        }
        Ok(response.body)
    }

    pub async fn post(&mut self, endpoint: &Endpoint, body: String) -> Result<String> {
        let response = self
            .client
            .execute(&endpoint.path(), Method::POST, Some(body), &AuthScheme::Basic)
            .await?;
        Ok(response.body)
    }

    pub async fn delete(&mut self, endpoint: &Endpoint) -> Result<String> {
        let response = self
            .client
            .execute(&endpoint.path(), Method::DELETE, None, &AuthScheme::Basic)
            .await?;
        Ok(response.body)
    }

    /// HTML-only path. The raw page is cached under its own key as a
    /// fallback source, and the synthesized XML is cached under the standard
    /// endpoint key so later reads take the structured fast path.
    async fn get_html_adapted(&mut self, endpoint: &Endpoint) -> Result<String> {
        let html = match self.cached_html(endpoint) {
            Some(html) => html,
            None => {
                let tokens = self
                    .session
                    .resolve(&self.client, &self.store, self.token_ttl)
                    .await?;
                let response = self
                    .client
                    .execute(
                        endpoint.slug(),
                        Method::GET,
                        None,
                        &AuthScheme::Session(tokens),
                    )
                    .await?;
                if self.cache_enabled {
                    self.store
                        .put(&endpoint.html_cache_segments(), &response.body);
                }
                response.body
            }
        };

        let records = records::scrape::extract(endpoint.slug(), &html)?;
        let body = records::to_xml(endpoint.slug(), &records);
        if self.cache_enabled {
            self.store.put(&endpoint.cache_segments(), &body);
        }
        Ok(body)
    }

    fn cached_html(&self, endpoint: &Endpoint) -> Option<String> {
        if !self.cache_enabled {
            return None;
        }
        let html = self
            .store
            .get(&endpoint.html_cache_segments(), self.cache_ttl)?;
        log::debug!("HTML cache hit for {}", endpoint.slug());
        Some(html)
    }
}
