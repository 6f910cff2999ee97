//! HTTP request executor for the Basecamp Classic API

use base64::{Engine as _, engine::general_purpose};
use reqwest::{Client as HttpClient, Method, redirect};
use std::time::Duration;

use super::{ApiResponse, AuthScheme};
use crate::error::{ApiError, Result};

/// Long fixed timeout; the tool is used for potentially large exports
const REQUEST_TIMEOUT_SECS: u64 = 1800;

/// Low-level client: builds one authenticated request at a time against the
/// fixed base URL and captures status, headers, and body.
///
/// Redirect-following is disabled on purpose: a redirect is a diagnostic
/// signal of an auth failure, not something to silently follow.
pub struct BasecampClient {
    http: HttpClient,
    base_url: String,
    api_key: String,
}

impl BasecampClient {
    pub fn new(base_url: String, api_key: String, user_email: &str) -> Result<Self> {
        let user_agent = format!(
            "bcc/{} in use by {}",
            env!("CARGO_PKG_VERSION"),
            user_email
        );

        let http = HttpClient::builder()
            .redirect(redirect::Policy::none())
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(user_agent)
            .build()
            .map_err(|e| ApiError::Transport(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issue one request and vet the response against the status policy for
    /// the given auth scheme.
    ///
    /// Basic-auth (documented) endpoints accept 200-299 only. Cookie-auth
    /// (HTML-only) endpoints tolerate 300-399 with a warning, since legacy
    /// HTML flows redirect benignly; anything outside 200-399 is fatal.
    pub async fn execute(
        &self,
        path: &str,
        method: Method,
        body: Option<String>,
        auth: &AuthScheme,
    ) -> Result<ApiResponse> {
        let url = format!("{}/{}", self.base_url, path);
        log::debug!("{method} {url}");

        let mut request = self.http.request(method, &url);
        request = match auth {
            AuthScheme::Basic => {
                let credentials = general_purpose::STANDARD.encode(format!("{}:X", self.api_key));
                request
                    .header("Accept", "application/xml")
                    .header("Content-Type", "application/xml")
                    .header("Authorization", format!("Basic {credentials}"))
            }
            AuthScheme::Session(tokens) => request.header(
                "Cookie",
                format!(
                    "twisted_token={}; session_token={}",
                    tokens.twisted_token, tokens.session_token
                ),
            ),
        };
        if let Some(body) = body {
            request = request.body(body);
        }

        let response = request.send().await.map_err(ApiError::from)?;

        let status = response.status().as_u16();
        let headers: Vec<(String, String)> = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_ascii_lowercase(),
                    value.to_str().unwrap_or_default().to_string(),
                )
            })
            .collect();
        let body = response.text().await.map_err(ApiError::from)?;

        if body.is_empty() {
            return Err(ApiError::Transport(format!("empty response from {url}")).into());
        }

        if status == 404 {
            return Err(ApiError::NotFound(path.to_string()).into());
        }

        match auth {
            AuthScheme::Basic => {
                if !(200..=299).contains(&status) {
                    return Err(ApiError::Status { status, body }.into());
                }
            }
            AuthScheme::Session(_) => {
                if (300..=399).contains(&status) {
                    log::warn!("Response: {status} from {url} - continuing (legacy HTML flow)");
                } else if !(200..=299).contains(&status) {
                    return Err(ApiError::Status { status, body }.into());
                }
            }
        }

        Ok(ApiResponse {
            status,
            headers,
            body,
        })
    }
}
