//! Browser-session token negotiation for HTML-only endpoints
//!
//! HTML-only endpoints authenticate with a pair of browser cookies instead
//! of the documented API key. The broker resolves that pair once per
//! process: a persisted pair is probed for liveness before reuse, and the
//! operator is prompted only when no working pair exists.

use reqwest::Method;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::AuthScheme;
use super::api::BasecampClient;
use crate::cache::CacheStorage;
use crate::error::Result;
use crate::prompt::{Prompter, UrlOpener};

/// Cheap known endpoint used for the liveness probe
const PROBE_ENDPOINT: &str = "projects";

/// Bodies at or below this size indicate a login page, not real content.
/// Brittle content-sniffing heuristic inherited from the upstream web flows;
/// the threshold is unverified against the live service and kept as-is.
const MIN_LIVE_BODY_LEN: usize = 5000;

/// The browser cookie pair that authenticates HTML-only requests
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionTokens {
    pub twisted_token: String,
    pub session_token: String,
}

/// Negotiation state, tracked explicitly so the probe path can never
/// re-enter the negotiation that issued it.
enum SessionState {
    Unresolved,
    /// A cached candidate pair is memoized while its liveness probe runs
    Probing(SessionTokens),
    /// Tokens are final for the rest of this invocation
    Resolved(SessionTokens),
}

pub struct SessionBroker {
    state: SessionState,
    login_url: String,
    prompter: Box<dyn Prompter>,
    opener: Box<dyn UrlOpener>,
}

impl SessionBroker {
    pub fn new(
        login_url: String,
        prompter: Box<dyn Prompter>,
        opener: Box<dyn UrlOpener>,
    ) -> Self {
        Self {
            state: SessionState::Unresolved,
            login_url,
            prompter,
            opener,
        }
    }

    /// Resolve a working token pair, prompting the operator at most once per
    /// process. Once resolved, the pair is memoized and never re-validated
    /// within this invocation.
    pub async fn resolve(
        &mut self,
        client: &BasecampClient,
        store: &CacheStorage,
        token_ttl: Duration,
    ) -> Result<SessionTokens> {
        match &self.state {
            SessionState::Resolved(tokens) => return Ok(tokens.clone()),
            // Re-entry while a probe is in flight borrows the candidate
            // instead of starting another negotiation
            SessionState::Probing(tokens) => return Ok(tokens.clone()),
            SessionState::Unresolved => {}
        }

        if let Some(candidate) = store.load_tokens(token_ttl) {
            // Memoize before probing: the probe goes out with the candidate
            // pair attached rather than triggering another negotiation.
            self.state = SessionState::Probing(candidate.clone());
            if self.probe(client, &candidate).await {
                log::debug!("Cached session tokens passed liveness probe");
                self.state = SessionState::Resolved(candidate.clone());
                return Ok(candidate);
            }
            log::debug!("Cached session tokens failed liveness probe - re-prompting");
        }

        // A failed prompt must not leave the dead candidate memoized
        let tokens = match self.prompt_for_tokens() {
            Ok(tokens) => tokens,
            Err(e) => {
                self.state = SessionState::Unresolved;
                return Err(e);
            }
        };
        store.store_tokens(&tokens);
        self.state = SessionState::Resolved(tokens.clone());
        Ok(tokens)
    }

    /// Probe a cheap endpoint with the candidate pair. A redirect towards the
    /// login page or a suspiciously short body both mean the session is dead.
    async fn probe(&self, client: &BasecampClient, candidate: &SessionTokens) -> bool {
        let auth = AuthScheme::Session(candidate.clone());
        match client.execute(PROBE_ENDPOINT, Method::GET, None, &auth).await {
            Ok(response) => {
                if let Some(location) = response.header("location") {
                    if location.contains("login") {
                        return false;
                    }
                }
                response.body.len() > MIN_LIVE_BODY_LEN
            }
            Err(e) => {
                log::debug!("Session probe failed: {e}");
                false
            }
        }
    }

    fn prompt_for_tokens(&self) -> Result<SessionTokens> {
        println!("Browser session sign-in is required for HTML-only endpoints.");
        println!("  1. Sign in at {} (opening in your browser)", self.login_url);
        println!("  2. Open your browser's cookie inspector for the site");
        println!("  3. Copy the 'twisted_token' and 'session_token' cookie values");

        if let Err(e) = self.opener.open(&self.login_url) {
            log::warn!("Failed to open browser for {}: {e}", self.login_url);
        }

        let twisted_token = self.prompter.prompt("twisted_token value")?;
        let session_token = self.prompter.prompt("session_token value")?;

        Ok(SessionTokens {
            twisted_token: twisted_token.trim().to_string(),
            session_token: session_token.trim().to_string(),
        })
    }
}
