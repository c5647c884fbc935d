// Pi-hole API HTTP client
//
// Wraps `reqwest::Client` with appliance URL construction, session
// headers, and the small endpoint set a dashboard run needs: login,
// a validation probe, the statistics summary, and the blocking status.
//
// Statistics payloads are returned as loosely-typed JSON because the
// field set differs between appliance generations (flat v5 fields vs.
// nested v6 objects). `inkhole-core` resolves them into the canonical
// summary.

use reqwest::header;
use secrecy::{ExposeSecret, SecretString};
use serde_json::{Value, json};
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::session::SessionToken;
use crate::transport::TransportConfig;

const AUTH_PATH: &str = "/api/auth";
const SUMMARY_PATH: &str = "/api/stats/summary";
const BLOCKING_PATH: &str = "/api/dns/blocking";

/// Raw HTTP client for the Pi-hole admin API.
pub struct PiholeClient {
    http: reqwest::Client,
    base_url: Url,
}

impl PiholeClient {
    /// Create a client for the appliance at `host:port`.
    pub fn new(host: &str, port: u16, transport: &TransportConfig) -> Result<Self, Error> {
        let base_url = Url::parse(&format!("http://{host}:{port}"))?;
        let http = transport.build_client()?;
        Ok(Self { http, base_url })
    }

    /// Create a client with a pre-built `reqwest::Client` and base URL.
    ///
    /// Used by tests to point at a mock server.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    fn api_url(&self, path: &str) -> Result<Url, Error> {
        self.base_url.join(path).map_err(Error::InvalidUrl)
    }

    /// Attach session headers, if a session is active.
    ///
    /// The sid goes out both as a bare header and as a cookie -- which
    /// one the appliance honors depends on its version, so both are
    /// always sent. The CSRF token rides along when present.
    fn with_session(
        &self,
        req: reqwest::RequestBuilder,
        session: Option<&SessionToken>,
    ) -> reqwest::RequestBuilder {
        let Some(token) = session else { return req };
        let mut req = req
            .header("sid", &token.sid)
            .header(header::COOKIE, format!("sid={}", token.sid));
        if let Some(ref csrf) = token.csrf {
            req = req.header("X-CSRF-Token", csrf);
        }
        req
    }

    // ── Authentication ──────────────────────────────────────────────

    /// Log in with the appliance password.
    ///
    /// `POST /api/auth` with `{"password": ...}`. The session id is
    /// accepted under either response shape: top-level `sid` (tried
    /// first) or nested inside a `session` object. Any other shape is
    /// a hard authentication failure carrying the raw body.
    pub async fn authenticate(&self, password: &SecretString) -> Result<SessionToken, Error> {
        let url = self.api_url(AUTH_PATH)?;
        debug!("POST {}", url);

        let body = json!({ "password": password.expose_secret() });
        let resp = self
            .http
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = resp.status();
        let text = resp.text().await.unwrap_or_default();
        if !status.is_success() {
            return Err(Error::Authentication {
                message: format!("login failed (HTTP {status}): {text}"),
            });
        }

        let value: Value = serde_json::from_str(&text).map_err(|_| Error::Authentication {
            message: format!("login response is not JSON: {text}"),
        })?;

        parse_session(&value).ok_or_else(|| Error::Authentication {
            message: format!("no session id in login response: {text}"),
        })
    }

    /// Probe whether the appliance still accepts `token`.
    ///
    /// A minimal authenticated GET against the summary endpoint.
    /// Returns `true` only on 2xx; any error, timeout, or non-2xx is
    /// `false`. Never fails -- the caller's fallback is a fresh login.
    pub async fn validate(&self, token: &SessionToken) -> bool {
        let Ok(url) = self.api_url(SUMMARY_PATH) else {
            return false;
        };
        debug!("GET {} (session probe)", url);

        match self
            .with_session(self.http.get(url), Some(token))
            .send()
            .await
        {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        }
    }

    // ── Statistics endpoints ────────────────────────────────────────

    /// Fetch the raw statistics summary payload.
    ///
    /// `GET /api/stats/summary`
    pub async fn get_summary(&self, session: Option<&SessionToken>) -> Result<Value, Error> {
        self.get_json(SUMMARY_PATH, session).await
    }

    /// Fetch the raw blocking-status payload.
    ///
    /// `GET /api/dns/blocking`
    pub async fn get_blocking(&self, session: Option<&SessionToken>) -> Result<Value, Error> {
        self.get_json(BLOCKING_PATH, session).await
    }

    async fn get_json(
        &self,
        path: &str,
        session: Option<&SessionToken>,
    ) -> Result<Value, Error> {
        let url = self.api_url(path)?;
        debug!("GET {}", url);

        let resp = self
            .with_session(self.http.get(url), session)
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = resp.status();
        let body = resp.text().await.map_err(Error::Transport)?;
        if !status.is_success() {
            return Err(Error::Api {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body,
        })
    }
}

/// Extract the session id (and CSRF token, when present) from a login
/// response. Top-level `sid` wins over the nested `session.sid` shape.
fn parse_session(value: &Value) -> Option<SessionToken> {
    let (sid, csrf) = if let Some(sid) = value.get("sid").and_then(Value::as_str) {
        (sid, value.get("csrf").and_then(Value::as_str))
    } else {
        let session = value.get("session")?;
        (
            session.get("sid").and_then(Value::as_str)?,
            session.get("csrf").and_then(Value::as_str),
        )
    };

    Some(SessionToken {
        sid: sid.to_owned(),
        csrf: csrf.map(str::to_owned),
        acquired_at: chrono::Utc::now(),
    })
}
