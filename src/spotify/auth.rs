//! Spotify OAuth authentication.
//!
//! Playlist modification needs a user-authorized token, so this module runs
//! the authorization-code flow: print the authorize URL, let the user paste
//! the redirect back, exchange the code for a token. The token (and its
//! refresh token) is cached as JSON in the OS config dir, so later runs
//! refresh silently instead of prompting again.

use std::io::Write;
use std::path::PathBuf;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::config::ResolvedCredentials;

/// Errors from the OAuth flow. All of them are fatal to the run.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Network error during authentication: {0}")]
    Network(String),

    #[error("Token endpoint rejected the request: {0}")]
    Token(String),

    #[error("Failed to parse token response: {0}")]
    Parse(String),

    #[error("Could not read or write the token cache: {0}")]
    Cache(String),

    #[error("Redirect URL carried no authorization code")]
    MissingCode,

    #[error("Failed to read input: {0}")]
    Prompt(String),
}

/// A token as cached on disk: the access token plus what we need to renew it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredToken {
    pub access_token: String,
    pub token_type: String,
    /// Expiry as epoch seconds
    pub expires_at: i64,
    pub refresh_token: Option<String>,
    pub scope: Option<String>,
}

impl StoredToken {
    /// Whether the token is still usable, with a safety margin for clock
    /// skew and in-flight requests.
    pub fn is_fresh(&self, now: i64) -> bool {
        now + 30 < self.expires_at
    }
}

/// Token endpoint response shape
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    token_type: String,
    expires_in: i64,
    refresh_token: Option<String>,
    scope: Option<String>,
}

/// OAuth client for the Spotify accounts service
pub struct SpotifyAuth {
    http_client: reqwest::Client,
    accounts_url: String,
    credentials: ResolvedCredentials,
    cache_path: Option<PathBuf>,
}

impl SpotifyAuth {
    /// Create an auth client; the token cache lives next to the config file.
    pub fn new(credentials: ResolvedCredentials) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            http_client,
            accounts_url: "https://accounts.spotify.com".to_string(),
            credentials,
            cache_path: crate::config::config_dir().map(|d| d.join("token.json")),
        }
    }

    /// Create an auth client for testing with custom endpoint and cache
    #[cfg(test)]
    pub fn with_endpoints(
        credentials: ResolvedCredentials,
        accounts_url: impl Into<String>,
        cache_path: Option<PathBuf>,
    ) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            accounts_url: accounts_url.into(),
            credentials,
            cache_path,
        }
    }

    /// Produce a usable access token.
    ///
    /// Tries, in order: a fresh cached token, a refresh with the cached
    /// refresh token, and finally the interactive authorization-code flow.
    pub async fn access_token(&self) -> Result<StoredToken, AuthError> {
        if let Some(cached) = self.load_cached()? {
            if cached.is_fresh(Utc::now().timestamp()) {
                tracing::debug!("using cached access token");
                return Ok(cached);
            }
            if let Some(ref refresh_token) = cached.refresh_token {
                match self.refresh(refresh_token).await {
                    Ok(mut token) => {
                        // The token endpoint may omit the refresh token on
                        // renewal; keep the one we already have
                        if token.refresh_token.is_none() {
                            token.refresh_token = cached.refresh_token.clone();
                        }
                        self.persist(&token)?;
                        tracing::info!("refreshed access token");
                        return Ok(token);
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "token refresh failed, re-authorizing");
                    }
                }
            }
        }

        let token = self.authorize_interactive().await?;
        self.persist(&token)?;
        Ok(token)
    }

    /// The URL the user must visit to grant access
    pub fn authorize_url(&self) -> String {
        format!(
            "{}/authorize?client_id={}&response_type=code&redirect_uri={}&scope={}",
            self.accounts_url,
            urlencoding::encode(&self.credentials.client_id),
            urlencoding::encode(&self.credentials.redirect_uri),
            urlencoding::encode(&self.credentials.scope),
        )
    }

    /// Run the interactive authorization-code flow
    async fn authorize_interactive(&self) -> Result<StoredToken, AuthError> {
        println!("Open this URL in a browser and grant access:");
        println!();
        println!("  {}", self.authorize_url());
        println!();

        let pasted = prompt("Paste the URL you were redirected to: ")?;
        let code = extract_code(&pasted)?;

        self.exchange_code(&code).await
    }

    /// Exchange an authorization code for a token
    async fn exchange_code(&self, code: &str) -> Result<StoredToken, AuthError> {
        let params = [
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", self.credentials.redirect_uri.as_str()),
        ];
        self.token_request(&params).await
    }

    /// Renew an expired token
    async fn refresh(&self, refresh_token: &str) -> Result<StoredToken, AuthError> {
        let params = [
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
        ];
        self.token_request(&params).await
    }

    async fn token_request(&self, params: &[(&str, &str)]) -> Result<StoredToken, AuthError> {
        let url = format!("{}/api/token", self.accounts_url);
        let auth_header = format!(
            "Basic {}",
            BASE64.encode(format!(
                "{}:{}",
                self.credentials.client_id, self.credentials.client_secret
            ))
        );

        let response = self
            .http_client
            .post(&url)
            .header(reqwest::header::AUTHORIZATION, auth_header)
            .form(params)
            .send()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::Token(format!(
                "HTTP {}: {}",
                status,
                body.chars().take(200).collect::<String>()
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| AuthError::Parse(e.to_string()))?;

        Ok(StoredToken {
            access_token: token.access_token,
            token_type: token.token_type,
            expires_at: Utc::now().timestamp() + token.expires_in,
            refresh_token: token.refresh_token,
            scope: token.scope,
        })
    }

    /// Load the cached token, if a cache exists and parses
    fn load_cached(&self) -> Result<Option<StoredToken>, AuthError> {
        let Some(ref path) = self.cache_path else {
            return Ok(None);
        };
        if !path.exists() {
            return Ok(None);
        }

        let contents =
            std::fs::read_to_string(path).map_err(|e| AuthError::Cache(e.to_string()))?;
        match serde_json::from_str(&contents) {
            Ok(token) => Ok(Some(token)),
            Err(e) => {
                // A corrupt cache should trigger re-auth, not a dead end
                tracing::warn!(error = %e, "ignoring unreadable token cache");
                Ok(None)
            }
        }
    }

    /// Write the token cache, creating the config dir if needed
    fn persist(&self, token: &StoredToken) -> Result<(), AuthError> {
        let Some(ref path) = self.cache_path else {
            return Ok(());
        };
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).map_err(|e| AuthError::Cache(e.to_string()))?;
        }
        let contents =
            serde_json::to_string_pretty(token).map_err(|e| AuthError::Cache(e.to_string()))?;
        std::fs::write(path, contents).map_err(|e| AuthError::Cache(e.to_string()))?;
        Ok(())
    }
}

/// Pull the `code` query parameter out of a pasted redirect URL.
///
/// A bare code (no URL around it) is accepted too, since that is what users
/// paste half the time.
fn extract_code(pasted: &str) -> Result<String, AuthError> {
    let pasted = pasted.trim();
    if pasted.is_empty() {
        return Err(AuthError::MissingCode);
    }

    let query = pasted.split_once('?').map(|(_, q)| q).unwrap_or(pasted);
    for pair in query.split('&') {
        if let Some((key, value)) = pair.split_once('=') {
            if key == "code" && !value.is_empty() {
                let decoded = urlencoding::decode(value)
                    .map_err(|_| AuthError::MissingCode)?
                    .into_owned();
                return Ok(decoded);
            }
        }
    }

    // No query parameters at all: treat the paste as the bare code
    if !pasted.contains('=') && !pasted.contains('/') {
        return Ok(pasted.to_string());
    }

    Err(AuthError::MissingCode)
}

fn prompt(message: &str) -> Result<String, AuthError> {
    print!("{message}");
    std::io::stdout()
        .flush()
        .map_err(|e| AuthError::Prompt(e.to_string()))?;

    let mut line = String::new();
    std::io::stdin()
        .read_line(&mut line)
        .map_err(|e| AuthError::Prompt(e.to_string()))?;
    Ok(line.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials() -> ResolvedCredentials {
        ResolvedCredentials {
            client_id: "client-id".to_string(),
            client_secret: "client-secret".to_string(),
            redirect_uri: "http://127.0.0.1:8888/callback".to_string(),
            scope: "playlist-modify-public playlist-modify-private".to_string(),
        }
    }

    #[test]
    fn test_authorize_url_contains_credentials_and_scope() {
        let auth = SpotifyAuth::with_endpoints(credentials(), "https://accounts.example", None);
        let url = auth.authorize_url();

        assert!(url.starts_with("https://accounts.example/authorize?"));
        assert!(url.contains("client_id=client-id"));
        assert!(url.contains("response_type=code"));
        assert!(url.contains("redirect_uri=http%3A%2F%2F127.0.0.1%3A8888%2Fcallback"));
        assert!(url.contains("scope=playlist-modify-public%20playlist-modify-private"));
    }

    #[test]
    fn test_extract_code_from_redirect_url() {
        let code =
            extract_code("http://127.0.0.1:8888/callback?code=AQBx-hV29&state=xyz").unwrap();
        assert_eq!(code, "AQBx-hV29");
    }

    #[test]
    fn test_extract_code_from_bare_code() {
        let code = extract_code("  AQBx-hV29  ").unwrap();
        assert_eq!(code, "AQBx-hV29");
    }

    #[test]
    fn test_extract_code_missing() {
        assert!(matches!(
            extract_code("http://127.0.0.1:8888/callback?error=access_denied"),
            Err(AuthError::MissingCode)
        ));
        assert!(matches!(extract_code(""), Err(AuthError::MissingCode)));
    }

    #[test]
    fn test_token_freshness_margin() {
        let token = StoredToken {
            access_token: "tok".to_string(),
            token_type: "Bearer".to_string(),
            expires_at: 1000,
            refresh_token: None,
            scope: None,
        };

        assert!(token.is_fresh(900));
        // Inside the 30 second safety margin counts as stale
        assert!(!token.is_fresh(980));
        assert!(!token.is_fresh(1100));
    }

    #[test]
    fn test_stored_token_roundtrip() {
        let token = StoredToken {
            access_token: "access".to_string(),
            token_type: "Bearer".to_string(),
            expires_at: 1234567890,
            refresh_token: Some("refresh".to_string()),
            scope: Some("playlist-modify-public".to_string()),
        };

        let json = serde_json::to_string(&token).unwrap();
        let parsed: StoredToken = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.access_token, "access");
        assert_eq!(parsed.refresh_token.as_deref(), Some("refresh"));
        assert_eq!(parsed.expires_at, 1234567890);
    }
}
