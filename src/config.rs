//! Configuration system using TOML files.
//!
//! Config is stored in the OS-standard config directory:
//! - Windows: %APPDATA%\playlist-porter\config.toml
//! - macOS: ~/Library/Application Support/playlist-porter/config.toml
//! - Linux: ~/.config/playlist-porter/config.toml
//!
//! The config file is human-readable and editable; the `set-credentials`
//! command writes it. Credentials can also be supplied through environment
//! variables, which take precedence over the file: `SPOTIFY_CLIENT_ID`,
//! `SPOTIFY_CLIENT_SECRET`, `SPOTIFY_REDIRECT_URI` and `SPOTIFY_SCOPE`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// API credentials (keep separate for potential future encryption)
    pub credentials: Credentials,
}

/// Spotify API credentials
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Credentials {
    /// OAuth client ID (create an app at https://developer.spotify.com/dashboard)
    pub client_id: Option<String>,
    /// OAuth client secret
    pub client_secret: Option<String>,
    /// Redirect URI registered for the app
    pub redirect_uri: String,
    /// OAuth scopes requested on authorization
    pub scope: String,
}

impl Default for Credentials {
    fn default() -> Self {
        Self {
            client_id: None,
            client_secret: None,
            redirect_uri: "http://127.0.0.1:8888/callback".to_string(),
            scope: "playlist-modify-public playlist-modify-private".to_string(),
        }
    }
}

/// Credentials with every field present, ready for the auth module.
#[derive(Debug, Clone)]
pub struct ResolvedCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub scope: String,
}

impl Credentials {
    /// Merge the config file with environment overrides and require the
    /// fields that have no sensible default.
    pub fn resolve(&self) -> Result<ResolvedCredentials, ConfigError> {
        self.resolve_with_env(|var| std::env::var(var).ok())
    }

    /// As [`Credentials::resolve`], but against an injected environment
    /// lookup so tests never depend on the ambient process environment.
    fn resolve_with_env(
        &self,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<ResolvedCredentials, ConfigError> {
        let client_id = pick(env("SPOTIFY_CLIENT_ID"), self.client_id.clone())
            .ok_or(ConfigError::MissingCredential("client_id"))?;
        let client_secret = pick(env("SPOTIFY_CLIENT_SECRET"), self.client_secret.clone())
            .ok_or(ConfigError::MissingCredential("client_secret"))?;
        let redirect_uri = pick(env("SPOTIFY_REDIRECT_URI"), Some(self.redirect_uri.clone()))
            .ok_or(ConfigError::MissingCredential("redirect_uri"))?;
        let scope = pick(env("SPOTIFY_SCOPE"), Some(self.scope.clone()))
            .ok_or(ConfigError::MissingCredential("scope"))?;

        Ok(ResolvedCredentials {
            client_id,
            client_secret,
            redirect_uri,
            scope,
        })
    }
}

/// Environment wins over the config file; empty strings count as unset.
fn pick(env_value: Option<String>, fallback: Option<String>) -> Option<String> {
    env_value
        .filter(|v| !v.is_empty())
        .or_else(|| fallback.filter(|v| !v.is_empty()))
}

// ============================================================================
// Config File Operations
// ============================================================================

/// Get the config directory path
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("playlist-porter"))
}

/// Get the full path to the config file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load configuration from disk
///
/// Returns default config if file doesn't exist or can't be parsed.
/// Logs warnings but doesn't fail - we always return a usable config.
pub fn load() -> Config {
    let Some(path) = config_path() else {
        tracing::warn!("Could not determine config directory, using defaults");
        return Config::default();
    };

    if !path.exists() {
        tracing::info!("No config file found at {:?}, using defaults", path);
        return Config::default();
    }

    match std::fs::read_to_string(&path) {
        Ok(contents) => match toml::from_str(&contents) {
            Ok(config) => {
                tracing::info!("Loaded config from {:?}", path);
                config
            }
            Err(e) => {
                tracing::error!("Failed to parse config file {:?}: {}", path, e);
                tracing::warn!("Using default configuration");
                Config::default()
            }
        },
        Err(e) => {
            tracing::error!("Failed to read config file {:?}: {}", path, e);
            Config::default()
        }
    }
}

/// Save configuration to disk
///
/// Creates the config directory if it doesn't exist.
pub fn save(config: &Config) -> Result<(), ConfigError> {
    let dir = config_dir().ok_or(ConfigError::NoConfigDir)?;
    let path = dir.join("config.toml");

    // Ensure directory exists
    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::CreateDir(dir.clone(), e))?;

    // Serialize to pretty TOML
    let contents = toml::to_string_pretty(config).map_err(ConfigError::Serialize)?;

    // Write atomically (write to temp, then rename)
    let temp_path = path.with_extension("toml.tmp");
    std::fs::write(&temp_path, &contents).map_err(|e| ConfigError::Write(temp_path.clone(), e))?;
    std::fs::rename(&temp_path, &path)
        .map_err(|e| ConfigError::Rename(temp_path, path.clone(), e))?;

    tracing::info!("Saved config to {:?}", path);
    Ok(())
}

// ============================================================================
// Error Types
// ============================================================================

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Missing credential: {0} (set it in the config file or environment)")]
    MissingCredential(&'static str),

    #[error("Failed to create config directory {0}: {1}")]
    CreateDir(PathBuf, std::io::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(toml::ser::Error),

    #[error("Failed to write config to {0}: {1}")]
    Write(PathBuf, std::io::Error),

    #[error("Failed to rename temp file {0} to {1}: {2}")]
    Rename(PathBuf, PathBuf, std::io::Error),
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let toml = toml::to_string_pretty(&config).unwrap();
        assert!(toml.contains("[credentials]"));
        assert!(toml.contains("redirect_uri"));
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = Config::default();
        config.credentials.client_id = Some("id-123".to_string());
        config.credentials.client_secret = Some("secret-456".to_string());

        let toml = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&toml).unwrap();

        assert_eq!(parsed.credentials.client_id, Some("id-123".to_string()));
        assert_eq!(
            parsed.credentials.client_secret,
            Some("secret-456".to_string())
        );
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        // Config with only some fields
        let toml = r#"
[credentials]
client_id = "my-id"
"#;
        let config: Config = toml::from_str(toml).unwrap();

        // Specified field is set
        assert_eq!(config.credentials.client_id, Some("my-id".to_string()));

        // Other fields use defaults
        assert_eq!(
            config.credentials.redirect_uri,
            "http://127.0.0.1:8888/callback"
        );
        assert!(config.credentials.scope.contains("playlist-modify"));
    }

    /// Empty environment for hermetic resolve tests
    fn no_env(_var: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_resolve_requires_client_id() {
        let credentials = Credentials {
            client_secret: Some("secret".to_string()),
            ..Credentials::default()
        };

        let result = credentials.resolve_with_env(no_env);

        assert!(matches!(
            result,
            Err(ConfigError::MissingCredential("client_id"))
        ));
    }

    #[test]
    fn test_resolve_with_full_config() {
        let credentials = Credentials {
            client_id: Some("id".to_string()),
            client_secret: Some("secret".to_string()),
            ..Credentials::default()
        };

        let resolved = credentials.resolve_with_env(no_env).unwrap();

        assert_eq!(resolved.client_id, "id");
        assert_eq!(resolved.client_secret, "secret");
        assert_eq!(resolved.redirect_uri, "http://127.0.0.1:8888/callback");
    }

    #[test]
    fn test_resolve_environment_wins_over_file() {
        let credentials = Credentials {
            client_id: Some("file-id".to_string()),
            client_secret: Some("file-secret".to_string()),
            ..Credentials::default()
        };

        let resolved = credentials
            .resolve_with_env(|var| match var {
                "SPOTIFY_CLIENT_ID" => Some("env-id".to_string()),
                "SPOTIFY_SCOPE" => Some("user-library-read".to_string()),
                _ => None,
            })
            .unwrap();

        assert_eq!(resolved.client_id, "env-id");
        assert_eq!(resolved.client_secret, "file-secret");
        assert_eq!(resolved.scope, "user-library-read");
    }

    #[test]
    fn test_resolve_ignores_empty_env_values() {
        let credentials = Credentials {
            client_id: Some("file-id".to_string()),
            client_secret: Some("file-secret".to_string()),
            ..Credentials::default()
        };

        let resolved = credentials
            .resolve_with_env(|_| Some(String::new()))
            .unwrap();

        assert_eq!(resolved.client_id, "file-id");
    }
}
