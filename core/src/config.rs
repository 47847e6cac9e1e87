use std::fs;
use std::path::{Path, PathBuf};

use crate::{Result, TtsError};

/// Process-wide configuration, built once at start and passed down explicitly.
#[derive(Clone, Debug, Default)]
pub struct VoxConfig {
    pub gemini: GeminiConfig,
    pub server: ServerConfig,
    pub output: OutputConfig,
}

/// Remote speech service settings
#[derive(Clone, Debug)]
pub struct GeminiConfig {
    pub base_url: String,
    pub model: String,
    pub api_key: Option<String>,
    pub request_timeout_ms: u64,
}

/// HTTP bind address for the server binary
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Where synthesized files are written.
///
/// The CLI falls back to the working directory when unset; the server only
/// persists copies when a directory is configured.
#[derive(Clone, Debug, Default)]
pub struct OutputConfig {
    pub dir: Option<PathBuf>,
}

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-preview-tts";

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            base_url: std::env::var("GEMINI_BASE_URL")
                .ok()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model: std::env::var("GEMINI_TTS_MODEL")
                .ok()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            api_key: std::env::var("GOOGLE_API_KEY")
                .ok()
                .filter(|s| !s.trim().is_empty()),
            request_timeout_ms: std::env::var("GEMINI_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(60_000),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: std::env::var("VOX_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("VOX_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),
        }
    }
}

impl OutputConfig {
    pub fn from_env() -> Self {
        Self {
            dir: std::env::var("VOX_OUTPUT_DIR")
                .ok()
                .filter(|s| !s.is_empty())
                .map(PathBuf::from),
        }
    }
}

impl VoxConfig {
    /// Defaults and environment only.
    pub fn from_env() -> Self {
        Self {
            gemini: GeminiConfig::default(),
            server: ServerConfig::default(),
            output: OutputConfig::from_env(),
        }
    }

    /// Load configuration from a TOML file (path via VOX_CONFIG or ./vox.toml),
    /// overlaying values onto env-driven defaults.
    pub fn load() -> Self {
        let path = std::env::var("VOX_CONFIG").unwrap_or_else(|_| "vox.toml".into());
        Self::load_from(Path::new(&path))
    }

    pub fn load_from(path: &Path) -> Self {
        let base = Self::from_env();
        if !path.exists() {
            tracing::info!(target: "config", path = %path.display(), "No TOML config found; using defaults/env");
            return base;
        }
        match fs::read_to_string(path) {
            Ok(s) => match toml::from_str::<VoxToml>(&s) {
                Ok(t) => t.overlay(base),
                Err(e) => {
                    tracing::warn!(target: "config", error = %e, "Failed to parse TOML; using defaults");
                    base
                }
            },
            Err(e) => {
                tracing::warn!(target: "config", error = %e, "Failed to read TOML; using defaults");
                base
            }
        }
    }

    /// Fail fast when the credential is missing.
    pub fn validate(&self) -> Result<()> {
        if self.gemini.api_key.is_none() {
            return Err(TtsError::ConfigurationError(
                "GOOGLE_API_KEY is not set (environment, .env or [gemini].api_key)".into(),
            ));
        }
        if self.gemini.base_url.trim().is_empty() || self.gemini.model.trim().is_empty() {
            return Err(TtsError::ConfigurationError(
                "gemini base_url and model must not be empty".into(),
            ));
        }
        Ok(())
    }
}

// =========================
// TOML overlay definitions
// =========================

#[derive(Debug, Clone, Default, serde::Deserialize)]
struct VoxToml {
    pub gemini: Option<GeminiToml>,
    pub server: Option<ServerToml>,
    pub output: Option<OutputToml>,
}

impl VoxToml {
    fn overlay(self, mut base: VoxConfig) -> VoxConfig {
        if let Some(g) = self.gemini {
            g.apply(&mut base.gemini);
        }
        if let Some(s) = self.server {
            s.apply(&mut base.server);
        }
        if let Some(o) = self.output {
            o.apply(&mut base.output);
        }
        base
    }
}

#[derive(Debug, Clone, Default, serde::Deserialize)]
struct GeminiToml {
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub api_key: Option<String>,
    pub request_timeout_ms: Option<u64>,
}
impl GeminiToml {
    fn apply(self, g: &mut GeminiConfig) {
        if let Some(x) = self.base_url {
            g.base_url = x;
        }
        if let Some(x) = self.model {
            g.model = x;
        }
        if let Some(x) = self.api_key.filter(|k| !k.trim().is_empty()) {
            g.api_key = Some(x);
        }
        if let Some(x) = self.request_timeout_ms {
            g.request_timeout_ms = x;
        }
    }
}

#[derive(Debug, Clone, Default, serde::Deserialize)]
struct ServerToml {
    pub host: Option<String>,
    pub port: Option<u16>,
}
impl ServerToml {
    fn apply(self, s: &mut ServerConfig) {
        if let Some(x) = self.host {
            s.host = x;
        }
        if let Some(x) = self.port {
            s.port = x;
        }
    }
}

#[derive(Debug, Clone, Default, serde::Deserialize)]
struct OutputToml {
    pub dir: Option<PathBuf>,
}
impl OutputToml {
    fn apply(self, o: &mut OutputConfig) {
        if let Some(x) = self.dir {
            o.dir = Some(x);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> VoxConfig {
        VoxConfig {
            gemini: GeminiConfig {
                base_url: DEFAULT_BASE_URL.into(),
                model: DEFAULT_MODEL.into(),
                api_key: None,
                request_timeout_ms: 60_000,
            },
            server: ServerConfig {
                host: "127.0.0.1".into(),
                port: 8000,
            },
            output: OutputConfig::default(),
        }
    }

    #[test]
    fn toml_overlay_replaces_only_given_keys() {
        let t: VoxToml = toml::from_str(
            r#"
            [gemini]
            api_key = "from-toml"
            request_timeout_ms = 5000

            [server]
            port = 9090

            [output]
            dir = "/tmp/vox"
            "#,
        )
        .unwrap();
        let cfg = t.overlay(base());
        assert_eq!(cfg.gemini.api_key.as_deref(), Some("from-toml"));
        assert_eq!(cfg.gemini.request_timeout_ms, 5000);
        assert_eq!(cfg.gemini.model, DEFAULT_MODEL);
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.port, 9090);
        assert_eq!(cfg.output.dir, Some(PathBuf::from("/tmp/vox")));
    }

    #[test]
    fn blank_toml_key_does_not_clear_credential() {
        let t: VoxToml = toml::from_str("[gemini]\napi_key = \"  \"\n").unwrap();
        let mut b = base();
        b.gemini.api_key = Some("env-key".into());
        let cfg = t.overlay(b);
        assert_eq!(cfg.gemini.api_key.as_deref(), Some("env-key"));
    }

    #[test]
    fn validate_requires_api_key() {
        let mut cfg = base();
        assert!(matches!(
            cfg.validate(),
            Err(TtsError::ConfigurationError(_))
        ));
        cfg.gemini.api_key = Some("k".into());
        assert!(cfg.validate().is_ok());
    }
}
