use once_cell::sync::OnceCell;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    pub server: ServerConfig,
    pub upstream: UpstreamConfig,
    pub session: SessionConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ServerConfig {
    pub port: u16,
    /// Directory with the built frontend (`index.html`, wasm, assets).
    pub static_dir: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct UpstreamConfig {
    /// Pricing API base, e.g. `http://127.0.0.1:8000/api/v1`.
    pub api_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SessionConfig {
    pub secret: String,
    pub max_age_days: i64,
    pub cookie_name: String,
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[server]
port = 3000
static_dir = "dist"

[upstream]
api_url = "http://127.0.0.1:8000/api/v1"
timeout_secs = 30

[session]
secret = "change-me"
max_age_days = 30
cookie_name = "print_panel_session"
"#;

static CONFIG: OnceCell<Config> = OnceCell::new();

fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            paths.push(exe_dir.join("config.toml"));
        }
    }
    if let Ok(cwd) = std::env::current_dir() {
        paths.push(cwd.join("config.toml"));
    }
    paths
}

/// Load configuration from config.toml
///
/// Search order:
/// 1. Next to the executable
/// 2. Current working directory
/// 3. Embedded default config
///
/// `API_URL` and `SESSION_SECRET` override the file afterwards.
pub fn load_config() -> anyhow::Result<Config> {
    let mut config = None;
    for path in candidate_paths() {
        if path.exists() {
            tracing::info!("Loading config from: {}", path.display());
            let contents = std::fs::read_to_string(&path)?;
            config = Some(toml::from_str::<Config>(&contents)?);
            break;
        }
    }

    let config = match config {
        Some(config) => config,
        None => {
            tracing::info!("Using default embedded configuration");
            toml::from_str(DEFAULT_CONFIG)?
        }
    };

    Ok(apply_env_overrides(config, |key| std::env::var(key).ok()))
}

pub fn apply_env_overrides(mut config: Config, var: impl Fn(&str) -> Option<String>) -> Config {
    if let Some(url) = var("API_URL").filter(|v| !v.is_empty()) {
        config.upstream.api_url = url;
    }
    if let Some(secret) = var("SESSION_SECRET").filter(|v| !v.is_empty()) {
        config.session.secret = secret;
    }
    config
}

/// Loads the configuration once and keeps it for the process lifetime.
pub fn init() -> anyhow::Result<&'static Config> {
    let config = load_config()?;
    if config.session.secret == "change-me" {
        tracing::warn!("Session secret is the built-in default; set SESSION_SECRET");
    }
    Ok(CONFIG.get_or_init(|| config))
}

/// The process configuration; loads it on first use if `init` was not called.
pub fn get() -> &'static Config {
    CONFIG.get_or_init(|| {
        load_config().unwrap_or_else(|e| {
            tracing::error!("Failed to load config, using defaults: {}", e);
            Config::default()
        })
    })
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                port: 3000,
                static_dir: "dist".to_string(),
            },
            upstream: UpstreamConfig {
                api_url: "http://127.0.0.1:8000/api/v1".to_string(),
                timeout_secs: 30,
            },
            session: SessionConfig {
                secret: "change-me".to_string(),
                max_age_days: 30,
                cookie_name: "print_panel_session".to_string(),
            },
        }
    }
}

impl UpstreamConfig {
    /// `api_url` without a trailing slash, so paths can be appended.
    pub fn base_url(&self) -> &str {
        self.api_url.trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config: Result<Config, _> = toml::from_str(DEFAULT_CONFIG);
        assert!(config.is_ok());
        let config = config.unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.session.max_age_days, 30);
    }

    #[test]
    fn test_env_overrides() {
        let config = apply_env_overrides(Config::default(), |key| match key {
            "API_URL" => Some("https://api.example.ir/api/v1/".to_string()),
            "SESSION_SECRET" => Some(String::new()),
            _ => None,
        });
        assert_eq!(config.upstream.base_url(), "https://api.example.ir/api/v1");
        assert_eq!(config.session.secret, "change-me");
    }

    #[test]
    fn test_partial_file_is_rejected() {
        let result: Result<Config, _> = toml::from_str("[server]\nport = 8080\n");
        assert!(result.is_err());
    }
}
