//! Env-driven configuration for the service and library.
//!
//! Values are read from the process environment; `dotenv` is loaded on demand
//! by the binaries. Defaults are provided for convenience during development.
use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use crate::error::{AppError, AppResult};

pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";
pub const DEFAULT_OLLAMA_MODEL: &str = "llama3.2:1b";
pub const DEFAULT_API_IP: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
pub const DEFAULT_API_PORT: u16 = 8080;
pub const DEFAULT_OLLAMA_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct Config {
    pub ollama_url: String,
    pub ollama_model: String,
    pub use_llm: bool,
    pub ollama_timeout: Duration,
    pub api_host: String,
    pub api_port: String,
    pub vocabulary_path: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            ollama_url: DEFAULT_OLLAMA_URL.to_string(),
            ollama_model: DEFAULT_OLLAMA_MODEL.to_string(),
            use_llm: true,
            ollama_timeout: Duration::from_secs(DEFAULT_OLLAMA_TIMEOUT_SECS),
            api_host: DEFAULT_API_IP.to_string(),
            api_port: DEFAULT_API_PORT.to_string(),
            vocabulary_path: None,
        }
    }
}

impl Config {
    pub fn dotenv_load() {
        dotenv::dotenv().ok();
    }

    pub fn new() -> AppResult<Self> {
        Config::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key lookup, using defaults for missing keys.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();
        let ollama_timeout = match lookup("OLLAMA_TIMEOUT_SECS") {
            Some(raw) => parse_timeout_secs(&raw)?,
            None => defaults.ollama_timeout,
        };
        Ok(Config {
            ollama_url: lookup("OLLAMA_URL")
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or(defaults.ollama_url),
            ollama_model: lookup("OLLAMA_MODEL").unwrap_or(defaults.ollama_model),
            use_llm: lookup("USE_LLM")
                .map(|v| parse_enabled(&v))
                .unwrap_or(defaults.use_llm),
            ollama_timeout,
            api_host: lookup("API_HOST").unwrap_or(defaults.api_host),
            api_port: lookup("PORT").unwrap_or(defaults.api_port),
            vocabulary_path: lookup("VOCABULARY_PATH").filter(|p| !p.trim().is_empty()),
        })
    }

    /// Listening address; an unparseable host or port falls back to the default.
    pub fn socket_addr(&self) -> SocketAddr {
        let ip: IpAddr = self.api_host.parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid API_HOST '{}', falling back to {}", self.api_host, DEFAULT_API_IP);
            DEFAULT_API_IP
        });
        let port: u16 = self.api_port.parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid PORT '{}', falling back to {}", self.api_port, DEFAULT_API_PORT);
            DEFAULT_API_PORT
        });
        SocketAddr::new(ip, port)
    }

    pub fn log_effective(&self) {
        tracing::info!(
            ollama_url = %self.ollama_url,
            ollama_model = %self.ollama_model,
            use_llm = self.use_llm,
            ollama_timeout_secs = self.ollama_timeout.as_secs(),
            api_host = %self.api_host,
            api_port = %self.api_port,
            vocabulary_path = self.vocabulary_path.as_deref().unwrap_or("<built-in>"),
            "Loaded configuration"
        );
    }
}

/// `USE_LLM` is on only for a case-insensitive `"true"`.
pub fn parse_enabled(raw: &str) -> bool {
    raw.eq_ignore_ascii_case("true")
}

fn parse_timeout_secs(raw: &str) -> AppResult<Duration> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(AppError::Config(format!(
            "OLLAMA_TIMEOUT_SECS must be a positive integer, got '{}'",
            raw
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn use_llm_flag_is_case_insensitive() {
        assert!(parse_enabled("true"));
        assert!(parse_enabled("TRUE"));
        assert!(!parse_enabled(" true"));
        assert!(!parse_enabled("false"));
        assert!(!parse_enabled("1"));
        assert!(!parse_enabled(""));
    }

    #[test]
    fn timeout_must_be_positive_integer() {
        assert_eq!(parse_timeout_secs("12").unwrap(), Duration::from_secs(12));
        assert!(matches!(parse_timeout_secs("0"), Err(AppError::Config(_))));
        assert!(matches!(parse_timeout_secs("soon"), Err(AppError::Config(_))));
    }

    #[test]
    fn defaults_match_documented_values() {
        let cfg = Config::default();
        assert_eq!(cfg.ollama_url, "http://localhost:11434");
        assert_eq!(cfg.ollama_model, "llama3.2:1b");
        assert!(cfg.use_llm);
        assert_eq!(cfg.api_host, "0.0.0.0");
        assert_eq!(cfg.api_port, "8080");
        assert_eq!(cfg.ollama_timeout, Duration::from_secs(30));
        assert!(cfg.vocabulary_path.is_none());
    }

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_lookup_gives_defaults() {
        let cfg = Config::from_lookup(|_| None).unwrap();
        assert_eq!(cfg.ollama_url, DEFAULT_OLLAMA_URL);
        assert!(cfg.use_llm);
        assert_eq!(cfg.socket_addr(), "0.0.0.0:8080".parse::<SocketAddr>().unwrap());
    }

    #[test]
    fn lookup_values_override_defaults() {
        let cfg = Config::from_lookup(lookup_from(&[
            ("OLLAMA_URL", "http://x:1/"),
            ("OLLAMA_MODEL", "mistral"),
            ("USE_LLM", "False"),
            ("OLLAMA_TIMEOUT_SECS", "5"),
            ("API_HOST", "127.0.0.1"),
            ("PORT", "9000"),
            ("VOCABULARY_PATH", "/etc/vocab.json"),
        ]))
        .unwrap();
        assert_eq!(cfg.ollama_url, "http://x:1");
        assert_eq!(cfg.ollama_model, "mistral");
        assert!(!cfg.use_llm);
        assert_eq!(cfg.ollama_timeout, Duration::from_secs(5));
        assert_eq!(cfg.vocabulary_path.as_deref(), Some("/etc/vocab.json"));
        assert_eq!(cfg.socket_addr(), "127.0.0.1:9000".parse::<SocketAddr>().unwrap());
    }

    #[test]
    fn use_llm_is_only_on_for_true() {
        let on = Config::from_lookup(lookup_from(&[("USE_LLM", "TRUE")])).unwrap();
        assert!(on.use_llm);
        let off = Config::from_lookup(lookup_from(&[("USE_LLM", "yes")])).unwrap();
        assert!(!off.use_llm);
    }

    #[test]
    fn blank_vocabulary_path_is_unset() {
        let cfg = Config::from_lookup(lookup_from(&[("VOCABULARY_PATH", "  ")])).unwrap();
        assert!(cfg.vocabulary_path.is_none());
    }

    #[test]
    fn bad_timeout_in_lookup_is_an_error() {
        let err = Config::from_lookup(lookup_from(&[("OLLAMA_TIMEOUT_SECS", "-3")])).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn invalid_host_and_port_fall_back_to_defaults() {
        let cfg = Config::from_lookup(lookup_from(&[("API_HOST", "not-an-ip"), ("PORT", "eighty")])).unwrap();
        let addr = cfg.socket_addr();
        assert_eq!(addr.ip(), DEFAULT_API_IP);
        assert_eq!(addr.port(), DEFAULT_API_PORT);

        let cfg = Config::from_lookup(lookup_from(&[("PORT", "70000")])).unwrap();
        assert_eq!(cfg.socket_addr().port(), 8080);
    }
}
