//! Engine configuration read from the environment.

use std::path::PathBuf;

use super::tts::DEFAULT_TTS_TIMEOUT_SECS;

pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";
pub const DEFAULT_SERVER_PORT: u16 = 8080;
pub const DEFAULT_SQLITE_PATH: &str = "echoes.db";

/// Which document store backs sessions and locations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    Sqlite { path: PathBuf },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub server_host: String,
    pub server_port: u16,
    pub store: StoreBackend,
    /// Speech synthesis endpoint. Narration audio is disabled when unset.
    pub tts_base_url: Option<String>,
    pub tts_timeout_secs: u64,
    /// `*` or a comma-separated origin list. No CORS layer when unset.
    pub cors_allowed_origins: Option<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            server_host: DEFAULT_SERVER_HOST.to_string(),
            server_port: DEFAULT_SERVER_PORT,
            store: StoreBackend::Memory,
            tts_base_url: None,
            tts_timeout_secs: DEFAULT_TTS_TIMEOUT_SECS,
            cors_allowed_origins: None,
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source. Unparseable values fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Self::default();

        let server_host = var("SERVER_HOST").unwrap_or(defaults.server_host);

        let server_port = match var("SERVER_PORT").or_else(|| var("PORT")) {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!(value = %raw, "Invalid server port, using default");
                defaults.server_port
            }),
            None => defaults.server_port,
        };

        let store = match var("STORE_BACKEND").map(|v| v.to_ascii_lowercase()) {
            Some(backend) if backend == "sqlite" => StoreBackend::Sqlite {
                path: PathBuf::from(
                    var("SQLITE_PATH").unwrap_or_else(|| DEFAULT_SQLITE_PATH.to_string()),
                ),
            },
            Some(backend) if backend == "memory" => StoreBackend::Memory,
            Some(other) => {
                tracing::warn!(value = %other, "Unknown STORE_BACKEND, using in-memory store");
                StoreBackend::Memory
            }
            None => StoreBackend::Memory,
        };

        let tts_timeout_secs = match var("TTS_TIMEOUT_SECS") {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!(value = %raw, "Invalid TTS_TIMEOUT_SECS, using default");
                defaults.tts_timeout_secs
            }),
            None => defaults.tts_timeout_secs,
        };

        Self {
            server_host,
            server_port,
            store,
            tts_base_url: var("TTS_BASE_URL"),
            tts_timeout_secs,
            cors_allowed_origins: var("CORS_ALLOWED_ORIGINS"),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> EngineConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        EngineConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn empty_environment_yields_defaults() {
        let config = config_from(&[]);
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.bind_address(), "0.0.0.0:8080");
    }

    #[test]
    fn port_falls_back_to_generic_port_variable() {
        let config = config_from(&[("PORT", "9000")]);
        assert_eq!(config.server_port, 9000);

        let config = config_from(&[("SERVER_PORT", "7000"), ("PORT", "9000")]);
        assert_eq!(config.server_port, 7000);
    }

    #[test]
    fn invalid_numbers_use_defaults() {
        let config = config_from(&[("SERVER_PORT", "eighty"), ("TTS_TIMEOUT_SECS", "-1")]);
        assert_eq!(config.server_port, DEFAULT_SERVER_PORT);
        assert_eq!(config.tts_timeout_secs, DEFAULT_TTS_TIMEOUT_SECS);
    }

    #[test]
    fn sqlite_backend_reads_path() {
        let config = config_from(&[("STORE_BACKEND", "SQLite"), ("SQLITE_PATH", "/tmp/game.db")]);
        assert_eq!(
            config.store,
            StoreBackend::Sqlite {
                path: PathBuf::from("/tmp/game.db")
            }
        );

        let config = config_from(&[("STORE_BACKEND", "sqlite")]);
        assert_eq!(
            config.store,
            StoreBackend::Sqlite {
                path: PathBuf::from(DEFAULT_SQLITE_PATH)
            }
        );
    }

    #[test]
    fn blank_tts_url_disables_audio() {
        assert_eq!(config_from(&[("TTS_BASE_URL", "  ")]).tts_base_url, None);
        assert_eq!(
            config_from(&[("TTS_BASE_URL", "http://tts:5002")]).tts_base_url,
            Some("http://tts:5002".to_string())
        );
    }

    #[test]
    fn cors_origins_are_passed_through() {
        assert_eq!(config_from(&[]).cors_allowed_origins, None);
        assert_eq!(
            config_from(&[("CORS_ALLOWED_ORIGINS", "http://localhost:5173")]).cors_allowed_origins,
            Some("http://localhost:5173".to_string())
        );
    }
}
