// SPDX-FileCopyrightText: 2026 Vintra Studio
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model with strict deserialization.
//!
//! All sections use `deny_unknown_fields` so typos surface as errors instead
//! of being silently ignored, and every field has a compiled-in default so a
//! missing `vintra.toml` still yields a runnable configuration.

use serde::{Deserialize, Serialize};

/// Top-level configuration for the support backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct VintraConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub bot: BotConfig,
}

impl Default for VintraConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            storage: StorageConfig::default(),
            bot: BotConfig::default(),
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct ServerConfig {
    /// Bind address for the HTTP listener.
    pub host: String,
    /// Bind port for the HTTP listener.
    pub port: u16,
    /// Log level for the service tracing filter (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
        }
    }
}

/// SQLite storage settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct StorageConfig {
    /// Path to the SQLite database file. `:memory:` is accepted for tests.
    pub database_path: String,
    /// Enable WAL journal mode. Leave on outside of read-only media.
    pub wal_mode: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            wal_mode: true,
        }
    }
}

/// Bot engine settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct BotConfig {
    /// Language key for new sessions. Only "no" has a template set today.
    pub default_lang: String,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            default_lang: default_lang(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_database_path() -> String {
    "vintra.db".to_string()
}

fn default_lang() -> String {
    "no".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_runnable() {
        let config = VintraConfig::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.storage.database_path, "vintra.db");
        assert!(config.storage.wal_mode);
        assert_eq!(config.bot.default_lang, "no");
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config: VintraConfig = toml::from_str(
            r#"
[server]
port = 8080
"#,
        )
        .unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.bot.default_lang, "no");
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result = toml::from_str::<VintraConfig>(
            r#"
[server]
prot = 8080
"#,
        );
        assert!(result.is_err());
    }
}
