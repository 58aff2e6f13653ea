// SPDX-FileCopyrightText: 2026 Vintra Studio
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./vintra.toml` > `~/.config/vintra/vintra.toml` > `/etc/vintra/vintra.toml`
//! with environment variable overrides via `VINTRA_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::VintraConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/vintra/vintra.toml` (system-wide)
/// 3. `~/.config/vintra/vintra.toml` (user XDG config)
/// 4. `./vintra.toml` (local directory)
/// 5. `VINTRA_*` environment variables
pub fn load_config() -> Result<VintraConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(VintraConfig::default()))
        .merge(Toml::file("/etc/vintra/vintra.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("vintra/vintra.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("vintra.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env vars).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<VintraConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(VintraConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<VintraConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(VintraConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` instead of `Env::split("_")` so underscore-containing
/// key names stay intact: `VINTRA_STORAGE_DATABASE_PATH` must map to
/// `storage.database_path`, not `storage.database.path`.
fn env_provider() -> Env {
    Env::prefixed("VINTRA_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: VINTRA_STORAGE_DATABASE_PATH -> "storage_database_path"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("server_", "server.", 1)
            .replacen("storage_", "storage.", 1)
            .replacen("bot_", "bot.", 1);
        mapped.into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toml_string_overrides_defaults() {
        let config = load_config_from_str(
            r#"
[server]
host = "0.0.0.0"
port = 9000

[storage]
database_path = "/var/lib/vintra/vintra.db"
"#,
        )
        .unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.storage.database_path, "/var/lib/vintra/vintra.db");
        // Untouched section keeps its default.
        assert_eq!(config.bot.default_lang, "no");
    }

    #[test]
    fn unknown_key_in_string_fails() {
        let result = load_config_from_str(
            r#"
[bot]
default_language = "no"
"#,
        );
        assert!(result.is_err());
    }
}
