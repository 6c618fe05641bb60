// SPDX-FileCopyrightText: 2026 Lettera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./lettera.toml` > `~/.config/lettera/lettera.toml` > `/etc/lettera/lettera.toml`
//! with environment variable overrides via `LETTERA_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::LetteraConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/lettera/lettera.toml` (system-wide)
/// 3. `~/.config/lettera/lettera.toml` (user XDG config)
/// 4. `./lettera.toml` (local directory)
/// 5. `LETTERA_*` environment variables
pub fn load_config() -> Result<LetteraConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(LetteraConfig::default()))
        .merge(Toml::file("/etc/lettera/lettera.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("lettera/lettera.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("lettera.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup).
///
/// Used for testing and for loading explicit config content.
pub fn load_config_from_str(toml_content: &str) -> Result<LetteraConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(LetteraConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<LetteraConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(LetteraConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names. For example, `LETTERA_STORAGE_DATABASE_PATH`
/// must map to `storage.database_path`, not `storage.database.path`.
fn env_provider() -> Env {
    Env::prefixed("LETTERA_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: LETTERA_YANDEXGPT_API_KEY -> "yandexgpt_api_key"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("app_", "app.", 1)
            .replacen("server_", "server.", 1)
            .replacen("storage_", "storage.", 1)
            .replacen("yandexgpt_", "yandexgpt.", 1);
        mapped.into()
    })
}
