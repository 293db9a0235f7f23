//! Lightweight configuration loader and path helpers.
//!
//! Uses Figment to merge `config.toml` + `config.<env>.toml` + `VECGRAPH_*`
//! env vars. Provides helpers to expand `~` and `${VAR}` and to resolve
//! relative paths against a known base directory.

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

pub struct Config {
    figment: Figment,
}

impl Config {
    pub fn load() -> Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());

        let mut figment = Figment::new().merge(Toml::file("config.toml"));
        match env_name.as_str() {
            "dev" | "development" => figment = figment.merge(Toml::file("config.dev.toml")),
            "prod" | "production" => figment = figment.merge(Toml::file("config.prod.toml")),
            "test" | "testing" => figment = figment.merge(Toml::file("config.test.toml")),
            _ => {}
        }
        figment = figment.merge(Env::prefixed("VECGRAPH_").split("__"));

        Ok(Self { figment })
    }

    pub fn get<T>(&self, key: &str) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| Error::InvalidConfig(format!("failed to get '{key}': {e}")))
    }

    /// Typed engine settings from the `[engine]` table, falling back to
    /// defaults when the table is absent.
    pub fn engine_settings(&self) -> EngineSettings {
        self.figment
            .extract_inner("engine")
            .unwrap_or_else(|_| EngineSettings::default())
    }
}

/// Settings the retrieval engine needs at construction time. Defaults mirror
/// the reference configuration: 384-dim embeddings, top-3 results.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineSettings {
    #[serde(default = "default_db_path")]
    pub db_path: String,
    #[serde(default = "default_table")]
    pub vector_table: String,
    #[serde(default = "default_dim")]
    pub dim: usize,
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            vector_table: default_table(),
            dim: default_dim(),
            top_k: default_top_k(),
        }
    }
}

fn default_db_path() -> String {
    "data/vectors".to_string()
}

fn default_table() -> String {
    "documents".to_string()
}

fn default_dim() -> usize {
    384
}

fn default_top_k() -> usize {
    3
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}

/// Resolve a possibly relative path against a given base directory after
/// expansion. If `p` is absolute, it's returned as-is.
pub fn resolve_with_base<S: AsRef<str>>(base: &Path, p: S) -> PathBuf {
    let p = expand_path(p);
    if p.is_absolute() {
        p
    } else {
        base.join(p)
    }
}
