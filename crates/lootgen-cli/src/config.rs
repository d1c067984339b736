//! Table source configuration from environment variables.

use anyhow::{Context, Result};
use lootgen_core::GameVersion;

pub const DEFAULT_GAME_VERSION: &str = "4.1.0.11";

#[derive(Debug, Clone)]
pub struct SourceConfig {
    /// Local export root laid out as `<version>/tables/<Table>.json`.
    pub tables_dir: Option<String>,
    /// Base URL serving the same layout.
    pub tables_url: Option<String>,
    pub game_version: GameVersion,
}

impl SourceConfig {
    pub fn from_env() -> Result<Self> {
        let game_version = std::env::var("LOOTGEN_GAME_VERSION")
            .unwrap_or_else(|_| DEFAULT_GAME_VERSION.to_string());
        if game_version.trim().is_empty() {
            anyhow::bail!("Invalid LOOTGEN_GAME_VERSION: empty");
        }

        Ok(Self {
            tables_dir: non_empty_var("LOOTGEN_TABLES_DIR"),
            tables_url: non_empty_var("LOOTGEN_TABLES_URL"),
            game_version: GameVersion::new(game_version),
        })
    }

    /// Apply command-line overrides. An explicit source replaces both
    /// configured locations.
    pub fn with_overrides(mut self, tables: Option<String>, game_version: Option<String>) -> Self {
        if let Some(tables) = tables {
            self.tables_dir = Some(tables);
            self.tables_url = None;
        }
        if let Some(version) = game_version {
            self.game_version = GameVersion::new(version);
        }
        self
    }

    /// The URI handed to the provider factory. A local directory wins over a URL.
    pub fn source_uri(&self) -> Result<&str> {
        self.tables_dir
            .as_deref()
            .or(self.tables_url.as_deref())
            .context("No table source configured (set LOOTGEN_TABLES_DIR, LOOTGEN_TABLES_URL or --tables)")
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
