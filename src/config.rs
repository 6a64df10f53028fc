//! `schemagen.toml` configuration.
//!
//! ```toml
//! [stubs]
//! dir = "stubs/schemagen"
//!
//! [migrations]
//! path = "database/migrations"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::builder::SyntaxBuilder;
use crate::error::{GeneratorError, GeneratorResult};
use crate::templates::Templates;

/// Project config file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "schemagen.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub stubs: StubsConfig,
    pub migrations: MigrationsConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StubsConfig {
    /// Directory whose `*.stub` files override the built-in stubs.
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MigrationsConfig {
    /// Where migration files belong, relative to the project root.
    pub path: PathBuf,
}

impl Default for MigrationsConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("database/migrations"),
        }
    }
}

impl Config {
    /// Parse config from TOML text.
    pub fn from_toml(content: &str) -> GeneratorResult<Self> {
        toml::from_str(content).map_err(|e| GeneratorError::Config(e.to_string()))
    }

    /// Read config from a file.
    pub fn from_file(path: &Path) -> GeneratorResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Load the first config found: `explicit`, `./schemagen.toml`, then
    /// the user config directory. Defaults when none exists.
    pub fn discover(explicit: Option<&Path>) -> GeneratorResult<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        let candidates = [
            Some(PathBuf::from(CONFIG_FILE)),
            dirs::config_dir().map(|d| d.join("schemagen").join("config.toml")),
        ];
        for path in candidates.into_iter().flatten() {
            if path.is_file() {
                debug!(path = %path.display(), "using config");
                return Self::from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Stubs from the configured directory, or the built-ins.
    pub fn templates(&self) -> GeneratorResult<Templates> {
        match &self.stubs.dir {
            Some(dir) => Templates::load(dir),
            None => Ok(Templates::default()),
        }
    }

    /// A builder over the configured stubs.
    pub fn builder(&self) -> GeneratorResult<SyntaxBuilder> {
        Ok(SyntaxBuilder::new(self.templates()?))
    }
}
