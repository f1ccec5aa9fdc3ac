use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::calendar::Calendar;
use crate::form::{DateFallback, FormOptions};
use crate::list::DeletePolicy;
use crate::model::DEFAULT_TAG_SEPARATOR;

const APP_DOMAIN: &str = "io";
const APP_ORG: &str = "Countdowns";
const APP_NAME: &str = "countdowns";

pub struct ConfigLoader {
    paths: ConfigPaths,
}

impl ConfigLoader {
    pub fn discover() -> Result<Self> {
        let paths = ConfigPaths::discover()?;
        Ok(Self { paths })
    }

    pub fn with_paths(paths: ConfigPaths) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &ConfigPaths {
        &self.paths
    }

    pub fn load_or_init(&self) -> Result<AppConfig> {
        self.paths.ensure_directories()?;
        if !self.paths.config_file.exists() {
            let mut default_cfg = AppConfig::default();
            default_cfg.post_load();
            self.write_default_config(&default_cfg)?;
            return Ok(default_cfg);
        }

        self.load()
    }

    pub fn load(&self) -> Result<AppConfig> {
        let raw = fs::read_to_string(&self.paths.config_file)
            .with_context(|| format!("reading config {}", self.paths.config_file.display()))?;
        let mut cfg: AppConfig = toml::from_str(&raw).context("parsing config toml")?;
        cfg.post_load();
        Ok(cfg)
    }

    fn write_default_config(&self, cfg: &AppConfig) -> Result<()> {
        let toml = toml::to_string_pretty(cfg).context("serializing default config")?;
        let mut file = fs::File::create(&self.paths.config_file)
            .with_context(|| format!("creating config {}", self.paths.config_file.display()))?;
        file.write_all(toml.as_bytes())
            .context("writing default config")?;
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct ConfigPaths {
    pub config_dir: PathBuf,
    pub config_file: PathBuf,
}

impl ConfigPaths {
    pub fn discover() -> Result<Self> {
        if let Some(path) = env::var_os("COUNTDOWNS_CONFIG").map(PathBuf::from) {
            return Ok(Self::from_override(path));
        }

        let project_dirs = ProjectDirs::from(APP_DOMAIN, APP_ORG, APP_NAME)
            .context("resolving XDG project directories")?;
        let config_dir = project_dirs.config_dir().to_path_buf();
        Ok(Self {
            config_file: config_dir.join("config.toml"),
            config_dir,
        })
    }

    /// Accepts either a directory or a config file path.
    pub fn from_override(path: PathBuf) -> Self {
        if path.is_dir() || path.extension().is_none() {
            return Self {
                config_file: path.join("config.toml"),
                config_dir: path,
            };
        }
        let config_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        Self {
            config_dir,
            config_file: path,
        }
    }

    pub fn ensure_directories(&self) -> Result<()> {
        fs::create_dir_all(&self.config_dir).with_context(|| {
            format!(
                "creating application directory {}",
                self.config_dir.display()
            )
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Splits the free-text tag field into tags
    pub tag_separator: char,
    /// Offset from UTC used to read and build calendar dates
    pub utc_offset_minutes: i32,
    pub date_fallback: DateFallback,
    pub delete_policy: DeletePolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tag_separator: DEFAULT_TAG_SEPARATOR,
            utc_offset_minutes: 0,
            date_fallback: DateFallback::Abort,
            delete_policy: DeletePolicy::Proceed,
        }
    }
}

impl AppConfig {
    fn post_load(&mut self) {
        if Calendar::from_offset_minutes(self.utc_offset_minutes).is_err() {
            tracing::warn!(
                offset_minutes = self.utc_offset_minutes,
                "utc offset out of range in config, falling back to UTC"
            );
            self.utc_offset_minutes = 0;
        }
        if self.tag_separator.is_whitespace() {
            tracing::warn!(
                ?self.tag_separator,
                "whitespace tag separator in config, falling back to '{DEFAULT_TAG_SEPARATOR}'"
            );
            self.tag_separator = DEFAULT_TAG_SEPARATOR;
        }
    }

    pub fn calendar(&self) -> Calendar {
        Calendar::from_offset_minutes(self.utc_offset_minutes).unwrap_or_default()
    }

    pub fn form_options(&self) -> FormOptions {
        FormOptions {
            tag_separator: self.tag_separator,
            date_fallback: self.date_fallback,
        }
    }
}
