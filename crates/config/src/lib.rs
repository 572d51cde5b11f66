//! Layered configuration for the `takeout` tools.
//!
//! Layers, lowest priority first:
//!
//! 1. Built-in defaults.
//! 2. The per-user config directory (`config.toml`, `config.yaml` or
//!    `config.json`).
//! 3. An explicit config file.
//! 4. `TAKEOUT_*` environment variables, e.g. `TAKEOUT_TRUNCATION_LIMIT=47`.
//!
//! Command-line flags are applied on top by the binary.

pub mod error;

use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use exn::ResultExt;
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use serde::{Deserialize, Serialize};
use takeout_sidecar::{DEFAULT_MEDIA_EXTENSIONS, DEFAULT_TRUNCATION_LIMIT, MediaFilter, Resolver};

use crate::error::{ErrorKind, Result};

const ENV_PREFIX: &str = "TAKEOUT_";
const CONFIG_FILE_STEM: &str = "config";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// ExifTool executable, as a path or a name looked up on `PATH`.
    pub exiftool: Option<PathBuf>,
    /// Maximum sidecar name length the export was produced with.
    pub truncation_limit: usize,
    /// Files processed at once; `0` picks one per CPU.
    pub concurrency: usize,
    /// Where consumed sidecars are moved to.
    pub metadata_dir: Option<PathBuf>,
    /// Media file extensions, case-insensitive.
    pub extensions: Vec<String>,
}
impl Default for Config {
    fn default() -> Self {
        Self {
            exiftool: None,
            truncation_limit: DEFAULT_TRUNCATION_LIMIT,
            concurrency: 0,
            metadata_dir: None,
            extensions: DEFAULT_MEDIA_EXTENSIONS.iter().map(|ext| (*ext).to_string()).collect(),
        }
    }
}

impl Config {
    /// Loads and validates every layer. `explicit` is a config file passed on
    /// the command line.
    ///
    /// # Errors
    /// - [`ErrorKind::NotFound`] / [`ErrorKind::UnsupportedFormat`] for a bad
    ///   `explicit` path.
    /// - [`ErrorKind::Load`] if any layer fails to parse.
    /// - [`ErrorKind::Invalid`] if the merged result fails [`validate`](Self::validate).
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let user_dir = ProjectDirs::from("", "", "takeout").map(|dirs| dirs.config_dir().to_path_buf());
        Self::load_from(user_dir.as_deref(), explicit)
    }

    fn load_from(user_dir: Option<&Path>, explicit: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(dir) = user_dir {
            tracing::debug!(directory = %dir.display(), "Looking for user configuration");
            figment = figment
                .merge(Toml::file(dir.join(CONFIG_FILE_STEM).with_extension("toml")))
                .merge(Yaml::file(dir.join(CONFIG_FILE_STEM).with_extension("yaml")))
                .merge(Json::file(dir.join(CONFIG_FILE_STEM).with_extension("json")));
        }
        if let Some(path) = explicit {
            figment = merge_file(figment, path)?;
        }
        let config: Self = figment.merge(Env::prefixed(ENV_PREFIX)).extract().or_raise(|| ErrorKind::Load)?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    /// [`ErrorKind::Invalid`] naming the first offending key.
    pub fn validate(&self) -> Result<()> {
        Resolver::new(self.truncation_limit).or_raise(|| ErrorKind::Invalid {
            key: "truncation_limit",
            reason: format!("{} leaves no room for a file name", self.truncation_limit),
        })?;
        if self.filter().extensions().next().is_none() {
            exn::bail!(ErrorKind::Invalid { key: "extensions", reason: "no media extensions".to_string() });
        }
        Ok(())
    }

    /// # Errors
    /// [`ErrorKind::Invalid`] if the truncation limit is too small.
    pub fn resolver(&self) -> Result<Resolver> {
        Resolver::new(self.truncation_limit).or_raise(|| ErrorKind::Invalid {
            key: "truncation_limit",
            reason: self.truncation_limit.to_string(),
        })
    }

    pub fn filter(&self) -> MediaFilter {
        MediaFilter::new(&self.extensions)
    }

    /// [`concurrency`](Self::concurrency) with `0` resolved to the number of CPUs.
    pub fn effective_concurrency(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.concurrency)
            .or_else(|| std::thread::available_parallelism().ok())
            .unwrap_or(NonZeroUsize::MIN)
    }
}

fn merge_file(figment: Figment, path: &Path) -> Result<Figment> {
    if !path.is_file() {
        exn::bail!(ErrorKind::NotFound(path.to_path_buf()));
    }
    let extension = path.extension().and_then(|ext| ext.to_str()).map(str::to_ascii_lowercase);
    let figment = match extension.as_deref() {
        Some("toml") => figment.merge(Toml::file_exact(path)),
        Some("yaml" | "yml") => figment.merge(Yaml::file_exact(path)),
        Some("json") => figment.merge(Json::file_exact(path)),
        _ => exn::bail!(ErrorKind::UnsupportedFormat(path.to_path_buf())),
    };
    Ok(figment)
}
