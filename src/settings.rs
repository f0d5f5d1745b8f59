//! Settings assembly.
//!
//! Settings come from up to four layers, lowest precedence first:
//! - built-in defaults ([`SettingsLayer::defaults`])
//! - a TOML config file ([`SettingsLayer::load_file`])
//! - `FPRUNE_*` environment variables ([`SettingsLayer::from_env`])
//! - command line flags
//!
//! Every layer field is optional. [`SettingsLayer::merge`] overrides present
//! values only, and [`SettingsLayer::validate`] runs once on the merged result.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use serde::Deserialize;
use tracing_subscriber::EnvFilter;

use crate::error::PruneError;
use crate::matcher::{normalize_extension, MatchCriteria};
use crate::remover::RemovalMode;
use crate::retention::RetentionPolicy;
use crate::walker::ErrorPolicy;

/// Prefix shared by every environment variable the settings read.
pub const ENV_PREFIX: &str = "FPRUNE_";

/// Names the config file explicitly; see [`SettingsLayer::load_file`].
pub const CONFIG_ENV: &str = "FPRUNE_CONFIG";

const CONFIG_DIR: &str = "fprune";
const CONFIG_FILE: &str = "config.toml";

/// Log output format for the binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = PruneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "plain" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(PruneError::invalid("log_format", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    /// A tracing filter directive, e.g. `info` or `fprune=debug`.
    pub level:  String,
    pub format: LogFormat,
}

// ---------------------------------------------------------------------------
// SettingsLayer
// ---------------------------------------------------------------------------

/// One source's worth of settings. `None` means "not set here".
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SettingsLayer {
    pub paths:         Option<Vec<PathBuf>>,
    pub recursive:     Option<bool>,
    pub pattern:       Option<String>,
    pub extensions:    Option<Vec<String>>,
    pub age_days:      Option<i64>,
    pub keep:          Option<i64>,
    pub keep_oldest:   Option<bool>,
    pub remove:        Option<bool>,
    pub ignore_errors: Option<bool>,
    pub log_level:     Option<String>,
    pub log_format:    Option<String>,
}

impl SettingsLayer {
    /// The built-in bottom layer. Removal is off, so an unconfigured run is a
    /// dry run.
    pub fn defaults() -> Self {
        Self {
            paths:         None,
            recursive:     Some(false),
            pattern:       None,
            extensions:    None,
            age_days:      Some(0),
            keep:          Some(0),
            keep_oldest:   Some(false),
            remove:        Some(false),
            ignore_errors: Some(false),
            log_level:     Some("info".to_string()),
            log_format:    Some("text".to_string()),
        }
    }

    /// Overlay `over` on `self`; fields present in `over` win.
    pub fn merge(self, over: SettingsLayer) -> SettingsLayer {
        SettingsLayer {
            paths:         over.paths.or(self.paths),
            recursive:     over.recursive.or(self.recursive),
            pattern:       over.pattern.or(self.pattern),
            extensions:    over.extensions.or(self.extensions),
            age_days:      over.age_days.or(self.age_days),
            keep:          over.keep.or(self.keep),
            keep_oldest:   over.keep_oldest.or(self.keep_oldest),
            remove:        over.remove.or(self.remove),
            ignore_errors: over.ignore_errors.or(self.ignore_errors),
            log_level:     over.log_level.or(self.log_level),
            log_format:    over.log_format.or(self.log_format),
        }
    }

    // ── File layer ────────────────────────────────────────────────────────

    /// Parse a TOML config document.
    pub fn from_toml(path: &Path, text: &str) -> Result<Self, PruneError> {
        toml::from_str(text).map_err(|source| PruneError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load the config file layer.
    ///
    /// An `explicit` path must exist. Without one, the per-user
    /// `<config dir>/fprune/config.toml` is read if present, and an empty
    /// layer is returned otherwise.
    pub fn load_file(explicit: Option<&Path>) -> Result<Self, PruneError> {
        let path = match explicit {
            Some(p) => p.to_path_buf(),
            None => match default_config_path() {
                Some(p) if p.is_file() => p,
                _ => return Ok(Self::default()),
            },
        };

        let text = fs::read_to_string(&path).map_err(|source| PruneError::ConfigRead {
            path: path.clone(),
            source,
        })?;
        Self::from_toml(&path, &text)
    }

    // ── Environment layer ─────────────────────────────────────────────────

    /// Read the `FPRUNE_*` variables of the current process.
    pub fn from_env() -> Result<Self, PruneError> {
        Self::from_vars(std::env::vars())
    }

    /// Build a layer from `(name, value)` pairs. Names without the
    /// [`ENV_PREFIX`] and unknown names are ignored.
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self, PruneError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut layer = Self::default();
        for (key, value) in vars {
            let key = key.as_ref();
            let value = value.as_ref();
            let Some(name) = key.strip_prefix(ENV_PREFIX) else {
                continue;
            };
            match name {
                "PATHS" => layer.paths = Some(split_list(value).map(PathBuf::from).collect()),
                "RECURSIVE" => layer.recursive = Some(parse_bool(key, value)?),
                "PATTERN" => layer.pattern = Some(value.to_string()),
                "EXTENSIONS" => {
                    layer.extensions = Some(split_list(value).map(str::to_string).collect())
                }
                "AGE_DAYS" => layer.age_days = Some(parse_int(key, value)?),
                "KEEP" => layer.keep = Some(parse_int(key, value)?),
                "KEEP_OLDEST" => layer.keep_oldest = Some(parse_bool(key, value)?),
                "REMOVE" => layer.remove = Some(parse_bool(key, value)?),
                "IGNORE_ERRORS" => layer.ignore_errors = Some(parse_bool(key, value)?),
                "LOG_LEVEL" => layer.log_level = Some(value.to_string()),
                "LOG_FORMAT" => layer.log_format = Some(value.to_string()),
                _ => {}
            }
        }
        Ok(layer)
    }

    // ── Validation ────────────────────────────────────────────────────────

    /// Turn the fully merged layer into [`Settings`].
    ///
    /// # Errors
    ///
    /// [`PruneError::MissingPaths`] with no paths, and
    /// [`PruneError::InvalidValue`] for a negative keep count or age, an
    /// unknown log format or an unparsable log filter.
    pub fn validate(self) -> Result<Settings, PruneError> {
        let paths = self.paths.unwrap_or_default();
        if paths.is_empty() {
            return Err(PruneError::MissingPaths);
        }

        let keep = non_negative("keep", self.keep.unwrap_or(0))?;
        let keep = usize::try_from(keep)
            .map_err(|_| PruneError::invalid("keep", keep.to_string()))?;
        let age_days = non_negative("age_days", self.age_days.unwrap_or(0))?;

        let level = self.log_level.unwrap_or_else(|| "info".to_string());
        if EnvFilter::try_new(&level).is_err() {
            return Err(PruneError::invalid("log_level", level));
        }
        let format = match self.log_format {
            Some(f) => f.parse()?,
            None => LogFormat::default(),
        };

        Ok(Settings {
            paths,
            recursive: self.recursive.unwrap_or(false),
            pattern: self.pattern.unwrap_or_default(),
            extensions: self
                .extensions
                .unwrap_or_default()
                .iter()
                .filter_map(|e| normalize_extension(e))
                .collect(),
            age_days,
            keep,
            keep_oldest: self.keep_oldest.unwrap_or(false),
            remove: self.remove.unwrap_or(false),
            ignore_errors: self.ignore_errors.unwrap_or(false),
            log: LogSettings { level, format },
        })
    }
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// Validated settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Never empty.
    pub paths:         Vec<PathBuf>,
    pub recursive:     bool,
    /// Empty means no pattern.
    pub pattern:       String,
    /// Normalised: lower-case, no leading dot.
    pub extensions:    Vec<String>,
    pub age_days:      u64,
    pub keep:          usize,
    pub keep_oldest:   bool,
    pub remove:        bool,
    pub ignore_errors: bool,
    pub log:           LogSettings,
}

impl Settings {
    pub fn criteria(&self, now: SystemTime) -> MatchCriteria {
        MatchCriteria::new()
            .extensions(&self.extensions)
            .pattern(self.pattern.clone())
            .min_age_days(self.age_days)
            .now(now)
    }

    pub fn retention(&self) -> RetentionPolicy {
        RetentionPolicy::new(self.keep, self.keep_oldest)
    }

    pub fn removal(&self) -> RemovalMode {
        RemovalMode::new(self.remove, self.ignore_errors)
    }

    pub fn error_policy(&self) -> ErrorPolicy {
        ErrorPolicy::from_ignore_errors(self.ignore_errors)
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// `<config dir>/fprune/config.toml`, if the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(CONFIG_DIR).join(CONFIG_FILE))
}

fn split_list(value: &str) -> impl Iterator<Item = &str> {
    value.split(',').map(str::trim).filter(|s| !s.is_empty())
}

fn parse_bool(field: &str, value: &str) -> Result<bool, PruneError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(PruneError::invalid(field, value)),
    }
}

fn parse_int(field: &str, value: &str) -> Result<i64, PruneError> {
    value
        .trim()
        .parse()
        .map_err(|_| PruneError::invalid(field, value))
}

fn non_negative(field: &str, value: i64) -> Result<u64, PruneError> {
    u64::try_from(value).map_err(|_| PruneError::invalid(field, value.to_string()))
}
