use std::path::PathBuf;

use clap::Parser;
use fprune::SettingsLayer;

#[derive(Parser, Debug)]
#[command(
    name = "fprune",
    about = "Delete all but the newest (or oldest) N matching files under each path",
    version
)]
pub struct Cli {
    /// Root paths to scan
    pub paths: Vec<PathBuf>,

    /// Descend into subdirectories
    #[arg(
        short,
        long,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        value_name = "BOOL"
    )]
    pub recursive: Option<bool>,

    /// Only files whose name contains this text (case-sensitive)
    #[arg(short, long)]
    pub pattern: Option<String>,

    /// Only files with one of these extensions (repeatable, comma-separated)
    #[arg(short = 'e', long = "ext", value_delimiter = ',', value_name = "EXT")]
    pub extensions: Vec<String>,

    /// Only files last modified at least this many days ago (0 disables)
    #[arg(short, long, value_name = "DAYS", allow_negative_numbers = true)]
    pub age_days: Option<i64>,

    /// Number of matching files to keep per path
    #[arg(short, long, value_name = "N", allow_negative_numbers = true)]
    pub keep: Option<i64>,

    /// Sort oldest-first before choosing what to prune
    #[arg(
        long,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        value_name = "BOOL"
    )]
    pub keep_oldest: Option<bool>,

    /// Actually delete files (otherwise only report what would be removed)
    #[arg(
        long,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        value_name = "BOOL"
    )]
    pub remove: Option<bool>,

    /// Skip unreadable entries and keep going after a failed removal
    #[arg(
        long,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        value_name = "BOOL"
    )]
    pub ignore_errors: Option<bool>,

    /// Config file (defaults to $FPRUNE_CONFIG, then the per-user config.toml)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log filter, e.g. "info" or "fprune=debug"
    #[arg(long, value_name = "FILTER")]
    pub log_level: Option<String>,

    /// Log format: text or json
    #[arg(long, value_name = "FORMAT")]
    pub log_format: Option<String>,
}

impl Cli {
    /// The command line's settings layer. Unset flags stay `None` so lower
    /// layers show through.
    pub fn layer(&self) -> SettingsLayer {
        SettingsLayer {
            paths:         (!self.paths.is_empty()).then(|| self.paths.clone()),
            recursive:     self.recursive,
            pattern:       self.pattern.clone(),
            extensions:    (!self.extensions.is_empty()).then(|| self.extensions.clone()),
            age_days:      self.age_days,
            keep:          self.keep,
            keep_oldest:   self.keep_oldest,
            remove:        self.remove,
            ignore_errors: self.ignore_errors,
            log_level:     self.log_level.clone(),
            log_format:    self.log_format.clone(),
        }
    }
}
