//! Configuration loading and management.

use std::fmt;
use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Days covered by `dozyly chart` when `--days` is not given.
pub const DEFAULT_CHART_DAYS: u32 = 7;

/// Application configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the database file.
    pub database_path: PathBuf,
    /// Default chart window in days.
    pub chart_days: u32,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("database_path", &self.database_path)
            .field("chart_days", &self.chart_days)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs_data_path().unwrap_or_else(|| PathBuf::from("."));
        Self {
            database_path: data_dir.join("dozyly.db"),
            chart_days: DEFAULT_CHART_DAYS,
        }
    }
}

impl Config {
    /// Loads configuration from default locations, then `config_path` if given.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (DOZYLY_*)
        figment = figment.merge(Env::prefixed("DOZYLY_"));

        figment.extract()
    }
}

/// Returns the platform-specific config directory for dozyly.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("dozyly"))
}

/// Returns the platform-specific data directory for dozyly.
///
/// On Linux: `~/.local/share/dozyly`
pub fn dirs_data_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("dozyly"))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_dirs_data_path_ends_with_dozyly() {
        let path = dirs_data_path().unwrap();
        assert_eq!(path.file_name().unwrap(), "dozyly");
    }

    #[test]
    fn test_default_config_uses_data_dir_for_db() {
        let config = Config::default();
        let data_dir = dirs_data_path().unwrap();
        assert_eq!(config.database_path, data_dir.join("dozyly.db"));
        assert_eq!(config.chart_days, DEFAULT_CHART_DAYS);
    }

    #[test]
    fn test_config_file_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"database_path = "/tmp/elsewhere.db""#).unwrap();
        writeln!(file, "chart_days = 30").unwrap();
        file.flush().unwrap();

        let config = Config::load_from(Some(file.path())).unwrap();
        assert_eq!(config.database_path, PathBuf::from("/tmp/elsewhere.db"));
        assert_eq!(config.chart_days, 30);
    }

    #[test]
    fn test_config_file_may_set_a_subset_of_keys() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "chart_days = 14").unwrap();
        file.flush().unwrap();

        let config = Config::load_from(Some(file.path())).unwrap();
        assert_eq!(config.chart_days, 14);
    }
}
