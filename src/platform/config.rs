// TchtPath - platform/config.rs
//
// Platform path resolution and config.toml loading with startup validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance. The config file is optional: a missing file
// is the normal first-run case and yields defaults silently; a malformed
// file degrades to defaults with an accumulated warning rather than
// aborting startup.

use crate::util::constants;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for TchtPath configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/tchtpath/ or %APPDATA%\TchtPath\)
    pub config_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to the current directory if platform dirs cannot be
    /// determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            tracing::debug!(config = %config_dir.display(), "Platform paths resolved");
            Self { config_dir }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            Self {
                config_dir: PathBuf::from("."),
            }
        }
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility -- a newer
/// config file can be used with an older binary without crashing.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[paths]` section.
    pub paths: PathsSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[paths]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct PathsSection {
    /// Overrides the platform default proposed by the first-run flow.
    pub default_install_dir: Option<String>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
}

/// Validated application configuration derived from `config.toml`.
///
/// Invalid values produce actionable warnings and fall back to defaults.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Site override for the suggested install directory.
    pub default_install_dir: Option<PathBuf>,

    /// Logging level string (consumed before tracing is initialised).
    pub log_level: Option<String>,
}

/// Load and validate `config.toml` from the given config directory.
///
/// Returns `AppConfig` with validated values and a list of non-fatal
/// warnings. If the file does not exist, returns defaults with no warnings
/// (first-run). If the file is unparseable, returns defaults with an error
/// warning so the user is informed but the tool still runs.
pub fn load_config(config_dir: &Path) -> (AppConfig, Vec<String>) {
    let config_path = config_dir.join(constants::CONFIG_FILE_NAME);
    let mut warnings: Vec<String> = Vec::new();

    if !config_path.exists() {
        return (AppConfig::default(), warnings);
    }

    let content = match std::fs::read_to_string(&config_path) {
        Ok(c) => c,
        Err(e) => {
            warnings.push(format!(
                "Could not read config file '{}': {e}. Using defaults.",
                config_path.display()
            ));
            return (AppConfig::default(), warnings);
        }
    };

    let raw: RawConfig = match toml::from_str(&content) {
        Ok(r) => r,
        Err(e) => {
            warnings.push(format!(
                "Failed to parse config file '{}': {e}. Using defaults.",
                config_path.display()
            ));
            return (AppConfig::default(), warnings);
        }
    };

    let mut config = AppConfig::default();

    // -- Paths: default_install_dir --
    if let Some(ref dir) = raw.paths.default_install_dir {
        if dir.trim().is_empty() {
            warnings.push(
                "[paths] default_install_dir is empty. Using the platform default.".to_string(),
            );
        } else {
            config.default_install_dir = Some(PathBuf::from(dir));
        }
    }

    // -- Logging: level --
    if let Some(ref level) = raw.logging.level {
        let valid = ["error", "warn", "info", "debug", "trace"];
        if valid.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.clone());
        } else {
            warnings.push(format!(
                "[logging] level = \"{level}\" is not recognised. \
                 Valid values: error, warn, info, debug, trace. Using default (info).",
            ));
        }
    }

    (config, warnings)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, content: &str) {
        std::fs::write(dir.path().join(constants::CONFIG_FILE_NAME), content).unwrap();
    }

    /// A missing config file is first-run: defaults, no warnings.
    #[test]
    fn missing_file_yields_defaults_silently() {
        let dir = TempDir::new().unwrap();
        let (config, warnings) = load_config(dir.path());
        assert!(config.default_install_dir.is_none());
        assert!(config.log_level.is_none());
        assert!(warnings.is_empty());
    }

    #[test]
    fn valid_file_populates_overrides() {
        let dir = TempDir::new().unwrap();
        write_config(
            &dir,
            "[paths]\ndefault_install_dir = \"/srv/tcht\"\n[logging]\nlevel = \"debug\"\n",
        );
        let (config, warnings) = load_config(dir.path());
        assert_eq!(
            config.default_install_dir.as_deref(),
            Some(std::path::Path::new("/srv/tcht"))
        );
        assert_eq!(config.log_level.as_deref(), Some("debug"));
        assert!(warnings.is_empty());
    }

    /// A malformed file degrades to defaults with a warning, never a panic.
    #[test]
    fn malformed_file_degrades_with_warning() {
        let dir = TempDir::new().unwrap();
        write_config(&dir, "not valid toml {{{{");
        let (config, warnings) = load_config(dir.path());
        assert!(config.default_install_dir.is_none());
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let dir = TempDir::new().unwrap();
        write_config(&dir, "[future_section]\nsome_key = 1\n");
        let (_, warnings) = load_config(dir.path());
        assert!(warnings.is_empty());
    }

    #[test]
    fn invalid_log_level_warns_and_falls_back() {
        let dir = TempDir::new().unwrap();
        write_config(&dir, "[logging]\nlevel = \"loud\"\n");
        let (config, warnings) = load_config(dir.path());
        assert!(config.log_level.is_none());
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn empty_install_dir_override_warns_and_falls_back() {
        let dir = TempDir::new().unwrap();
        write_config(&dir, "[paths]\ndefault_install_dir = \"  \"\n");
        let (config, warnings) = load_config(dir.path());
        assert!(config.default_install_dir.is_none());
        assert_eq!(warnings.len(), 1);
    }
}
