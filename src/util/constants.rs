// TchtPath - util/constants.rs
//
// Single source of truth for all named constants: store key paths, helper
// binary names, and per-platform default install locations.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "TchtPath";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "TchtPath";

/// Current application version (updated by release script).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Windows registry
// =============================================================================

/// Per-user registry key (under HKEY_CURRENT_USER) holding the suite state.
pub const REGISTRY_KEY_PATH: &str = r"Software\TCHT";

/// Name of the string value storing the install path.
pub const REGISTRY_VALUE_NAME: &str = "Path";

// =============================================================================
// GSettings
// =============================================================================

/// GSettings schema id for the suite.
pub const GSETTINGS_SCHEMA_ID: &str = "tc.ht";

/// Key within the schema storing the install path (type `s`).
pub const GSETTINGS_KEY: &str = "path";

/// GSettings client binary.
pub const GSETTINGS_BIN: &str = "gsettings";

/// Schema compiler binary. A freshly written schema definition is invisible
/// to the client until compiled.
pub const SCHEMA_COMPILER_BIN: &str = "glib-compile-schemas";

/// File name of the generated schema definition.
pub const SCHEMA_FILE_NAME: &str = "tc.ht.gschema.xml";

/// Environment variable pointing the GSettings runtime at a schema directory.
pub const SCHEMA_DIR_ENV: &str = "GSETTINGS_SCHEMA_DIR";

/// User schema directory, relative to the platform data directory
/// (e.g. ~/.local/share/glib-2.0/schemas on Linux).
pub const USER_SCHEMA_SUBDIR: &str = "glib-2.0/schemas";

// =============================================================================
// dconf
// =============================================================================

/// dconf client binary.
pub const DCONF_BIN: &str = "dconf";

/// Fixed dconf key path storing the install path as a raw string.
pub const DCONF_KEY_PATH: &str = "/tcht/path";

// =============================================================================
// Default install locations
// =============================================================================

/// Suggested install directory on Windows.
pub const DEFAULT_INSTALL_DIR_WINDOWS: &str = r"C:\TCHT";

/// Suggested install directory on Unix systems other than macOS.
pub const DEFAULT_INSTALL_DIR_UNIX: &str = "/home/TCHT";

/// Suggested install subdirectory under the user's Documents folder on macOS.
pub const DEFAULT_INSTALL_SUBDIR_MACOS: &str = "TCHT";

// =============================================================================
// Privilege elevation
// =============================================================================

/// Binary used to run package-manager installs with elevated privileges.
pub const ELEVATION_BIN: &str = "sudo";

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";

// =============================================================================
// Logging
// =============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";
