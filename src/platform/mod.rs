// TchtPath - platform/mod.rs
//
// Platform abstraction layer: backend selection and the per-OS store
// implementations.
// Dependencies: standard library, directories crate, winreg (Windows).
// Must NOT depend on: core.

pub mod backend;
pub mod config;
pub mod dconf;
pub mod gsettings;
pub mod pkg;
#[cfg(target_os = "windows")]
pub mod registry;
pub mod shell;

use backend::ConfigBackend;

/// Select the configuration backend for this host.
///
/// Selection happens once per process: Windows always uses the registry;
/// Unix prefers the GSettings daemon when its client is on PATH and falls
/// back to dconf otherwise; anything else gets the unsupported placeholder
/// whose operations fail hard.
#[cfg(target_os = "windows")]
pub fn select_backend() -> Box<dyn ConfigBackend> {
    tracing::debug!("Using the per-user registry store");
    Box::new(registry::WindowsRegistryBackend::new())
}

/// Select the configuration backend for this host.
///
/// Unix prefers the GSettings daemon when its client is on PATH; otherwise
/// the lower-level dconf store, whose client is installed on demand.
#[cfg(unix)]
pub fn select_backend() -> Box<dyn ConfigBackend> {
    if gsettings::GSettingsBackend::available() {
        tracing::debug!("Using the GSettings store");
        Box::new(gsettings::GSettingsBackend::new())
    } else {
        tracing::debug!("GSettings client not found; using the dconf store");
        Box::new(dconf::DconfBackend::new())
    }
}

/// Select the configuration backend for this host.
///
/// No known per-user configuration store on this OS family; operations on
/// the returned backend fail with an unsupported-platform error.
#[cfg(not(any(unix, target_os = "windows")))]
pub fn select_backend() -> Box<dyn ConfigBackend> {
    tracing::warn!(os = std::env::consts::OS, "No configuration store for this OS family");
    Box::new(backend::UnsupportedBackend::new(std::env::consts::OS))
}
