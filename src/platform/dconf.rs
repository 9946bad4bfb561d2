// TchtPath - platform/dconf.rs
//
// dconf-backed store: the lower-level Unix fallback used when the
// GSettings client is not on PATH.
//
// Values live under the fixed key /tcht/path and round-trip as raw strings
// (no quote handling, unlike the gsettings client output). The client
// binary is installed on demand through the package-manager probe; a host
// with no client and no recognised package manager degrades to an
// always-unconfigured store with logged warnings, never an error.

use crate::platform::backend::ConfigBackend;
use crate::platform::pkg::{self, ClientPackage};
use crate::platform::shell;
use crate::util::constants::{DCONF_BIN, DCONF_KEY_PATH};
use crate::util::error::BackendError;
use std::io::ErrorKind;

/// Store backend speaking to dconf through its client binary.
#[derive(Debug, Default)]
pub struct DconfBackend;

impl DconfBackend {
    pub fn new() -> Self {
        Self
    }

    /// True when the dconf client can be spawned on this host.
    pub fn available() -> bool {
        shell::binary_available(DCONF_BIN)
    }
}

impl ConfigBackend for DconfBackend {
    fn name(&self) -> &'static str {
        "dconf"
    }

    fn get(&self) -> std::result::Result<Option<String>, BackendError> {
        if !Self::available() {
            if let Err(e) = pkg::ensure_client(DCONF_BIN, ClientPackage::Dconf) {
                tracing::warn!(error = %e, "dconf client unavailable; reporting unconfigured");
                return Ok(None);
            }
        }

        let out = match shell::run_capture(DCONF_BIN, &["read", DCONF_KEY_PATH]) {
            Ok(out) => out,
            Err(e) => {
                tracing::debug!(error = %e, "dconf read could not run");
                return Ok(None);
            }
        };

        if !out.success {
            tracing::debug!(
                status = ?out.status,
                stderr = %out.stderr.trim(),
                "dconf read reported no value"
            );
            return Ok(None);
        }

        Ok(read_output_value(&out.stdout))
    }

    fn set(&mut self, path: &str) -> std::result::Result<(), BackendError> {
        if let Err(e) = pkg::ensure_client(DCONF_BIN, ClientPackage::Dconf) {
            tracing::warn!(error = %e, "dconf client unavailable; value not persisted");
            return Ok(());
        }

        let args = ["write", DCONF_KEY_PATH, path];
        match shell::run_capture(DCONF_BIN, &args) {
            Ok(out) if out.success => {
                tracing::info!(path, "Install path stored via dconf");
                Ok(())
            }
            Ok(out) => Err(BackendError::CommandFailed {
                command: shell::render_command(DCONF_BIN, &args),
                status: out.status,
                stderr: out.stderr,
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::warn!("dconf client no longer on PATH; value not persisted");
                Ok(())
            }
            Err(e) => Err(BackendError::Unavailable {
                backend: "dconf",
                reason: e.to_string(),
            }),
        }
    }
}

// =============================================================================
// Helpers
// =============================================================================

/// Normalise `dconf read` output: strip the trailing newline and map an
/// empty line (unset key) to None.
fn read_output_value(stdout: &str) -> Option<String> {
    let value = stdout.trim_end_matches(['\r', '\n']);
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

// =============================================================================
// Tests
// =============================================================================
