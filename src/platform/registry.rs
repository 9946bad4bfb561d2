// TchtPath - platform/registry.rs
//
// Windows registry store: a single string value `Path` under the per-user
// key HKCU\Software\TCHT, accessed through the winreg crate rather than
// reg.exe shell-outs.
//
// This module only exists on Windows targets (winreg is a target-gated
// dependency); platform/mod.rs gates the declaration.

use crate::platform::backend::ConfigBackend;
use crate::util::constants::{REGISTRY_KEY_PATH, REGISTRY_VALUE_NAME};
use crate::util::error::BackendError;
use std::io::ErrorKind;
use winreg::enums::HKEY_CURRENT_USER;
use winreg::RegKey;

/// Store backend over the per-user Windows registry.
#[derive(Debug, Default)]
pub struct WindowsRegistryBackend;

impl WindowsRegistryBackend {
    pub fn new() -> Self {
        Self
    }
}

impl ConfigBackend for WindowsRegistryBackend {
    fn name(&self) -> &'static str {
        "windows-registry"
    }

    fn get(&self) -> std::result::Result<Option<String>, BackendError> {
        read_value(REGISTRY_KEY_PATH, REGISTRY_VALUE_NAME)
    }

    fn set(&mut self, path: &str) -> std::result::Result<(), BackendError> {
        write_value(REGISTRY_KEY_PATH, REGISTRY_VALUE_NAME, path)?;
        tracing::info!(path, "Install path stored in registry");
        Ok(())
    }
}

// =============================================================================
// Raw key access
// =============================================================================

/// Read a string value from an HKCU subkey. A missing key or value is
/// "unconfigured" (Ok(None)); anything else is a registry fault.
fn read_value(
    key_path: &str,
    value_name: &str,
) -> std::result::Result<Option<String>, BackendError> {
    let hkcu = RegKey::predef(HKEY_CURRENT_USER);
    let key = match hkcu.open_subkey(key_path) {
        Ok(key) => key,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(BackendError::Registry {
                key: key_path.to_string(),
                operation: "open",
                source,
            })
        }
    };

    match key.get_value::<String, _>(value_name) {
        Ok(value) if value.is_empty() => Ok(None),
        Ok(value) => Ok(Some(value)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(source) => Err(BackendError::Registry {
            key: key_path.to_string(),
            operation: "read",
            source,
        }),
    }
}

/// Write a string value into an HKCU subkey, creating the key if absent.
fn write_value(
    key_path: &str,
    value_name: &str,
    value: &str,
) -> std::result::Result<(), BackendError> {
    let hkcu = RegKey::predef(HKEY_CURRENT_USER);
    let (key, _disposition) =
        hkcu.create_subkey(key_path)
            .map_err(|source| BackendError::Registry {
                key: key_path.to_string(),
                operation: "create",
                source,
            })?;

    key.set_value(value_name, &value)
        .map_err(|source| BackendError::Registry {
            key: key_path.to_string(),
            operation: "write",
            source,
        })
}

// =============================================================================
// Tests (Windows only: they exercise the real per-user registry under an
// isolated throwaway subkey)
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use winreg::enums::HKEY_CURRENT_USER;
    use winreg::RegKey;

    /// Throwaway subkey so tests never touch the real suite key.
    fn test_key() -> String {
        format!(r"Software\TchtPathTest-{}", std::process::id())
    }

    fn remove_test_key(key_path: &str) {
        let hkcu = RegKey::predef(HKEY_CURRENT_USER);
        let _ = hkcu.delete_subkey_all(key_path);
    }

    /// Writing creates the key when absent and the value reads back exactly.
    #[test]
    fn write_creates_key_and_round_trips() {
        let key_path = test_key();
        remove_test_key(&key_path);

        write_value(&key_path, "Path", r"C:\TCHT").unwrap();
        let read = read_value(&key_path, "Path").unwrap();
        remove_test_key(&key_path);

        assert_eq!(read.as_deref(), Some(r"C:\TCHT"));
    }

    /// A missing key is unconfigured, never an error.
    #[test]
    fn missing_key_reads_as_none() {
        let key_path = format!(r"{}-missing", test_key());
        assert_eq!(read_value(&key_path, "Path").unwrap(), None);
    }

    /// A second write replaces the first value.
    #[test]
    fn second_write_overwrites() {
        let key_path = format!(r"{}-overwrite", test_key());
        remove_test_key(&key_path);

        write_value(&key_path, "Path", r"C:\Old").unwrap();
        write_value(&key_path, "Path", r"C:\New").unwrap();
        let read = read_value(&key_path, "Path").unwrap();
        remove_test_key(&key_path);

        assert_eq!(read.as_deref(), Some(r"C:\New"));
    }
}
