// TchtPath - platform/backend.rs
//
// The configuration-store capability boundary.
//
// Every platform store (Windows registry, GSettings, dconf) implements
// ConfigBackend, so the core layer never branches on OS family at runtime.
// MemoryBackend implements the same contract against a plain field, which
// is what the end-to-end tests substitute to avoid touching real registries
// and settings daemons.

use crate::util::error::BackendError;

/// A per-user key-value store holding the suite's install path.
///
/// Contract:
///   - `get` returns Ok(None) for "unconfigured"; it only errs on genuine
///     store faults, never on absence.
///   - `set` unconditionally overwrites the prior value. Validation of the
///     path (non-empty, whitespace policy) is the caller's concern.
pub trait ConfigBackend {
    /// Short stable name for logs and status output.
    fn name(&self) -> &'static str;

    /// Read the stored install path.
    fn get(&self) -> std::result::Result<Option<String>, BackendError>;

    /// Persist `path`, overwriting any prior value.
    fn set(&mut self, path: &str) -> std::result::Result<(), BackendError>;
}

// =============================================================================
// Unsupported platform
// =============================================================================

/// Placeholder backend for OS families with no known configuration store.
/// Every operation fails with UnsupportedPlatform.
#[derive(Debug)]
pub struct UnsupportedBackend {
    os: String,
}

impl UnsupportedBackend {
    pub fn new(os: &str) -> Self {
        Self { os: os.to_string() }
    }
}

impl ConfigBackend for UnsupportedBackend {
    fn name(&self) -> &'static str {
        "unsupported"
    }

    fn get(&self) -> std::result::Result<Option<String>, BackendError> {
        Err(BackendError::UnsupportedPlatform {
            os: self.os.clone(),
        })
    }

    fn set(&mut self, _path: &str) -> std::result::Result<(), BackendError> {
        Err(BackendError::UnsupportedPlatform {
            os: self.os.clone(),
        })
    }
}

// =============================================================================
// In-memory fake
// =============================================================================

/// In-memory backend holding the value in a plain field.
///
/// Used by tests to exercise the store and prompt flow without shelling out
/// or writing the registry; behaves like a store that round-trips values
/// exactly.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    value: Option<String>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend pre-seeded with a stored value.
    pub fn with_value(value: &str) -> Self {
        Self {
            value: Some(value.to_string()),
        }
    }
}

impl ConfigBackend for MemoryBackend {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn get(&self) -> std::result::Result<Option<String>, BackendError> {
        Ok(self.value.clone().filter(|v| !v.is_empty()))
    }

    fn set(&mut self, path: &str) -> std::result::Result<(), BackendError> {
        self.value = Some(path.to_string());
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// A fresh store is unconfigured, not an error.
    #[test]
    fn fresh_store_reads_as_none() {
        let backend = MemoryBackend::new();
        assert_eq!(backend.get().unwrap(), None);
    }

    /// get after set returns exactly the stored value.
    #[test]
    fn set_then_get_round_trips() {
        let mut backend = MemoryBackend::new();
        backend.set("/opt/tcht").unwrap();
        assert_eq!(backend.get().unwrap().as_deref(), Some("/opt/tcht"));
    }

    /// A second set replaces the first value entirely.
    #[test]
    fn second_set_overwrites_first() {
        let mut backend = MemoryBackend::new();
        backend.set("/opt/old").unwrap();
        backend.set("/opt/new").unwrap();
        assert_eq!(backend.get().unwrap().as_deref(), Some("/opt/new"));
    }

    /// An empty stored value reads back as unconfigured.
    #[test]
    fn empty_value_reads_as_none() {
        let mut backend = MemoryBackend::new();
        backend.set("").unwrap();
        assert_eq!(backend.get().unwrap(), None);
    }

    /// The unsupported placeholder fails both operations.
    #[test]
    fn unsupported_backend_fails_both_operations() {
        let mut backend = UnsupportedBackend::new("plan9");
        assert!(matches!(
            backend.get(),
            Err(crate::util::error::BackendError::UnsupportedPlatform { .. })
        ));
        assert!(matches!(
            backend.set("/opt/tcht"),
            Err(crate::util::error::BackendError::UnsupportedPlatform { .. })
        ));
    }
}
