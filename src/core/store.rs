// TchtPath - core/store.rs
//
// The install-path store: a thin, backend-agnostic component the CLI and
// other suite tooling talk to. All OS-specific behaviour lives behind the
// ConfigBackend trait object selected once at startup.

use crate::core::prompt::{self, PromptDefaults};
use crate::platform;
use crate::platform::backend::ConfigBackend;
use crate::util::error::Result;
use std::io::{BufRead, Write};
use std::path::PathBuf;

/// Persists and retrieves the suite's install path through the selected
/// platform backend.
pub struct PathStore {
    backend: Box<dyn ConfigBackend>,
}

impl PathStore {
    /// Build a store over an explicit backend (tests use MemoryBackend).
    pub fn new(backend: Box<dyn ConfigBackend>) -> Self {
        Self { backend }
    }

    /// Build a store over the backend selected for this host.
    pub fn from_platform() -> Self {
        Self::new(platform::select_backend())
    }

    /// Name of the underlying backend, for logs and status output.
    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// The stored install path, or None when unconfigured.
    ///
    /// Absence is never an error; only genuine store faults (or an
    /// unsupported OS family) err.
    pub fn get(&self) -> Result<Option<String>> {
        let value = self.backend.get()?;
        tracing::debug!(
            backend = self.backend.name(),
            configured = value.is_some(),
            "Install path read"
        );
        Ok(value)
    }

    /// Persist `path`, unconditionally overwriting any prior value.
    ///
    /// The path is not validated here; interactive callers go through the
    /// first-run flow, and `tchtpath set` validates non-emptiness itself.
    pub fn set(&mut self, path: &str) -> Result<()> {
        tracing::debug!(backend = self.backend.name(), path, "Persisting install path");
        self.backend.set(path)?;
        Ok(())
    }

    /// The stored install path, or the result of the interactive first-run
    /// flow when unconfigured. The flow persists its outcome before
    /// returning, so a subsequent `get` sees the same value.
    pub fn get_or_prompt<R: BufRead, W: Write>(
        &mut self,
        input: &mut R,
        output: &mut W,
        defaults: &PromptDefaults,
    ) -> Result<PathBuf> {
        if let Some(existing) = self.get()? {
            tracing::debug!(path = %existing, "Install path already configured");
            return Ok(PathBuf::from(existing));
        }
        prompt::run(input, output, self, defaults)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::backend::MemoryBackend;
    use std::io::Cursor;

    /// A configured store answers without consuming any input.
    #[test]
    fn get_or_prompt_short_circuits_when_configured() {
        let mut store = PathStore::new(Box::new(MemoryBackend::with_value("/opt/tcht")));
        let mut input = Cursor::new(Vec::new());
        let mut output = Vec::new();
        let defaults = PromptDefaults {
            default_install_dir: PathBuf::from("/unused"),
        };

        let path = store
            .get_or_prompt(&mut input, &mut output, &defaults)
            .unwrap();

        assert_eq!(path, PathBuf::from("/opt/tcht"));
        assert!(output.is_empty(), "no prompt should have been shown");
    }

    #[test]
    fn set_then_get_round_trips_through_the_store() {
        let mut store = PathStore::new(Box::new(MemoryBackend::new()));
        assert_eq!(store.get().unwrap(), None);
        store.set("/opt/tcht").unwrap();
        assert_eq!(store.get().unwrap().as_deref(), Some("/opt/tcht"));
    }
}
