// TchtPath - platform/gsettings.rs
//
// GSettings-backed store: the preferred Unix backend whenever the
// `gsettings` client is on PATH.
//
// Reads are a plain `gsettings get`; the client prints string values in
// GVariant form ('...'), so surrounding quotes are stripped before the
// value is returned. Writes are more involved because the tc.ht schema is
// not part of any distro package: the schema definition is rendered to the
// user schema directory, compiled with glib-compile-schemas (installed via
// the package manager if missing), and GSETTINGS_SCHEMA_DIR is pointed at
// that directory before the `gsettings set` call.
//
// The rendered schema's <default> and the value passed to `set` are both
// the caller's argument, so the persisted value always equals what the
// caller asked for.

use crate::platform::backend::ConfigBackend;
use crate::platform::pkg::{self, ClientPackage};
use crate::platform::shell;
use crate::util::constants::{
    GSETTINGS_BIN, GSETTINGS_KEY, GSETTINGS_SCHEMA_ID, SCHEMA_COMPILER_BIN, SCHEMA_DIR_ENV,
    SCHEMA_FILE_NAME, USER_SCHEMA_SUBDIR,
};
use crate::util::error::BackendError;
use directories::BaseDirs;
use std::io::ErrorKind;
use std::path::PathBuf;

/// Store backend speaking to the GSettings daemon through its client binary.
#[derive(Debug, Default)]
pub struct GSettingsBackend;

impl GSettingsBackend {
    pub fn new() -> Self {
        Self
    }

    /// True when the gsettings client can be spawned on this host.
    pub fn available() -> bool {
        shell::binary_available(GSETTINGS_BIN)
    }
}

impl ConfigBackend for GSettingsBackend {
    fn name(&self) -> &'static str {
        "gsettings"
    }

    fn get(&self) -> std::result::Result<Option<String>, BackendError> {
        let out = match shell::run_capture(
            GSETTINGS_BIN,
            &["get", GSETTINGS_SCHEMA_ID, GSETTINGS_KEY],
        ) {
            Ok(out) => out,
            Err(e) => {
                // Absence of a stored value is never an error for reads,
                // and a client that vanished since selection counts as
                // absence too.
                tracing::debug!(error = %e, "gsettings get could not run");
                return Ok(None);
            }
        };

        if !out.success {
            // Typically "No such schema": the suite has never been
            // configured on this host.
            tracing::debug!(
                status = ?out.status,
                stderr = %out.stderr.trim(),
                "gsettings get reported no value"
            );
            return Ok(None);
        }

        let value = strip_quotes(&out.stdout).to_string();
        if value.is_empty() {
            Ok(None)
        } else {
            Ok(Some(value))
        }
    }

    fn set(&mut self, path: &str) -> std::result::Result<(), BackendError> {
        // The schema compiler is a separate package from the client on most
        // distros. Install failure is a warning by contract; the compile
        // step below will tell us definitively whether we can proceed.
        if let Err(e) = pkg::ensure_client(SCHEMA_COMPILER_BIN, ClientPackage::SchemaCompiler) {
            tracing::warn!(error = %e, "Schema compiler install failed; attempting write anyway");
        }

        let schema_dir = user_schema_dir().ok_or_else(|| BackendError::Unavailable {
            backend: "gsettings",
            reason: "cannot determine the user schema directory (no home directory)".to_string(),
        })?;

        std::fs::create_dir_all(&schema_dir).map_err(|source| BackendError::SchemaWrite {
            path: schema_dir.clone(),
            source,
        })?;

        let schema_path = schema_dir.join(SCHEMA_FILE_NAME);
        std::fs::write(&schema_path, schema_xml(path)).map_err(|source| {
            BackendError::SchemaWrite {
                path: schema_path.clone(),
                source,
            }
        })?;
        tracing::debug!(path = %schema_path.display(), "Schema definition written");

        compile_schemas(&schema_dir);

        // Point this process (and its children) at the freshly compiled
        // schema so the set call resolves tc.ht without a session restart.
        std::env::set_var(SCHEMA_DIR_ENV, &schema_dir);

        let args = ["set", GSETTINGS_SCHEMA_ID, GSETTINGS_KEY, path];
        match shell::run_capture(GSETTINGS_BIN, &args) {
            Ok(out) if out.success => {
                tracing::info!(path, "Install path stored via gsettings");
                Ok(())
            }
            Ok(out) => Err(BackendError::CommandFailed {
                command: shell::render_command(GSETTINGS_BIN, &args),
                status: out.status,
                stderr: out.stderr,
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                // Client disappeared between selection and write. The value
                // is not persisted; report and carry on like the rest of
                // the degraded-store paths.
                tracing::warn!("gsettings client no longer on PATH; value not persisted");
                Ok(())
            }
            Err(source) => Err(BackendError::SchemaWrite {
                path: schema_path,
                source,
            }),
        }
    }
}

// =============================================================================
// Helpers
// =============================================================================

/// Resolve the per-user schema directory from the platform data directory.
fn user_schema_dir() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.data_dir().join(USER_SCHEMA_SUBDIR))
}

/// Compile all schemas in `dir`. Best-effort: a failure here is logged and
/// the subsequent `gsettings set` decides whether the store is usable.
fn compile_schemas(dir: &std::path::Path) {
    let dir_str = dir.to_string_lossy();
    match shell::run_capture(SCHEMA_COMPILER_BIN, &[dir_str.as_ref()]) {
        Ok(out) if out.success => {
            tracing::debug!(dir = %dir.display(), "Schemas compiled");
        }
        Ok(out) => {
            tracing::warn!(
                dir = %dir.display(),
                status = ?out.status,
                stderr = %out.stderr.trim(),
                "Schema compilation failed"
            );
        }
        Err(e) => {
            tracing::warn!(dir = %dir.display(), error = %e, "Schema compiler could not run");
        }
    }
}

/// Strip one pair of surrounding quote characters (single or double) from a
/// trimmed client output line. Interior quotes are preserved.
fn strip_quotes(raw: &str) -> &str {
    let trimmed = raw.trim();
    for quote in ['\'', '"'] {
        if trimmed.len() >= 2 && trimmed.starts_with(quote) && trimmed.ends_with(quote) {
            return &trimmed[1..trimmed.len() - 1];
        }
    }
    trimmed
}

/// Render the tc.ht schema definition with `value` as the key default.
fn schema_xml(value: &str) -> String {
    let escaped = xml_escape(value);
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<schemalist>
  <schema id="{GSETTINGS_SCHEMA_ID}" path="/tcht/">
    <key name="{GSETTINGS_KEY}" type="s">
      <default>'{escaped}'</default>
      <summary>TCHT suite install path</summary>
      <description>Directory where the TCHT application suite is installed.</description>
    </key>
  </schema>
</schemalist>
"#
    )
}

/// Escape XML-significant characters and the single quote, which delimits
/// the GVariant string inside <default>.
fn xml_escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\'' => out.push_str("&apos;"),
            '"' => out.push_str("&quot;"),
            other => out.push(other),
        }
    }
    out
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_quotes_removes_single_quotes() {
        assert_eq!(strip_quotes("'/home/TCHT'\n"), "/home/TCHT");
    }

    #[test]
    fn strip_quotes_removes_double_quotes() {
        assert_eq!(strip_quotes("\"/home/TCHT\""), "/home/TCHT");
    }

    #[test]
    fn strip_quotes_leaves_bare_values_alone() {
        assert_eq!(strip_quotes("/home/TCHT"), "/home/TCHT");
    }

    #[test]
    fn strip_quotes_preserves_interior_quotes() {
        assert_eq!(strip_quotes("'/home/o'brien'"), "/home/o'brien");
        assert_eq!(strip_quotes("a'b"), "a'b");
    }

    #[test]
    fn strip_quotes_handles_lone_quote() {
        assert_eq!(strip_quotes("'"), "'");
        assert_eq!(strip_quotes(""), "");
    }

    /// The rendered schema must carry the caller's value as the default,
    /// not any fixed literal.
    #[test]
    fn schema_xml_embeds_caller_value() {
        let xml = schema_xml("/srv/tcht");
        assert!(xml.contains("<default>'/srv/tcht'</default>"));
        assert!(xml.contains(r#"<schema id="tc.ht" path="/tcht/">"#));
        assert!(xml.contains(r#"<key name="path" type="s">"#));
    }

    #[test]
    fn schema_xml_escapes_markup_characters() {
        let xml = schema_xml("/data/<odd> & 'quoted'");
        assert!(xml.contains("&lt;odd&gt; &amp; &apos;quoted&apos;"));
        assert!(!xml.contains("<odd>"));
    }
}
