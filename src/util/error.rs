// TchtPath - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// No string-based error propagation; all errors preserve the causal chain
// for diagnostic logging.
//
// Severity contract:
//   - UnsupportedPlatform is a hard stop.
//   - Install errors (NoPackageManagerFound, InstallFailed) are non-fatal:
//     callers log them and continue best-effort.
//   - Reads never fail the overall flow; an absent value is Ok(None), not
//     an error.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all TchtPath operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum TchtPathError {
    /// A configuration backend operation failed.
    Backend(BackendError),

    /// Installing a missing helper client failed.
    Install(InstallError),

    /// The interactive location chooser failed.
    Prompt(PromptError),

    /// I/O error with path context.
    Io {
        path: PathBuf,
        operation: &'static str,
        source: io::Error,
    },
}

impl fmt::Display for TchtPathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Backend(e) => write!(f, "Backend error: {e}"),
            Self::Install(e) => write!(f, "Install error: {e}"),
            Self::Prompt(e) => write!(f, "Prompt error: {e}"),
            Self::Io {
                path,
                operation,
                source,
            } => write!(
                f,
                "I/O error during {operation} on '{}': {source}",
                path.display()
            ),
        }
    }
}

impl std::error::Error for TchtPathError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Backend(e) => Some(e),
            Self::Install(e) => Some(e),
            Self::Prompt(e) => Some(e),
            Self::Io { source, .. } => Some(source),
        }
    }
}

// ---------------------------------------------------------------------------
// Backend errors
// ---------------------------------------------------------------------------

/// Errors produced by the platform configuration backends.
#[derive(Debug)]
pub enum BackendError {
    /// The host OS family is not recognised; no backend exists for it.
    UnsupportedPlatform { os: String },

    /// A backend was selected but its helper tooling cannot be used.
    Unavailable {
        backend: &'static str,
        reason: String,
    },

    /// A shelled-out store command exited with a non-zero status.
    CommandFailed {
        command: String,
        status: Option<i32>,
        stderr: String,
    },

    /// A registry operation failed (Windows).
    Registry {
        key: String,
        operation: &'static str,
        source: io::Error,
    },

    /// Writing or compiling the GSettings schema definition failed.
    SchemaWrite { path: PathBuf, source: io::Error },
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedPlatform { os } => {
                write!(f, "No configuration store available for OS family '{os}'")
            }
            Self::Unavailable { backend, reason } => {
                write!(f, "Backend '{backend}' is unavailable: {reason}")
            }
            Self::CommandFailed {
                command,
                status,
                stderr,
            } => match status {
                Some(code) => write!(
                    f,
                    "'{command}' exited with status {code}: {}",
                    stderr.trim()
                ),
                None => write!(
                    f,
                    "'{command}' was terminated by a signal: {}",
                    stderr.trim()
                ),
            },
            Self::Registry {
                key,
                operation,
                source,
            } => write!(f, "Registry {operation} on '{key}' failed: {source}"),
            Self::SchemaWrite { path, source } => {
                write!(f, "Schema write to '{}' failed: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for BackendError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Registry { source, .. } => Some(source),
            Self::SchemaWrite { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<BackendError> for TchtPathError {
    fn from(e: BackendError) -> Self {
        Self::Backend(e)
    }
}

// ---------------------------------------------------------------------------
// Install errors
// ---------------------------------------------------------------------------

/// Errors produced while installing a missing helper client.
/// All variants are non-fatal: callers log a warning and continue.
#[derive(Debug)]
pub enum InstallError {
    /// None of the recognised package managers is present on this host.
    NoPackageManagerFound,

    /// The package manager ran but reported failure.
    InstallFailed {
        package: String,
        manager: &'static str,
        status: Option<i32>,
    },

    /// The elevated install command could not be launched at all.
    Launch { command: String, source: io::Error },
}

impl fmt::Display for InstallError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoPackageManagerFound => {
                write!(f, "No recognised package manager found on this system")
            }
            Self::InstallFailed {
                package,
                manager,
                status,
            } => match status {
                Some(code) => write!(
                    f,
                    "'{manager}' failed to install '{package}' (exit status {code})"
                ),
                None => write!(
                    f,
                    "'{manager}' was terminated while installing '{package}'"
                ),
            },
            Self::Launch { command, source } => {
                write!(f, "Could not launch '{command}': {source}")
            }
        }
    }
}

impl std::error::Error for InstallError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Launch { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<InstallError> for TchtPathError {
    fn from(e: InstallError) -> Self {
        Self::Install(e)
    }
}

// ---------------------------------------------------------------------------
// Prompt errors
// ---------------------------------------------------------------------------

/// Errors produced by the interactive location chooser.
#[derive(Debug)]
pub enum PromptError {
    /// The input stream ended before the flow completed.
    InputClosed,

    /// Reading from or writing to the terminal failed.
    Io { source: io::Error },
}

impl fmt::Display for PromptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InputClosed => write!(f, "Input stream closed before a location was chosen"),
            Self::Io { source } => write!(f, "Terminal I/O error: {source}"),
        }
    }
}

impl std::error::Error for PromptError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source } => Some(source),
            Self::InputClosed => None,
        }
    }
}

impl From<PromptError> for TchtPathError {
    fn from(e: PromptError) -> Self {
        Self::Prompt(e)
    }
}

/// Convenience type alias for TchtPath results.
pub type Result<T> = std::result::Result<T, TchtPathError>;
