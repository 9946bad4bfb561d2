// TchtPath - platform/shell.rs
//
// Shell-out helpers shared by the Unix configuration backends and the
// package-manager probe.
//
// Presence probing uses spawn-and-inspect: a binary is considered absent
// only when the OS reports ErrorKind::NotFound for the spawn itself. Exit
// status is irrelevant for presence (many of the probed clients exit
// non-zero when run with no meaningful arguments).

use std::io;
use std::io::ErrorKind;
use std::process::{Command, ExitStatus};

/// Captured result of a store-client invocation.
#[derive(Debug)]
pub struct CommandOutput {
    /// True when the process exited with status zero.
    pub success: bool,

    /// Exit code, or None when terminated by a signal.
    pub status: Option<i32>,

    /// Captured stdout, lossily decoded.
    pub stdout: String,

    /// Captured stderr, lossily decoded.
    pub stderr: String,
}

/// Returns true when `binary` can be spawned from PATH.
pub fn binary_available(binary: &str) -> bool {
    match Command::new(binary).arg("--help").output() {
        Ok(_) => true,
        Err(e) if e.kind() == ErrorKind::NotFound => false,
        Err(e) => {
            tracing::warn!(
                binary,
                error = %e,
                "Presence probe failed; treating binary as unavailable"
            );
            false
        }
    }
}

/// Run `binary` with `args`, capturing stdout/stderr.
///
/// A spawn failure (including NotFound) surfaces as the io::Error; a
/// non-zero exit status is NOT an error here -- callers inspect
/// `CommandOutput::success` and decide, because for store reads a non-zero
/// status just means "value absent".
pub fn run_capture(binary: &str, args: &[&str]) -> io::Result<CommandOutput> {
    let output = Command::new(binary).args(args).output()?;
    Ok(CommandOutput {
        success: output.status.success(),
        status: output.status.code(),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}

/// Run `binary` with `args` attached to the caller's terminal.
///
/// Used for package-manager installs, which may prompt (sudo password,
/// transaction confirmation) and stream progress output. Blocks until the
/// child exits; there is no timeout.
pub fn run_interactive(binary: &str, args: &[&str]) -> io::Result<ExitStatus> {
    Command::new(binary).args(args).status()
}

/// Render a command line for log and error messages.
pub fn render_command(binary: &str, args: &[&str]) -> String {
    if args.is_empty() {
        binary.to_string()
    } else {
        format!("{binary} {}", args.join(" "))
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binary_available_rejects_nonexistent_binary() {
        assert!(!binary_available("tchtpath-no-such-binary-odds-are-nil"));
    }

    #[test]
    fn render_command_joins_args() {
        assert_eq!(
            render_command("dconf", &["read", "/tcht/path"]),
            "dconf read /tcht/path"
        );
        assert_eq!(render_command("dconf", &[]), "dconf");
    }

    #[cfg(unix)]
    #[test]
    fn run_capture_reports_success_and_stdout() {
        let out = run_capture("sh", &["-c", "printf hello"]).expect("sh should spawn");
        assert!(out.success);
        assert_eq!(out.stdout, "hello");
    }

    #[cfg(unix)]
    #[test]
    fn run_capture_reports_nonzero_status_without_erroring() {
        let out = run_capture("sh", &["-c", "exit 3"]).expect("sh should spawn");
        assert!(!out.success);
        assert_eq!(out.status, Some(3));
    }

    #[test]
    fn run_capture_spawn_failure_is_an_error() {
        assert!(run_capture("tchtpath-no-such-binary-odds-are-nil", &[]).is_err());
    }
}
