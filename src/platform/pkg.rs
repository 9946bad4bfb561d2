// TchtPath - platform/pkg.rs
//
// Package-manager detection and elevated installs of missing store clients
// (Unix only in practice; compiles everywhere).
//
// The probe walks a fixed table of recognised managers and uses the first
// one whose binary is on PATH. Installs run under sudo attached to the
// caller's terminal, so password prompts and transaction output work as
// they would interactively. Install failures are non-fatal by contract:
// callers log them and continue with the store client still missing.

use crate::platform::shell;
use crate::util::constants::ELEVATION_BIN;
use crate::util::error::InstallError;

// =============================================================================
// Manager table
// =============================================================================

/// One recognised system package manager.
#[derive(Debug)]
pub struct PackageManager {
    /// Client binary probed on PATH.
    pub bin: &'static str,

    /// Arguments placed between the binary and the package name.
    /// Includes the manager's non-interactive assent flag where it has one.
    pub install_args: &'static [&'static str],

    /// Package providing the dconf client on this manager's distros.
    pub dconf_package: &'static str,

    /// Package providing glib-compile-schemas on this manager's distros.
    pub schema_compiler_package: &'static str,
}

/// Probe order: Debian family, Fedora family, minimal/rolling distros,
/// Alpine, then snap as the distribution-agnostic fallback.
pub const PACKAGE_MANAGERS: &[PackageManager] = &[
    PackageManager {
        bin: "apt-get",
        install_args: &["install", "-y"],
        dconf_package: "dconf-cli",
        schema_compiler_package: "libglib2.0-bin",
    },
    PackageManager {
        bin: "dnf",
        install_args: &["install", "-y"],
        dconf_package: "dconf",
        schema_compiler_package: "glib2",
    },
    PackageManager {
        bin: "pacman",
        install_args: &["-S", "--noconfirm"],
        dconf_package: "dconf",
        schema_compiler_package: "glib2",
    },
    PackageManager {
        bin: "apk",
        install_args: &["add"],
        dconf_package: "dconf",
        schema_compiler_package: "glib",
    },
    PackageManager {
        bin: "snap",
        install_args: &["install"],
        dconf_package: "dconf",
        schema_compiler_package: "glib",
    },
];

/// Store client a backend may need installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientPackage {
    /// The dconf command-line client.
    Dconf,
    /// The GSettings schema compiler (glib-compile-schemas).
    SchemaCompiler,
}

impl ClientPackage {
    fn package_name(self, manager: &PackageManager) -> &'static str {
        match self {
            Self::Dconf => manager.dconf_package,
            Self::SchemaCompiler => manager.schema_compiler_package,
        }
    }
}

// =============================================================================
// Detection and install
// =============================================================================

/// Returns the first recognised package manager present on this host.
pub fn detect_manager() -> Option<&'static PackageManager> {
    let found = PACKAGE_MANAGERS
        .iter()
        .find(|m| shell::binary_available(m.bin));
    match found {
        Some(m) => tracing::debug!(manager = m.bin, "Package manager detected"),
        None => tracing::debug!("No recognised package manager on PATH"),
    }
    found
}

/// Full elevated command line for installing `package` via `manager`,
/// rendered for logs and error messages.
fn install_command_line(manager: &PackageManager, package: &str) -> String {
    let mut args: Vec<&str> = vec![manager.bin];
    args.extend_from_slice(manager.install_args);
    args.push(package);
    shell::render_command(ELEVATION_BIN, &args)
}

/// Install the package providing `client` using the detected manager.
///
/// Runs `sudo <manager> <install-args> <package>` attached to the terminal.
/// Returns NoPackageManagerFound when no manager is recognised and
/// InstallFailed on a non-zero exit; both are non-fatal for callers.
pub fn install_client(client: ClientPackage) -> std::result::Result<(), InstallError> {
    let manager = detect_manager().ok_or(InstallError::NoPackageManagerFound)?;
    let package = client.package_name(manager);

    tracing::info!(
        manager = manager.bin,
        package,
        "Installing missing store client (may prompt for your password)"
    );

    let mut args: Vec<&str> = vec![manager.bin];
    args.extend_from_slice(manager.install_args);
    args.push(package);

    let status =
        shell::run_interactive(ELEVATION_BIN, &args).map_err(|source| InstallError::Launch {
            command: install_command_line(manager, package),
            source,
        })?;

    if status.success() {
        tracing::info!(manager = manager.bin, package, "Install completed");
        Ok(())
    } else {
        Err(InstallError::InstallFailed {
            package: package.to_string(),
            manager: manager.bin,
            status: status.code(),
        })
    }
}

/// Ensure `binary` is present, installing `client` if it is not.
///
/// Ok means the binary was already present or the install command reported
/// success; absence after a failed install surfaces as the Err so callers
/// can log it once and continue.
pub fn ensure_client(binary: &str, client: ClientPackage) -> std::result::Result<(), InstallError> {
    if shell::binary_available(binary) {
        return Ok(());
    }
    tracing::info!(binary, "Store client not found on PATH");
    install_client(client)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// The probe table covers the five supported manager families and the
    /// Debian-family manager is tried first.
    #[test]
    fn manager_table_covers_expected_families() {
        let bins: Vec<&str> = PACKAGE_MANAGERS.iter().map(|m| m.bin).collect();
        assert_eq!(bins, vec!["apt-get", "dnf", "pacman", "apk", "snap"]);
    }

    #[test]
    fn install_command_runs_under_sudo_with_assent_flag() {
        let apt = &PACKAGE_MANAGERS[0];
        assert_eq!(
            install_command_line(apt, apt.dconf_package),
            "sudo apt-get install -y dconf-cli"
        );
    }

    #[test]
    fn pacman_uses_its_own_flag_spelling() {
        let pacman = PACKAGE_MANAGERS.iter().find(|m| m.bin == "pacman").unwrap();
        assert_eq!(
            install_command_line(pacman, ClientPackage::SchemaCompiler.package_name(pacman)),
            "sudo pacman -S --noconfirm glib2"
        );
    }
}
