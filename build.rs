/// build.rs — TchtPath build script.
///
/// On Windows targets: embeds a VERSIONINFO resource (product name, file
/// description, version from Cargo metadata) into the compiled executable
/// so the suite's installers and Explorer property sheets can identify it.
///
/// Uses CARGO_CFG_TARGET_OS rather than cfg!(target_os) so that cross-
/// compilation scenarios are handled correctly.
///
/// On non-Windows targets this script is a no-op.
fn main() {
    let target_os = std::env::var("CARGO_CFG_TARGET_OS").unwrap_or_default();
    if target_os == "windows" {
        let mut res = winres::WindowsResource::new();
        res.set("ProductName", "TchtPath");
        res.set("FileDescription", "TCHT suite install-location manager");
        res.compile()
            .expect("Failed to compile Windows resources (winres). \
                     Ensure a C compiler (MSVC or MinGW) is available.");
    }
}
