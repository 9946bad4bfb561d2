// TchtPath - core/prompt.rs
//
// Interactive first-run location chooser.
//
// Flow: propose a platform default and the current directory as numbered
// options, accept either digit or a free-form path, warn about spaces in
// the chosen path (they break some of the suite's tooling), create the
// directory if needed, then persist through the store.
//
// The flow is generic over BufRead/Write rather than reading stdin
// directly, so tests drive it with scripted Cursor input; main.rs passes
// the locked stdin/stdout handles.

use crate::core::store::PathStore;
use crate::platform::config::AppConfig;
use crate::util::constants;
use crate::util::error::{PromptError, Result, TchtPathError};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

// =============================================================================
// Defaults
// =============================================================================

/// Inputs the flow needs beyond the terminal: the suggested install
/// location, after any config.toml override.
#[derive(Debug, Clone)]
pub struct PromptDefaults {
    /// Directory proposed as option 1.
    pub default_install_dir: PathBuf,
}

impl PromptDefaults {
    /// Resolve the suggested location: config override first, then the
    /// platform default.
    pub fn resolve(config: &AppConfig) -> Self {
        let default_install_dir = config
            .default_install_dir
            .clone()
            .unwrap_or_else(platform_default_install_dir);
        Self {
            default_install_dir,
        }
    }
}

/// Platform default install location: `C:\TCHT` on Windows, a TCHT folder
/// under Documents on macOS, `/home/TCHT` on other Unix systems.
fn platform_default_install_dir() -> PathBuf {
    if cfg!(target_os = "windows") {
        PathBuf::from(constants::DEFAULT_INSTALL_DIR_WINDOWS)
    } else if cfg!(target_os = "macos") {
        directories::UserDirs::new()
            .and_then(|dirs| {
                dirs.document_dir()
                    .map(|docs| docs.join(constants::DEFAULT_INSTALL_SUBDIR_MACOS))
            })
            .unwrap_or_else(|| PathBuf::from(constants::DEFAULT_INSTALL_DIR_UNIX))
    } else {
        PathBuf::from(constants::DEFAULT_INSTALL_DIR_UNIX)
    }
}

// =============================================================================
// Flow
// =============================================================================

/// One menu selection: the chosen path and whether the user typed it
/// (menu options get automatic directory creation; typed paths ask first).
struct Choice {
    path: PathBuf,
    custom: bool,
}

/// Run the interactive chooser to completion.
///
/// Loops until a usable directory is chosen, created if necessary, and
/// persisted through `store`. Only terminal I/O failures, closed input,
/// and store faults abort the flow; a rejected or uncreatable path returns
/// to the menu.
pub fn run<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    store: &mut PathStore,
    defaults: &PromptDefaults,
) -> Result<PathBuf> {
    let default_dir = &defaults.default_install_dir;
    let current_dir = std::env::current_dir().map_err(|source| TchtPathError::Io {
        path: PathBuf::from("."),
        operation: "resolve current directory",
        source,
    })?;

    loop {
        let choice = await_choice(input, output, default_dir, &current_dir)?;

        // A space-containing path must be explicitly kept or replaced
        // before anything is created on disk.
        let path = confirm_whitespace(input, output, choice.path.clone())?;
        let custom = choice.custom || path != choice.path;

        if path.exists() {
            if !path.is_dir() {
                writeln!(
                    output,
                    "'{}' exists but is not a directory. Choose another location.",
                    path.display()
                )
                .map_err(prompt_io)?;
                continue;
            }
        } else {
            if custom && !confirm_create(input, output, &path)? {
                continue;
            }
            if let Err(e) = std::fs::create_dir_all(&path) {
                tracing::warn!(path = %path.display(), error = %e, "Could not create install directory");
                writeln!(
                    output,
                    "Could not create '{}': {e}. Choose another location.",
                    path.display()
                )
                .map_err(prompt_io)?;
                continue;
            }
            writeln!(output, "Created '{}'.", path.display()).map_err(prompt_io)?;
        }

        store.set(path.to_string_lossy().as_ref())?;
        writeln!(output, "Install location set to '{}'.", path.display()).map_err(prompt_io)?;
        return Ok(path);
    }
}

/// Present the menu and read a selection. Empty input re-prompts.
fn await_choice<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    default_dir: &Path,
    current_dir: &Path,
) -> Result<Choice> {
    loop {
        writeln!(output, "Where should the TCHT suite live?").map_err(prompt_io)?;
        writeln!(output, "  1) Suggested location: {}", default_dir.display())
            .map_err(prompt_io)?;
        writeln!(output, "  2) Current directory:  {}", current_dir.display())
            .map_err(prompt_io)?;
        let line = read_trimmed(input, output, "Enter 1, 2, or a custom path: ")?;
        match line.as_str() {
            "" => continue,
            "1" => {
                return Ok(Choice {
                    path: default_dir.to_path_buf(),
                    custom: false,
                })
            }
            "2" => {
                return Ok(Choice {
                    path: current_dir.to_path_buf(),
                    custom: false,
                })
            }
            custom => {
                return Ok(Choice {
                    path: PathBuf::from(custom),
                    custom: true,
                })
            }
        }
    }
}

/// Whitespace confirmation loop.
///
/// Re-prompts while the candidate contains a space: the user either types
/// a replacement path or answers Y to keep the candidate. Refusals ("n",
/// empty input) re-prompt rather than aborting.
fn confirm_whitespace<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    mut candidate: PathBuf,
) -> Result<PathBuf> {
    loop {
        if !has_space(&candidate) {
            return Ok(candidate);
        }
        writeln!(
            output,
            "Warning: '{}' contains a space. Paths with spaces break some of the suite's tooling.",
            candidate.display()
        )
        .map_err(prompt_io)?;
        let line = read_trimmed(input, output, "Enter a different path, or Y to keep this one: ")?;
        if is_affirmative(&line) {
            tracing::debug!(path = %candidate.display(), "Space-containing path kept by user");
            return Ok(candidate);
        }
        if line.is_empty() || is_negative(&line) {
            continue;
        }
        candidate = PathBuf::from(line);
    }
}

/// Ask before creating a directory the user typed themselves.
fn confirm_create<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    path: &Path,
) -> Result<bool> {
    loop {
        writeln!(output, "'{}' does not exist.", path.display()).map_err(prompt_io)?;
        let line = read_trimmed(input, output, "Create it? [Y/N]: ")?;
        if is_affirmative(&line) {
            return Ok(true);
        }
        if is_negative(&line) {
            return Ok(false);
        }
    }
}

// =============================================================================
// Terminal helpers
// =============================================================================

/// Write `prompt`, flush, and read one trimmed line. EOF is an error: the
/// flow cannot finish without an answer.
fn read_trimmed<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
) -> Result<String> {
    write!(output, "{prompt}").map_err(prompt_io)?;
    output.flush().map_err(prompt_io)?;

    let mut line = String::new();
    let read = input.read_line(&mut line).map_err(prompt_io)?;
    if read == 0 {
        return Err(PromptError::InputClosed.into());
    }
    Ok(line.trim().to_string())
}

fn prompt_io(source: io::Error) -> TchtPathError {
    PromptError::Io { source }.into()
}

fn has_space(path: &Path) -> bool {
    path.to_string_lossy().contains(' ')
}

fn is_affirmative(line: &str) -> bool {
    line.eq_ignore_ascii_case("y") || line.eq_ignore_ascii_case("yes")
}

fn is_negative(line: &str) -> bool {
    line.eq_ignore_ascii_case("n") || line.eq_ignore_ascii_case("no")
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn script(lines: &str) -> Cursor<Vec<u8>> {
        Cursor::new(lines.as_bytes().to_vec())
    }

    /// The loop ends on a space-free replacement: a refusal re-prompts,
    /// a new path is re-checked.
    #[test]
    fn whitespace_loop_accepts_replacement_after_refusal() {
        let mut input = script("n\n/tcht\n");
        let mut output = Vec::new();
        let result =
            confirm_whitespace(&mut input, &mut output, PathBuf::from("/tc ht")).unwrap();
        assert_eq!(result, PathBuf::from("/tcht"));
    }

    /// The loop ends when the user explicitly keeps the spaced path.
    #[test]
    fn whitespace_loop_accepts_affirmative_keep() {
        let mut input = script("YES\n");
        let mut output = Vec::new();
        let result =
            confirm_whitespace(&mut input, &mut output, PathBuf::from("/tc ht")).unwrap();
        assert_eq!(result, PathBuf::from("/tc ht"));
    }

    /// A replacement that still contains a space goes round again.
    #[test]
    fn whitespace_loop_rechecks_replacement_paths() {
        let mut input = script("/still bad\n/clean\n");
        let mut output = Vec::new();
        let result =
            confirm_whitespace(&mut input, &mut output, PathBuf::from("/tc ht")).unwrap();
        assert_eq!(result, PathBuf::from("/clean"));
    }

    /// Empty answers neither keep nor replace; they re-prompt.
    #[test]
    fn whitespace_loop_reprompts_on_empty_input() {
        let mut input = script("\n\ny\n");
        let mut output = Vec::new();
        let result =
            confirm_whitespace(&mut input, &mut output, PathBuf::from("/tc ht")).unwrap();
        assert_eq!(result, PathBuf::from("/tc ht"));
    }

    /// A space-free path passes straight through without consuming input.
    #[test]
    fn whitespace_loop_is_a_no_op_for_clean_paths() {
        let mut input = script("");
        let mut output = Vec::new();
        let result = confirm_whitespace(&mut input, &mut output, PathBuf::from("/tcht")).unwrap();
        assert_eq!(result, PathBuf::from("/tcht"));
        assert!(output.is_empty());
    }

    /// EOF mid-loop is an InputClosed error, not a hang or a default.
    #[test]
    fn whitespace_loop_errors_on_closed_input() {
        let mut input = script("");
        let mut output = Vec::new();
        let result = confirm_whitespace(&mut input, &mut output, PathBuf::from("/tc ht"));
        assert!(matches!(
            result,
            Err(TchtPathError::Prompt(PromptError::InputClosed))
        ));
    }

    #[test]
    fn menu_selects_default_and_current_dir_by_digit() {
        let default_dir = PathBuf::from("/srv/suite");
        let current_dir = PathBuf::from("/work");

        let mut input = script("1\n");
        let mut output: Vec<u8> = Vec::new();
        let choice = await_choice(&mut input, &mut output, &default_dir, &current_dir).unwrap();
        assert_eq!(choice.path, default_dir);
        assert!(!choice.custom);

        let mut input = script("2\n");
        let mut output: Vec<u8> = Vec::new();
        let choice = await_choice(&mut input, &mut output, &default_dir, &current_dir).unwrap();
        assert_eq!(choice.path, current_dir);
        assert!(!choice.custom);
    }

    #[test]
    fn menu_treats_other_input_as_custom_path() {
        let mut input = script("/opt/elsewhere\n");
        let mut output: Vec<u8> = Vec::new();
        let choice = await_choice(
            &mut input,
            &mut output,
            Path::new("/srv/suite"),
            Path::new("/work"),
        )
        .unwrap();
        assert_eq!(choice.path, PathBuf::from("/opt/elsewhere"));
        assert!(choice.custom);
    }

    #[test]
    fn menu_reprompts_on_empty_line() {
        let mut input = script("\n1\n");
        let mut output = Vec::new();
        let choice = await_choice(
            &mut input,
            &mut output,
            Path::new("/srv/suite"),
            Path::new("/work"),
        )
        .unwrap();
        assert_eq!(choice.path, PathBuf::from("/srv/suite"));
        let shown = String::from_utf8(output).unwrap();
        assert!(shown.matches("Suggested location").count() >= 2);
    }

    #[test]
    fn config_override_beats_platform_default() {
        let config = AppConfig {
            default_install_dir: Some(PathBuf::from("/site/tcht")),
            log_level: None,
        };
        let defaults = PromptDefaults::resolve(&config);
        assert_eq!(defaults.default_install_dir, PathBuf::from("/site/tcht"));
    }

    #[test]
    fn affirmative_and_negative_answers_are_case_insensitive() {
        assert!(is_affirmative("y"));
        assert!(is_affirmative("Yes"));
        assert!(!is_affirmative("yep"));
        assert!(is_negative("N"));
        assert!(is_negative("no"));
        assert!(!is_negative("never"));
    }
}
