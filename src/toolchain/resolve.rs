//! Mode resolution from the argument list
//!
//! Runs only when the invocation name did not fix the mode. A version query
//! anywhere wins outright. Otherwise a single left-to-right scan looks for the
//! first of `-E`, `-S`, `-c`, which settles the mode and halts the scan, while
//! `-x <tag>` pairs refine the language (and for some tags the mode) without
//! halting it.

use super::{Language, Mode};
use std::ffi::{OsStr, OsString};
use tracing::trace;

const VERSION_FLAGS: &[&str] = &["-v", "-V", "--version", "-dumpversion"];

/// Scanner state between two arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    Seeking,
    /// Previous argument was `-x`
    ExpectLanguageTag,
}

/// Mode and language after scanning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub mode: Mode,
    pub language: Option<Language>,
}

/// Effect of one `-x` language tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TagEffect {
    mode: Option<Mode>,
    language: Option<Language>,
}

fn tag_effect(tag: &OsStr) -> TagEffect {
    let Some(tag) = tag.to_str() else {
        return TagEffect {
            mode: None,
            language: None,
        };
    };

    let (mode, language) = match tag {
        "c++-header" => (Some(Mode::Compile), Some(Language::Cxx)),
        "c-header" => (Some(Mode::Compile), Some(Language::C)),
        "c++" | "c++-cpp-output" => (None, Some(Language::Cxx)),
        "c" | "cpp-output" => (None, Some(Language::C)),
        "assembler" => (Some(Mode::Assemble), None),
        "assembler-with-cpp" => (Some(Mode::Preprocess), None),
        t if t.starts_with("f77") || t.starts_with("f90") => (None, Some(Language::Fortran)),
        _ => (None, None),
    };
    TagEffect { mode, language }
}

/// True when any argument asks only for the toolchain version.
pub fn is_version_query(args: &[OsString]) -> bool {
    args.iter()
        .any(|arg| VERSION_FLAGS.iter().any(|flag| arg == *flag))
}

/// Resolves the mode for a name that did not fix one, refining `language`.
pub fn resolve(args: &[OsString], language: Option<Language>) -> Resolution {
    if is_version_query(args) {
        return Resolution {
            mode: Mode::Vcheck,
            language,
        };
    }

    let mut resolution = Resolution {
        mode: Mode::CompileAndLink,
        language,
    };
    let mut state = ScanState::Seeking;

    for arg in args {
        let halt = match arg.to_str() {
            Some("-E") => Some(Mode::Preprocess),
            Some("-S") => Some(Mode::Assemble),
            Some("-c") => Some(Mode::Compile),
            _ => None,
        };
        if let Some(mode) = halt {
            trace!(mode = %mode, "Mode flag found, scan halted");
            resolution.mode = mode;
            break;
        }

        state = match state {
            _ if arg == "-x" => ScanState::ExpectLanguageTag,
            ScanState::ExpectLanguageTag => {
                let effect = tag_effect(arg);
                if let Some(mode) = effect.mode {
                    resolution.mode = mode;
                }
                if let Some(language) = effect.language {
                    resolution.language = Some(language);
                }
                ScanState::Seeking
            }
            ScanState::Seeking => ScanState::Seeking,
        };
    }

    resolution
}
