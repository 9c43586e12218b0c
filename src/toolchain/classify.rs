//! Invocation name classification
//!
//! The wrapper is installed under many names. The name alone fixes the
//! language for compiler drivers and the mode for `cpp` and `ld`; the generic
//! driver names may additionally be redirected to a configured compiler.

use super::{Language, Mode};
use crate::config::WrapperConfig;
use crate::error::WrapperError;
use serde::Serialize;

/// Configured compiler that replaces a generic driver name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CompilerOverride {
    C,
    Cxx,
    Fortran,
}

impl CompilerOverride {
    fn lookup<'a>(&self, config: &'a WrapperConfig) -> Option<&'a str> {
        match self {
            CompilerOverride::C => config.cc.as_deref(),
            CompilerOverride::Cxx => config.cxx.as_deref(),
            CompilerOverride::Fortran => config.fc.as_deref(),
        }
    }
}

/// One row of the name table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandSpec {
    pub names: &'static [&'static str],
    /// Mode fixed by the name; argument scanning is skipped when set
    pub mode: Option<Mode>,
    pub language: Option<Language>,
    pub compiler_override: Option<CompilerOverride>,
}

pub static KNOWN_COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        names: &["cpp"],
        mode: Some(Mode::Preprocess),
        language: None,
        compiler_override: None,
    },
    CommandSpec {
        names: &["cc", "c89", "c99"],
        mode: None,
        language: Some(Language::C),
        compiler_override: Some(CompilerOverride::C),
    },
    CommandSpec {
        names: &["c++"],
        mode: None,
        language: Some(Language::Cxx),
        compiler_override: Some(CompilerOverride::Cxx),
    },
    CommandSpec {
        names: &["ftn", "f90", "fc", "f95", "f77"],
        mode: None,
        language: Some(Language::Fortran),
        compiler_override: Some(CompilerOverride::Fortran),
    },
    CommandSpec {
        names: &["gcc", "clang"],
        mode: None,
        language: Some(Language::C),
        compiler_override: None,
    },
    CommandSpec {
        names: &["g++", "clang++"],
        mode: None,
        language: Some(Language::Cxx),
        compiler_override: None,
    },
    CommandSpec {
        names: &["gfortran"],
        mode: None,
        language: Some(Language::Fortran),
        compiler_override: None,
    },
    CommandSpec {
        names: &["ld"],
        mode: Some(Mode::Link),
        language: None,
        compiler_override: None,
    },
];

impl CommandSpec {
    pub fn find(name: &str) -> Option<&'static CommandSpec> {
        KNOWN_COMMANDS.iter().find(|spec| spec.names.contains(&name))
    }
}

/// Result of classifying an invocation name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    /// Name the wrapper was invoked as
    pub name: String,
    pub mode: Option<Mode>,
    pub language: Option<Language>,
    /// Executable to hand off to
    pub command: String,
}

/// Maps an invocation basename onto mode seed, language and underlying command.
pub fn classify(name: &str, config: &WrapperConfig) -> Result<Classification, WrapperError> {
    let spec =
        CommandSpec::find(name).ok_or_else(|| WrapperError::UnknownCommand(name.to_string()))?;

    let command = spec
        .compiler_override
        .and_then(|key| key.lookup(config))
        .unwrap_or(name)
        .to_string();

    Ok(Classification {
        name: name.to_string(),
        mode: spec.mode,
        language: spec.language,
        command,
    })
}

/// Every recognized invocation name, in table order.
pub fn known_names() -> impl Iterator<Item = &'static str> {
    KNOWN_COMMANDS.iter().flat_map(|spec| spec.names.iter().copied())
}
