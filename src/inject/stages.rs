use super::pipeline::InjectionContext;
use super::rpath::{rpath_flags, RpathDecision};
use crate::toolchain::Language;
use std::ffi::OsString;

/// One step of the injection pipeline. Each stage prepends at most one flag
/// group to the arguments assembled so far.
pub trait InjectionStage {
    fn name(&self) -> &'static str;

    /// Group this stage contributes for the context, `None` when not applicable.
    fn group(&self, context: &InjectionContext<'_>) -> Option<Vec<OsString>>;
}

fn owned(flags: &[String]) -> Vec<OsString> {
    flags.iter().map(OsString::from).collect()
}

pub struct LinkerFlagsStage;

impl InjectionStage for LinkerFlagsStage {
    fn name(&self) -> &'static str {
        "linker-flags"
    }

    fn group(&self, context: &InjectionContext<'_>) -> Option<Vec<OsString>> {
        context
            .mode
            .links()
            .then(|| owned(&context.config.ldflags))
    }
}

pub struct LanguageFlagsStage;

impl InjectionStage for LanguageFlagsStage {
    fn name(&self) -> &'static str {
        "language-flags"
    }

    fn group(&self, context: &InjectionContext<'_>) -> Option<Vec<OsString>> {
        if !context.mode.compiles() {
            return None;
        }
        match context.language? {
            Language::C => Some(owned(&context.config.cflags)),
            Language::Cxx => Some(owned(&context.config.cxxflags)),
            // Fortran flags go in their own, later stage
            Language::Fortran => None,
        }
    }
}

pub struct PreprocessorFlagsStage;

impl InjectionStage for PreprocessorFlagsStage {
    fn name(&self) -> &'static str {
        "preprocessor-flags"
    }

    fn group(&self, context: &InjectionContext<'_>) -> Option<Vec<OsString>> {
        context
            .mode
            .preprocesses()
            .then(|| owned(&context.config.cppflags))
    }
}

pub struct FortranFlagsStage;

impl InjectionStage for FortranFlagsStage {
    fn name(&self) -> &'static str {
        "fortran-flags"
    }

    fn group(&self, context: &InjectionContext<'_>) -> Option<Vec<OsString>> {
        (context.mode.compiles() && context.language == Some(Language::Fortran))
            .then(|| owned(&context.config.fflags))
    }
}

pub struct RpathStage;

impl InjectionStage for RpathStage {
    fn name(&self) -> &'static str {
        "rpath"
    }

    fn group(&self, context: &InjectionContext<'_>) -> Option<Vec<OsString>> {
        match &context.rpath {
            RpathDecision::Inject(dir) => Some(rpath_flags(context.mode, dir)),
            _ => None,
        }
    }
}
