use super::rpath::RpathDecision;
use super::stages::{
    FortranFlagsStage, InjectionStage, LanguageFlagsStage, LinkerFlagsStage,
    PreprocessorFlagsStage, RpathStage,
};
use crate::config::WrapperConfig;
use crate::toolchain::{Language, Mode};
use std::ffi::OsString;
use tracing::debug;

/// Everything the stages may look at. Resolved once, read-only afterwards.
pub struct InjectionContext<'a> {
    pub mode: Mode,
    pub language: Option<Language>,
    pub config: &'a WrapperConfig,
    pub rpath: RpathDecision,
}

/// Final argument vector plus the names of the stages that contributed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Injection {
    pub args: Vec<OsString>,
    pub applied: Vec<&'static str>,
}

/// Prepends flag groups in a fixed order. A stage that runs later ends up
/// earlier in the final vector: rpath, Fortran, preprocessor, language,
/// linker, then the original arguments.
pub struct InjectionPipeline {
    stages: Vec<Box<dyn InjectionStage>>,
}

impl Default for InjectionPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl InjectionPipeline {
    pub fn new() -> Self {
        Self {
            stages: vec![
                Box::new(LinkerFlagsStage),
                Box::new(LanguageFlagsStage),
                Box::new(PreprocessorFlagsStage),
                Box::new(FortranFlagsStage),
                Box::new(RpathStage),
            ],
        }
    }

    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    pub fn run(&self, context: &InjectionContext<'_>, original: &[OsString]) -> Injection {
        let mut args = original.to_vec();
        let mut applied = Vec::new();

        for stage in &self.stages {
            let Some(group) = stage.group(context).filter(|g| !g.is_empty()) else {
                continue;
            };
            debug!(
                stage = stage.name(),
                mode = %context.mode,
                tokens = group.len(),
                "Prepending flag group"
            );
            args.splice(0..0, group);
            applied.push(stage.name());
        }

        Injection { args, applied }
    }
}
