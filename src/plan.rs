//! Invocation planning
//!
//! Ties the pure stages together: classify the invocation name, resolve the
//! mode, sanitize the search path, apply the rpath policy, inject flags and
//! pick the cache accelerator. The resulting [`ExecPlan`] is everything the
//! dispatcher needs; nothing is executed here.

use crate::config::WrapperConfig;
use crate::env::{sanitize_path, SelfDirs};
use crate::error::WrapperError;
use crate::inject::{decide_rpath, InjectionContext, InjectionPipeline, RpathDecision};
use crate::toolchain::{classify, resolve, Language, Mode, Resolution};
use serde::{Serialize, Serializer};
use std::env;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use tracing::debug;

/// How the wrapper was started. Immutable once captured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// `argv[0]` as given, possibly a path
    pub argv0: OsString,
    /// Basename of `argv[0]`, without `.exe` on Windows
    pub name: String,
    pub args: Vec<OsString>,
}

impl Invocation {
    pub fn new<S: Into<OsString>>(argv0: S, args: Vec<OsString>) -> Self {
        let argv0 = argv0.into();
        let path = Path::new(&argv0);
        let base = if cfg!(windows) {
            path.file_stem()
        } else {
            path.file_name()
        };
        let name = base
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self { argv0, name, args }
    }

    pub fn from_env() -> Self {
        let mut args = env::args_os();
        let argv0 = args.next().unwrap_or_default();
        Self::new(argv0, args.collect())
    }
}

fn lossy<S: Serializer>(args: &[OsString], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(args.iter().map(|a| a.to_string_lossy()))
}

fn lossy_one<S: Serializer>(value: &OsString, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&value.to_string_lossy())
}

/// Fully resolved hand-off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecPlan {
    pub name: String,
    pub mode: Mode,
    pub language: Option<Language>,
    /// Underlying toolchain executable
    pub command: String,
    /// Cache accelerator prefixed onto the command, if any
    pub accelerator: Option<PathBuf>,
    #[serde(serialize_with = "lossy")]
    pub original_args: Vec<OsString>,
    /// Final argument vector for `command`
    #[serde(serialize_with = "lossy")]
    pub args: Vec<OsString>,
    pub applied_groups: Vec<&'static str>,
    pub rpath: Option<PathBuf>,
    #[serde(serialize_with = "lossy_one")]
    pub search_path: OsString,
}

impl ExecPlan {
    /// Program actually started: the accelerator when present, else the command.
    pub fn program(&self) -> &OsStr {
        match &self.accelerator {
            Some(accelerator) => accelerator.as_os_str(),
            None => OsStr::new(&self.command),
        }
    }

    /// Arguments passed to [`ExecPlan::program`].
    pub fn program_args(&self) -> Vec<OsString> {
        let mut argv = Vec::with_capacity(self.args.len() + 1);
        if self.accelerator.is_some() {
            argv.push(OsString::from(&self.command));
        }
        argv.extend(self.args.iter().cloned());
        argv
    }

    /// Command line as the caller asked for it.
    pub fn before_line(&self) -> String {
        command_line(OsStr::new(&self.command), &self.original_args)
    }

    /// Command line that will be executed.
    pub fn after_line(&self) -> String {
        command_line(self.program(), &self.program_args())
    }
}

fn command_line(program: &OsStr, args: &[OsString]) -> String {
    std::iter::once(program.to_string_lossy())
        .chain(args.iter().map(|a| a.to_string_lossy()))
        .collect::<Vec<_>>()
        .join(" ")
}

pub struct Planner<'a> {
    config: &'a WrapperConfig,
    pipeline: InjectionPipeline,
}

impl<'a> Planner<'a> {
    pub fn new(config: &'a WrapperConfig) -> Self {
        Self {
            config,
            pipeline: InjectionPipeline::new(),
        }
    }

    pub fn plan(
        &self,
        invocation: &Invocation,
        search_path: &OsStr,
        self_dirs: &SelfDirs,
    ) -> Result<ExecPlan, WrapperError> {
        let classification = classify(&invocation.name, self.config)?;

        let Resolution { mode, language } = match classification.mode {
            Some(mode) => Resolution {
                mode,
                language: classification.language,
            },
            None => resolve(&invocation.args, classification.language),
        };
        debug!(
            name = %invocation.name,
            mode = %mode,
            language = ?language,
            command = %classification.command,
            "Invocation classified"
        );

        let search_path = sanitize_path(search_path, self_dirs);
        let rpath = decide_rpath(self.config, mode, &invocation.args);
        debug!(rpath = ?rpath, "Rpath policy");

        let context = InjectionContext {
            mode,
            language,
            config: self.config,
            rpath,
        };
        let injection = self.pipeline.run(&context, &invocation.args);

        Ok(ExecPlan {
            name: invocation.name.clone(),
            mode,
            language,
            command: classification.command,
            accelerator: self.accelerator(mode),
            original_args: invocation.args.clone(),
            args: injection.args,
            applied_groups: injection.applied,
            rpath: match context.rpath {
                RpathDecision::Inject(dir) => Some(dir),
                _ => None,
            },
            search_path,
        })
    }

    fn accelerator(&self, mode: Mode) -> Option<PathBuf> {
        if !mode.compiles() || !self.config.ccache_enabled {
            return None;
        }
        self.config
            .ccache_candidate()
            .filter(|candidate| candidate.is_file())
    }
}
