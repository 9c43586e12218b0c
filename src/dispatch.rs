//! Hand-off to the real toolchain
//!
//! On Unix the wrapper replaces its own process image, so the toolchain
//! inherits the pid, the standard streams and the exit status. Elsewhere the
//! toolchain is spawned and its exit code is forwarded unchanged.

use crate::error::WrapperError;
use crate::plan::ExecPlan;
use std::convert::Infallible;
use std::env;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info};

/// Emits the role-tagged before/after command lines.
pub fn trace(plan: &ExecPlan) {
    info!(target: "ccwrap::trace", "[{}] BEFORE: {}", plan.mode, plan.before_line());
    info!(target: "ccwrap::trace", "[{}] AFTER: {}", plan.mode, plan.after_line());
}

/// Locates the program to start using only the sanitized search path.
pub fn resolve_program(plan: &ExecPlan) -> Result<PathBuf, WrapperError> {
    let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    which::which_in(plan.program(), Some(&plan.search_path), cwd).map_err(|source| {
        WrapperError::CommandNotFound {
            command: plan.program().to_string_lossy().into_owned(),
            source,
        }
    })
}

fn command(program: &Path, plan: &ExecPlan) -> Command {
    let mut cmd = Command::new(program);
    cmd.args(plan.program_args()).env("PATH", &plan.search_path);
    cmd
}

/// Starts the planned command. Only returns on failure to start it.
pub fn dispatch(plan: &ExecPlan, debug_trace: bool) -> Result<Infallible, WrapperError> {
    if debug_trace {
        trace(plan);
    }

    let program = resolve_program(plan)?;
    debug!(program = %program.display(), "Dispatching");

    run(&program, plan)
}

#[cfg(unix)]
fn run(program: &Path, plan: &ExecPlan) -> Result<Infallible, WrapperError> {
    use std::os::unix::process::CommandExt;

    let source = command(program, plan).exec();
    Err(WrapperError::Exec {
        command: program.display().to_string(),
        source,
    })
}

#[cfg(not(unix))]
fn run(program: &Path, plan: &ExecPlan) -> Result<Infallible, WrapperError> {
    let status = command(program, plan)
        .status()
        .map_err(|source| WrapperError::Exec {
            command: program.display().to_string(),
            source,
        })?;
    std::process::exit(status.code().unwrap_or(1))
}
