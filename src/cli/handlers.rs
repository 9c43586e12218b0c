//! Management subcommand handlers
//!
//! Each handler returns the process exit code; nothing here starts a
//! toolchain.

use std::env;
use std::ffi::OsString;
use tracing::{debug, error};

use super::commands::{ConfigArgs, ExplainArgs, NamesArgs};
use super::output::{name_entries, OutputFormatter};
use crate::config::WrapperConfig;
use crate::env::SelfDirs;
use crate::plan::{Invocation, Planner};

fn load_config() -> Result<WrapperConfig, i32> {
    let config = WrapperConfig::from_env().map_err(|e| {
        error!("Invalid configuration: {}", e);
        1
    })?;
    config.validate().map_err(|e| {
        error!("Invalid configuration: {}", e);
        1
    })?;
    Ok(config)
}

fn print(output: anyhow::Result<String>) -> i32 {
    match output {
        Ok(text) => {
            print!("{}", text);
            if !text.ends_with('\n') {
                println!();
            }
            0
        }
        Err(e) => {
            error!("Failed to format output: {:#}", e);
            1
        }
    }
}

pub fn handle_explain(args: &ExplainArgs) -> i32 {
    let config = match load_config() {
        Ok(config) => config,
        Err(code) => return code,
    };

    let invocation = Invocation::new(&args.name, args.args.clone());
    let self_dirs = SelfDirs::discover(&OsString::from(&args.name), &config);
    let search_path = env::var_os("PATH").unwrap_or_default();
    debug!(name = %invocation.name, args = invocation.args.len(), "Explaining invocation");

    match Planner::new(&config).plan(&invocation, &search_path, &self_dirs) {
        Ok(plan) => print(OutputFormatter::new(args.format.into()).format_plan(&plan)),
        Err(e) => {
            error!("{}", e);
            if e.exit_code() == 1 {
                eprintln!("\nRun 'ccwrap names' to list the names the wrapper answers to.");
            }
            e.exit_code()
        }
    }
}

pub fn handle_names(args: &NamesArgs) -> i32 {
    print(OutputFormatter::new(args.format.into()).format_names(&name_entries()))
}

pub fn handle_config(args: &ConfigArgs) -> i32 {
    match load_config() {
        Ok(config) => print(OutputFormatter::new(args.format.into()).format_config(&config)),
        Err(code) => code,
    }
}
