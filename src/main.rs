use ccwrap::cli::commands::{CliArgs, Commands};
use ccwrap::cli::handlers::{handle_config, handle_explain, handle_names};
use ccwrap::cli::MANAGEMENT_NAME;
use ccwrap::dispatch::dispatch;
use ccwrap::env::SelfDirs;
use ccwrap::plan::{Invocation, Planner};
use ccwrap::util::logging::{self, LoggingConfig, ENV_LOG_LEVEL};
use ccwrap::{WrapperConfig, VERSION};

use clap::Parser;
use std::env;
use tracing::{debug, Level};

fn main() {
    let invocation = Invocation::from_env();

    let exit_code = if invocation.name == MANAGEMENT_NAME {
        run_management()
    } else {
        run_wrapper(&invocation)
    };

    std::process::exit(exit_code);
}

fn run_management() -> i32 {
    let args = CliArgs::parse();
    init_logging_from_args(&args);

    debug!("ccwrap v{} starting", VERSION);
    debug!("Arguments: {:?}", args);

    match &args.command {
        Commands::Explain(explain_args) => handle_explain(explain_args),
        Commands::Names(names_args) => handle_names(names_args),
        Commands::Config(config_args) => handle_config(config_args),
    }
}

fn run_wrapper(invocation: &Invocation) -> i32 {
    let config = match WrapperConfig::from_env().and_then(|c| c.validate().map(|_| c)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("ccwrap: {}", e);
            return 1;
        }
    };
    logging::init_from_env(config.debug);

    let self_dirs = SelfDirs::discover(&invocation.argv0, &config);
    let search_path = env::var_os("PATH").unwrap_or_default();

    let plan = match Planner::new(&config).plan(invocation, &search_path, &self_dirs) {
        Ok(plan) => plan,
        Err(e) => {
            eprintln!("ccwrap: {}", e);
            return e.exit_code();
        }
    };

    match dispatch(&plan, config.debug) {
        Ok(never) => match never {},
        Err(e) => {
            eprintln!("ccwrap: {}", e);
            e.exit_code()
        }
    }
}

fn init_logging_from_args(args: &CliArgs) {
    let level = if let Some(level_str) = &args.log_level {
        logging::parse_level(level_str)
    } else if args.verbose {
        Level::DEBUG
    } else if args.quiet {
        Level::ERROR
    } else {
        env::var(ENV_LOG_LEVEL)
            .map(|s| logging::parse_level(&s))
            .unwrap_or(Level::WARN)
    };

    logging::init_logging(LoggingConfig {
        level,
        ..LoggingConfig::from_env(false)
    });
}
