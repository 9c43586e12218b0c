use clap::{Parser, Subcommand, ValueEnum};
use std::ffi::OsString;

/// Management interface, available when the wrapper runs under its own name
#[derive(Parser, Debug)]
#[command(
    name = "ccwrap",
    about = "Compiler-invocation interposer",
    version,
    long_about = "ccwrap is installed under toolchain names (cc, c++, ld, gfortran, ...) and \
                  injects configured flags before handing off to the real toolchain. Invoked \
                  as 'ccwrap' it inspects what a given invocation would do without running it."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress non-error output"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Show how an invocation would be rewritten",
        long_about = "Classifies the invocation, injects the configured flags and prints the \
                      resulting command without executing it.\n\n\
                      Examples:\n  \
                      ccwrap explain --as c++ -- -c foo.cpp -o foo.o\n  \
                      ccwrap explain --as ld --format json -- -o a.out a.o"
    )]
    Explain(ExplainArgs),

    #[command(about = "List the toolchain names the wrapper answers to")]
    Names(NamesArgs),

    #[command(about = "Show the configuration loaded from the environment")]
    Config(ConfigArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct ExplainArgs {
    #[arg(long = "as", value_name = "NAME", help = "Toolchain name to impersonate")]
    pub name: String,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,

    #[arg(
        last = true,
        allow_hyphen_values = true,
        value_name = "ARGS",
        help = "Arguments the toolchain would receive"
    )]
    pub args: Vec<OsString>,
}

#[derive(Parser, Debug, Clone)]
pub struct NamesArgs {
    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(Parser, Debug, Clone)]
pub struct ConfigArgs {
    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Json,
    Yaml,
    Human,
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => super::output::OutputFormat::Json,
            OutputFormatArg::Yaml => super::output::OutputFormat::Yaml,
            OutputFormatArg::Human => super::output::OutputFormat::Human,
        }
    }
}
