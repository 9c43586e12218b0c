pub mod commands;
pub mod handlers;
pub mod output;

pub use commands::{CliArgs, Commands, ConfigArgs, ExplainArgs, NamesArgs, OutputFormatArg};
pub use output::{name_entries, NameEntry, OutputFormat, OutputFormatter};

/// Name under which the binary serves the management interface instead of
/// wrapping a toolchain.
pub const MANAGEMENT_NAME: &str = "ccwrap";
