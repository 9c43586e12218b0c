//! Flag injection
//!
//! Builds the final argument vector from the configured flag groups. The
//! order of groups matters to toolchains that give later `-I`/`-L` entries
//! priority, so stages always run in the same sequence and every group is
//! prepended as a whole without reordering its tokens.

pub mod pipeline;
pub mod rpath;
pub mod stages;

pub use pipeline::{Injection, InjectionContext, InjectionPipeline};
pub use rpath::{decide as decide_rpath, Platform, RpathDecision};
pub use stages::InjectionStage;
