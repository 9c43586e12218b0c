//! Toolchain role and language identification
//!
//! Deciding what a toolchain invocation is asking for happens in two steps:
//!
//! - [`classify`] maps the basename the tool was launched as onto a
//!   [`CommandSpec`]: an optional fixed [`Mode`], an optional [`Language`] and
//!   the underlying executable to run.
//! - [`resolve`] scans the argument list to settle the final [`Mode`] and to
//!   refine the [`Language`] from `-x` tags.

pub mod classify;
pub mod id_enum_macro;
pub mod resolve;

pub use classify::{
    classify, known_names, Classification, CommandSpec, CompilerOverride, KNOWN_COMMANDS,
};
pub use resolve::{is_version_query, resolve, Resolution, ScanState};

crate::define_id_enum! {
    /// Toolchain role requested by an invocation
    Mode {
        /// Version query: nothing is injected
        Vcheck => "vcheck" : "vcheck",
        Preprocess => "cpp" : "preprocess",
        Compile => "cc" : "compile",
        Assemble => "as" : "assemble",
        /// Pure linker (`ld`)
        Link => "ld" : "link",
        /// Compiler driver that compiles and links in one step
        CompileAndLink => "ccld" : "compile-and-link",
    }
}

crate::define_id_enum! {
    /// Source language context used to pick a flag group
    Language {
        C => "c" : "C",
        Cxx => "c++" : "C++" | "cxx",
        Fortran => "fortran" : "Fortran",
    }
}

impl Mode {
    /// Roles that end in a link step and receive linker flags.
    pub fn links(&self) -> bool {
        matches!(self, Mode::Link | Mode::CompileAndLink)
    }

    /// Roles that run the compiler proper and receive language flags.
    pub fn compiles(&self) -> bool {
        matches!(self, Mode::Compile | Mode::CompileAndLink)
    }

    /// Roles that run the preprocessor.
    pub fn preprocesses(&self) -> bool {
        matches!(
            self,
            Mode::Preprocess | Mode::Assemble | Mode::Compile | Mode::CompileAndLink
        )
    }
}
