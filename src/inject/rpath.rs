//! Rpath injection policy

use crate::config::WrapperConfig;
use crate::toolchain::Mode;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::debug;

crate::define_id_enum! {
    /// Platform whose linker conventions the rpath policy follows
    Platform {
        /// Apple ld: `-r` cannot be combined with rpath flags
        Darwin => "darwin" : "darwin" | "macos",
        Linux => "linux" : "linux",
        Other => "other" : "other",
    }
}

impl Platform {
    pub fn host() -> Self {
        if cfg!(target_os = "macos") {
            Platform::Darwin
        } else if cfg!(target_os = "linux") {
            Platform::Linux
        } else {
            Platform::Other
        }
    }

    /// Spelling of the "merge relocatable objects" flag for a linking mode.
    fn merge_flag(mode: Mode) -> Option<&'static str> {
        match mode {
            Mode::Link => Some("-r"),
            Mode::CompileAndLink => Some("-Wl,-r"),
            _ => None,
        }
    }
}

/// Outcome of the rpath policy for a single invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RpathDecision {
    Inject(PathBuf),
    /// Mode never links
    NotLinking,
    /// `CCWRAP_NO_RPATH` is set
    Disabled,
    /// No install prefix, so there is no directory to embed
    NoTarget,
    /// Darwin partial link (`-r`) with which rpath flags are incompatible
    MergeRelocatable,
}

impl RpathDecision {
    pub fn approved(&self) -> bool {
        matches!(self, RpathDecision::Inject(_))
    }
}

/// Decides whether rpath flags are added for this invocation.
pub fn decide(config: &WrapperConfig, mode: Mode, args: &[OsString]) -> RpathDecision {
    if !mode.links() {
        return RpathDecision::NotLinking;
    }
    if !config.rpath_enabled {
        return RpathDecision::Disabled;
    }
    let Some(dir) = config.rpath_dir() else {
        return RpathDecision::NoTarget;
    };

    if config.platform == Platform::Darwin {
        if let Some(flag) = Platform::merge_flag(mode) {
            if args.iter().any(|arg| arg == flag) {
                debug!(mode = %mode, flag, "Partial link detected, skipping rpath");
                return RpathDecision::MergeRelocatable;
            }
        }
    }

    RpathDecision::Inject(dir)
}

/// Rpath flags for `dir` in the spelling the mode's driver understands.
pub fn rpath_flags(mode: Mode, dir: &Path) -> Vec<OsString> {
    match mode {
        Mode::Link => vec![OsString::from("-rpath"), dir.as_os_str().to_owned()],
        _ => {
            let mut flag = OsString::from("-Wl,-rpath,");
            flag.push(dir.as_os_str());
            vec![flag]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yare::parameterized;

    fn config(platform: Platform) -> WrapperConfig {
        WrapperConfig {
            prefix: Some(PathBuf::from("/opt/stack")),
            platform,
            ..Default::default()
        }
    }

    fn args(list: &[&str]) -> Vec<OsString> {
        list.iter().map(OsString::from).collect()
    }

    #[parameterized(
        preprocess = { Mode::Preprocess },
        compile = { Mode::Compile },
        assemble = { Mode::Assemble },
        vcheck = { Mode::Vcheck },
    )]
    fn test_non_linking_modes(mode: Mode) {
        assert_eq!(
            decide(&config(Platform::Linux), mode, &[]),
            RpathDecision::NotLinking
        );
    }

    #[test]
    fn test_default_injects() {
        let decision = decide(&config(Platform::Linux), Mode::Link, &args(&["-o", "a.out", "a.o"]));
        assert_eq!(decision, RpathDecision::Inject(PathBuf::from("/opt/stack/lib")));
        assert!(decision.approved());
    }

    #[test]
    fn test_switch_disables() {
        let cfg = WrapperConfig {
            rpath_enabled: false,
            ..config(Platform::Linux)
        };
        assert_eq!(decide(&cfg, Mode::CompileAndLink, &[]), RpathDecision::Disabled);
    }

    #[test]
    fn test_without_prefix() {
        let cfg = WrapperConfig {
            prefix: None,
            ..config(Platform::Linux)
        };
        assert_eq!(decide(&cfg, Mode::Link, &[]), RpathDecision::NoTarget);
    }

    #[parameterized(
        ld_r = { Mode::Link, "-r", false },
        ccld_wl_r = { Mode::CompileAndLink, "-Wl,-r", false },
        ld_wl_r = { Mode::Link, "-Wl,-r", true },
        ccld_r = { Mode::CompileAndLink, "-r", true },
    )]
    fn test_darwin_merge_flag(mode: Mode, flag: &str, expect_rpath: bool) {
        let decision = decide(&config(Platform::Darwin), mode, &args(&["-o", "out.o", flag, "a.o"]));
        assert_eq!(decision.approved(), expect_rpath);
    }

    #[test]
    fn test_merge_flag_ignored_off_darwin() {
        let decision = decide(&config(Platform::Linux), Mode::Link, &args(&["-r", "a.o"]));
        assert!(decision.approved());
    }

    #[test]
    fn test_flag_spelling() {
        let dir = Path::new("/opt/stack/lib");
        assert_eq!(rpath_flags(Mode::Link, dir), args(&["-rpath", "/opt/stack/lib"]));
        assert_eq!(
            rpath_flags(Mode::CompileAndLink, dir),
            args(&["-Wl,-rpath,/opt/stack/lib"])
        );
    }
}
