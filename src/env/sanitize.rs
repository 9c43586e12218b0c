use crate::config::WrapperConfig;
use std::env;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Directories that resolve back to the wrapper itself.
///
/// Always contains `.` and the empty entry, which both mean "current
/// directory" in `PATH` lookups. Entries are compared as raw text, so
/// `/opt/bin/` and `/opt/bin` are different directories here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelfDirs {
    dirs: Vec<PathBuf>,
}

impl SelfDirs {
    pub fn new<I>(dirs: I) -> Self
    where
        I: IntoIterator<Item = PathBuf>,
    {
        let mut all = vec![PathBuf::new(), PathBuf::from(".")];
        for dir in dirs {
            if !all.iter().any(|d| d.as_os_str() == dir.as_os_str()) {
                all.push(dir);
            }
        }
        Self { dirs: all }
    }

    /// Collects the running executable's directory, the directory of the path
    /// the wrapper was invoked through and the configured wrapper directories.
    pub fn discover(argv0: &OsStr, config: &WrapperConfig) -> Self {
        let install_dir = env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf));
        let invoked_dir = Path::new(argv0)
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .map(Path::to_path_buf);

        let dirs = install_dir
            .into_iter()
            .chain(invoked_dir)
            .chain(config.env_path.iter().cloned());
        let self_dirs = Self::new(dirs);
        debug!(dirs = ?self_dirs.dirs, "Wrapper directories");
        self_dirs
    }

    pub fn contains(&self, entry: &Path) -> bool {
        self.dirs
            .iter()
            .any(|dir| dir.as_os_str() == entry.as_os_str())
    }

    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }
}

/// Drops every search path entry that exactly matches a wrapper directory,
/// keeping the remaining entries in order.
pub fn sanitize_path(path: &OsStr, self_dirs: &SelfDirs) -> OsString {
    let (removed, kept): (Vec<PathBuf>, Vec<PathBuf>) =
        env::split_paths(path).partition(|entry| self_dirs.contains(entry));
    debug!(removed = removed.len(), "Sanitized search path");

    env::join_paths(&kept).unwrap_or_else(|err| {
        warn!("Cannot rebuild search path: {}", err);
        OsString::new()
    })
}
