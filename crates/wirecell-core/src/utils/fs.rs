use std::env;
use std::path::{Path, PathBuf, MAIN_SEPARATOR};

/// Find the first existing file called `name` in `dirs`, in order.
///
/// Absolute names are returned as-is when they exist and never searched for.
pub fn find_in_dirs<P: AsRef<Path>>(name: &Path, dirs: &[P]) -> Option<PathBuf> {
    if name.is_absolute() {
        return name.is_file().then(|| name.to_path_buf());
    }
    dirs.iter()
        .map(|dir| dir.as_ref().join(name))
        .find(|candidate| candidate.is_file())
}

/// Whether `name` names a path rather than a bare file name.
pub fn has_path_separator(name: &str) -> bool {
    name.contains('/') || name.contains(MAIN_SEPARATOR)
}

/// Directories listed in a `PATH`-style environment variable. Unset means none.
pub fn dirs_from_env(var: &str) -> Vec<PathBuf> {
    env::var_os(var)
        .map(|value| env::split_paths(&value).filter(|p| !p.as_os_str().is_empty()).collect())
        .unwrap_or_default()
}
