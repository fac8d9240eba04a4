use std::fs;
use std::path::{Path, PathBuf};

use crate::config::error::ConfigError;
use crate::config::format::ConfigFormat;
use crate::config::sequence::ConfigSequence;
use crate::kernel::constants::CONFIG_PATH_ENV;
use crate::utils::fs::{dirs_from_env, find_in_dirs};

/// Finds configuration files on a search path and loads them into
/// [`ConfigSequence`]s.
///
/// Directories are searched in the order they were added, then the current
/// working directory.
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    search_path: Vec<PathBuf>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_path(&mut self, dir: impl Into<PathBuf>) -> &mut Self {
        self.search_path.push(dir.into());
        self
    }

    /// Append the directories listed in `WIRECELL_PATH`.
    pub fn add_env_paths(&mut self) -> &mut Self {
        self.search_path.extend(dirs_from_env(CONFIG_PATH_ENV));
        self
    }

    pub fn search_path(&self) -> &[PathBuf] {
        &self.search_path
    }

    /// Locate `name`, returning the first match on the search path.
    pub fn resolve(&self, name: &str) -> Result<PathBuf, ConfigError> {
        let file = Path::new(name);
        let mut dirs = self.search_path.clone();
        if let Ok(cwd) = std::env::current_dir() {
            dirs.push(cwd);
        }
        find_in_dirs(file, &dirs).ok_or_else(|| ConfigError::FileNotFound {
            name: name.to_string(),
            searched: dirs,
        })
    }

    /// Resolve, read and parse the configuration file `name`.
    pub fn load(&self, name: &str) -> Result<ConfigSequence, ConfigError> {
        let path = self.resolve(name)?;
        let format =
            ConfigFormat::from_path(&path).ok_or_else(|| ConfigError::UnsupportedFormat(path.clone()))?;
        log::info!("Loading config: {} ({})", path.display(), format.name());

        let text = fs::read_to_string(&path).map_err(|e| ConfigError::io(e, "read", path.clone()))?;
        let document = format.parse(&text, &path)?;
        let sequence = ConfigSequence::from_value(document);
        log::debug!("Loaded {} entries from {}", sequence.len(), path.display());
        Ok(sequence)
    }
}
