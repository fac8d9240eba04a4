use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::plugin_system::entry::entry_symbol;
use crate::plugin_system::error::PluginLoadError;
use crate::utils::{has_path_separator, parse_pair};

/// A plugin reference: the plugin name and, optionally, the library that
/// provides it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PluginSpec {
    pub name: String,
    pub library: Option<String>,
}

impl PluginSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            library: None,
        }
    }

    pub fn with_library(name: impl Into<String>, library: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            library: Some(library.into()),
        }
    }

    /// Parse `"<name>"` or `"<name>:<library>"`.
    pub fn parse(reference: &str) -> Result<Self, PluginLoadError> {
        let (name, library) = parse_pair(reference);
        let name = name.trim();
        if name.is_empty() {
            return Err(PluginLoadError::InvalidReference(reference.to_string()));
        }
        let library = library.trim();
        Ok(Self {
            name: name.to_string(),
            library: (!library.is_empty()).then(|| library.to_string()),
        })
    }

    /// File name (or path) of the library to open.
    ///
    /// Without an explicit library, and for an explicit bare name with no
    /// extension, this is the platform's canonical library file name, e.g.
    /// `libWireCellGen.so` for `WireCellGen` on Linux.
    pub fn library_file_name(&self) -> String {
        match &self.library {
            Some(library)
                if has_path_separator(library) || Path::new(library).extension().is_some() =>
            {
                library.clone()
            }
            Some(library) => libloading::library_filename(library)
                .to_string_lossy()
                .into_owned(),
            None => libloading::library_filename(&self.name)
                .to_string_lossy()
                .into_owned(),
        }
    }

    /// The symbol the plugin's library must export.
    pub fn entry_symbol(&self) -> String {
        entry_symbol(&self.name)
    }
}

impl fmt::Display for PluginSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.library {
            Some(library) => write!(f, "{}:{}", self.name, library),
            None => write!(f, "{}", self.name),
        }
    }
}

impl FromStr for PluginSpec {
    type Err = PluginLoadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
