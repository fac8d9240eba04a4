use std::any::Any;
use std::collections::{BTreeMap, HashSet};
use std::ffi::c_void;
use std::fmt;
use std::fs;
use std::mem;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};

use libloading::{Library, Symbol};

use crate::component::registry::ComponentRegistry;
use crate::kernel::constants::{PLUGIN_PATH_ENV, STATIC_PLUGIN_ORIGIN};
use crate::plugin_system::entry::{entry_symbol, EntryPointFn, RegisterFn};
use crate::plugin_system::error::PluginLoadError;
use crate::plugin_system::spec::PluginSpec;
use crate::utils::fs::{dirs_from_env, find_in_dirs};
use crate::utils::has_path_separator;

/// An opened plugin library.
struct LoadedLibrary {
    path: PathBuf,
    library: Library,
}

/// Opens plugin libraries and invokes their registration entry points.
///
/// Each `(library, entry point)` pair is invoked at most once, however many
/// times it is requested. Libraries stay mapped for the life of the process:
/// constructed components carry vtables that point into them.
pub struct PluginLoader {
    search_dirs: Vec<PathBuf>,
    statics: BTreeMap<String, RegisterFn>,
    libraries: Vec<LoadedLibrary>,
    /// `(origin, symbol)` of every entry point already run.
    invoked: HashSet<(PathBuf, String)>,
}

impl fmt::Debug for PluginLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginLoader")
            .field("search_dirs", &self.search_dirs)
            .field("statics", &self.statics.keys().collect::<Vec<_>>())
            .field("libraries", &self.loaded_libraries())
            .finish()
    }
}

impl PluginLoader {
    pub fn new() -> Self {
        Self {
            search_dirs: Vec::new(),
            statics: BTreeMap::new(),
            libraries: Vec::new(),
            invoked: HashSet::new(),
        }
    }

    /// A loader that also searches the directories in `WIRECELL_PLUGIN_PATH`.
    pub fn from_env() -> Self {
        let mut loader = Self::new();
        for dir in dirs_from_env(PLUGIN_PATH_ENV) {
            loader.add_search_dir(dir);
        }
        loader
    }

    /// Search `dir` for plugin libraries given by bare file name. Directories
    /// are searched in the order added, before the system loader's own search.
    pub fn add_search_dir<P: AsRef<Path>>(&mut self, dir: P) {
        self.search_dirs.push(dir.as_ref().to_path_buf());
    }

    /// Link a plugin at build time. A later [`load`](Self::load) of `name`
    /// without an explicit library calls `register` instead of opening one.
    pub fn add_static(&mut self, name: impl Into<String>, register: RegisterFn) {
        let name = name.into();
        log::debug!("Static plugin '{}' available", name);
        self.statics.insert(name, register);
    }

    pub fn has_static(&self, name: &str) -> bool {
        self.statics.contains_key(name)
    }

    /// Paths of the libraries opened so far, in load order.
    pub fn loaded_libraries(&self) -> Vec<&Path> {
        self.libraries.iter().map(|l| l.path.as_path()).collect()
    }

    /// Load the plugin `spec` and let it register its constructors with `registry`.
    pub fn load(
        &mut self,
        spec: &PluginSpec,
        registry: &mut ComponentRegistry,
    ) -> Result<(), PluginLoadError> {
        if spec.library.is_none() {
            if let Some(register) = self.statics.get(&spec.name).copied() {
                return self.load_static(spec, register, registry);
            }
        }

        let index = self.open_library(spec)?;
        let symbol = spec.entry_symbol();
        match self.lookup_entry(index, &symbol) {
            EntryLookup::AlreadyInvoked => {
                log::debug!("Plugin '{}' already registered, skipping", spec);
                Ok(())
            }
            EntryLookup::Missing(source) => Err(PluginLoadError::MissingEntryPoint {
                plugin: spec.name.clone(),
                library: self.libraries[index].path.clone(),
                symbol,
                source,
            }),
            EntryLookup::Found(entry) => self.invoke(index, &spec.name, &symbol, entry, registry),
        }
    }

    /// Look for a per-type entry point `register_<type_name>_Factory` in every
    /// library opened so far and run the first one found.
    ///
    /// Returns whether `type_name` has a constructor afterwards.
    pub fn resolve_component(
        &mut self,
        type_name: &str,
        registry: &mut ComponentRegistry,
    ) -> Result<bool, PluginLoadError> {
        let symbol = entry_symbol(type_name);
        for index in 0..self.libraries.len() {
            if let EntryLookup::Found(entry) = self.lookup_entry(index, &symbol) {
                log::debug!(
                    "Found '{}' in {}",
                    symbol,
                    self.libraries[index].path.display()
                );
                self.invoke(index, type_name, &symbol, entry, registry)?;
                if registry.lookup_factory(type_name).is_some() {
                    return Ok(true);
                }
            }
        }
        Ok(registry.lookup_factory(type_name).is_some())
    }

    fn load_static(
        &mut self,
        spec: &PluginSpec,
        register: RegisterFn,
        registry: &mut ComponentRegistry,
    ) -> Result<(), PluginLoadError> {
        let key = (PathBuf::from(STATIC_PLUGIN_ORIGIN), spec.name.clone());
        if self.invoked.contains(&key) {
            log::debug!("Static plugin '{}' already registered, skipping", spec.name);
            return Ok(());
        }

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| register(&mut *registry)));
        match outcome {
            Ok(Ok(())) => {
                log::info!("Registered static plugin '{}'", spec.name);
                self.invoked.insert(key);
                Ok(())
            }
            Ok(Err(source)) => Err(PluginLoadError::RegistrationRejected {
                plugin: spec.name.clone(),
                source,
            }),
            Err(payload) => Err(PluginLoadError::EntryPointPanicked {
                plugin: spec.name.clone(),
                symbol: spec.entry_symbol(),
                message: panic_message(payload.as_ref()),
            }),
        }
    }

    fn open_library(&mut self, spec: &PluginSpec) -> Result<usize, PluginLoadError> {
        let path = self.locate(&spec.library_file_name());
        if let Some(index) = self.libraries.iter().position(|l| l.path == path) {
            return Ok(index);
        }

        let library = unsafe { Library::new(&path) }.map_err(|source| {
            log::error!("Failed to open library {}: {}", path.display(), source);
            PluginLoadError::NotFound {
                plugin: spec.name.clone(),
                library: path.clone(),
                source,
            }
        })?;
        log::info!("Opened plugin library {} for '{}'", path.display(), spec.name);
        self.libraries.push(LoadedLibrary { path, library });
        Ok(self.libraries.len() - 1)
    }

    /// Where to open `file` from: as given when it is a path, otherwise the
    /// first search directory holding it, otherwise the bare name for the
    /// system loader.
    ///
    /// Paths are canonicalized when they exist, so one library reached through
    /// two spellings is opened and registered once.
    fn locate(&self, file: &str) -> PathBuf {
        if has_path_separator(file) {
            return canonical(PathBuf::from(file));
        }
        match find_in_dirs(Path::new(file), &self.search_dirs) {
            Some(found) => canonical(found),
            None => PathBuf::from(file),
        }
    }

    fn lookup_entry(&self, index: usize, symbol: &str) -> EntryLookup {
        let loaded = &self.libraries[index];
        if self.invoked.contains(&(loaded.path.clone(), symbol.to_string())) {
            return EntryLookup::AlreadyInvoked;
        }
        let found: Result<Symbol<EntryPointFn>, _> = unsafe { loaded.library.get(symbol.as_bytes()) };
        match found {
            Ok(entry) => EntryLookup::Found(*entry),
            Err(source) => EntryLookup::Missing(source),
        }
    }

    fn invoke(
        &mut self,
        index: usize,
        plugin: &str,
        symbol: &str,
        entry: EntryPointFn,
        registry: &mut ComponentRegistry,
    ) -> Result<(), PluginLoadError> {
        // Anything recorded before this call belongs to someone else.
        let stale = registry.take_rejections();
        if !stale.is_empty() {
            log::warn!("Discarding {} earlier registration failures", stale.len());
        }

        let registry_ptr = (registry as *mut ComponentRegistry).cast::<c_void>();
        log::debug!("Invoking entry point '{}' for '{}'", symbol, plugin);
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| unsafe { entry(registry_ptr) }));
        if let Err(payload) = outcome {
            let message = panic_message(payload.as_ref());
            log::error!("Entry point '{}' panicked: {}", symbol, message);
            return Err(PluginLoadError::EntryPointPanicked {
                plugin: plugin.to_string(),
                symbol: symbol.to_string(),
                message,
            });
        }

        let mut rejections = registry.take_rejections();
        if !rejections.is_empty() {
            return Err(PluginLoadError::RegistrationRejected {
                plugin: plugin.to_string(),
                source: rejections.remove(0),
            });
        }

        self.invoked
            .insert((self.libraries[index].path.clone(), symbol.to_string()));
        log::info!("Registered plugin '{}' via '{}'", plugin, symbol);
        Ok(())
    }
}

impl Default for PluginLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for PluginLoader {
    fn drop(&mut self) {
        for loaded in self.libraries.drain(..) {
            mem::forget(loaded.library);
        }
    }
}

enum EntryLookup {
    AlreadyInvoked,
    Found(EntryPointFn),
    Missing(libloading::Error),
}

fn canonical(path: PathBuf) -> PathBuf {
    match fs::canonicalize(&path) {
        Ok(resolved) => resolved,
        Err(_) => path,
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic reason".to_string()
    }
}
