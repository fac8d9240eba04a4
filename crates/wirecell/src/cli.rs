use std::path::PathBuf;

use clap::Parser;

use wirecell_core::config::{persist, ConfigLoader};
use wirecell_core::{
    ComponentKey, ComponentRegistry, ConfigSequence, Configurable, Orchestrator, PluginLoader,
    Result,
};

/// Run Wire-Cell components from configuration.
#[derive(Parser, Debug)]
#[command(name = "wire-cell", author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file to load and append, may be repeated
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub configs: Vec<String>,

    /// Plugin to load, may be repeated
    #[arg(short = 'p', long = "plugin", value_name = "NAME[:LIBRARY]")]
    pub plugins: Vec<String>,

    /// Application component to execute, may be repeated
    #[arg(short = 'a', long = "app", value_name = "TYPE[:NAME]")]
    pub apps: Vec<String>,

    /// Directory to search for configuration files, may be repeated
    #[arg(short = 'P', long = "path", value_name = "DIR")]
    pub paths: Vec<PathBuf>,

    /// Dump the default configuration of a component after initialization
    #[arg(short = 'D', long = "dump-default", value_name = "TYPE[:NAME]")]
    pub dump_default: Vec<String>,

    /// Where --dump-default writes, `-` for stdout
    #[arg(long = "dump-file", value_name = "FILE", default_value = "-")]
    pub dump_file: String,

    /// Write the configuration as applied, data merged over defaults
    #[arg(short = 'C', long = "output-config", value_name = "FILE")]
    pub output_config: Option<String>,

    /// Print every known component type after initialization
    #[arg(long)]
    pub list_types: bool,

    /// Emit logs as JSON
    #[arg(long)]
    pub log_json: bool,
}

pub fn run(cli: &Cli) -> Result<()> {
    // The loader must outlive every component it registered.
    let mut loader = PluginLoader::from_env();
    loader.add_static(wirecell_apps::PLUGIN_NAME, wirecell_apps::register);
    let mut registry = ComponentRegistry::new();

    let mut config_loader = ConfigLoader::new();
    for dir in &cli.paths {
        config_loader.add_path(dir);
    }
    config_loader.add_env_paths();

    let mut orchestrator = Orchestrator::new(&mut registry, &mut loader);
    for name in &cli.configs {
        orchestrator.add_config(config_loader.load(name)?);
    }
    for plugin in &cli.plugins {
        orchestrator.add_plugin(plugin.as_str());
    }
    for app in &cli.apps {
        orchestrator.add_app(app.as_str());
    }

    orchestrator.initialize()?;

    if cli.list_types {
        for type_name in orchestrator.registry().known_types() {
            println!("{}", type_name);
        }
    }
    if !cli.dump_default.is_empty() {
        let defaults = default_sequence(orchestrator.registry(), &cli.dump_default)?;
        persist::dump(&cli.dump_file, &defaults.to_value())?;
    }
    if let Some(target) = &cli.output_config {
        persist::dump(target, &orchestrator.configured_sequence().to_value())?;
    }

    orchestrator.run()
}

/// Default configurations of `references`, from the live instance when one
/// exists.
fn default_sequence(registry: &ComponentRegistry, references: &[String]) -> Result<ConfigSequence> {
    let mut sequence = ConfigSequence::new();
    for reference in references {
        let key = ComponentKey::parse(reference);
        let config = match registry.find_as::<dyn Configurable>(&key.type_name, &key.name) {
            Ok(configurable) => configurable.default_configuration(),
            Err(_) => registry.default_configuration(&key.type_name)?,
        };
        sequence.add(config, &key.type_name, &key.name);
    }
    Ok(sequence)
}
