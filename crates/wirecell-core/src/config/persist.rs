use std::fs;
use std::io::Write;
use std::path::PathBuf;

use serde_json::Value;

use crate::config::error::ConfigError;
use crate::kernel::constants::STDOUT_TARGETS;

/// Render a document as pretty-printed JSON.
pub fn dumps(document: &Value) -> Result<String, ConfigError> {
    Ok(serde_json::to_string_pretty(document)?)
}

/// Write `document` as pretty JSON to `target`, a file path or `-` for stdout.
pub fn dump(target: &str, document: &Value) -> Result<(), ConfigError> {
    let mut text = dumps(document)?;
    text.push('\n');

    if STDOUT_TARGETS.contains(&target) {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        handle
            .write_all(text.as_bytes())
            .and_then(|_| handle.flush())
            .map_err(|e| ConfigError::io(e, "write", PathBuf::from(target)))?;
        return Ok(());
    }

    let path = PathBuf::from(target);
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| ConfigError::io(e, "create_dir_all", parent.to_path_buf()))?;
    }
    fs::write(&path, text).map_err(|e| ConfigError::io(e, "write", path.clone()))?;
    log::debug!("Wrote configuration to {}", path.display());
    Ok(())
}
