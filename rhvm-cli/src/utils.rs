use rhvm_core::{DiskRef, Result, RhvmError, VmSnapshot};
use std::path::Path;
use tracing::debug;

/// Read a VM snapshot from a `.json`, `.yaml` or `.yml` file.
pub fn load_snapshot(path: &Path) -> Result<VmSnapshot> {
    let content = std::fs::read_to_string(path)?;
    debug!("Loading VM snapshot from {:?}", path);

    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => Ok(serde_json::from_str(&content)?),
        Some("yaml") | Some("yml") => serde_yaml::from_str(&content)
            .map_err(|e| RhvmError::ConfigError(format!("Invalid snapshot {path:?}: {e}"))),
        _ => Err(RhvmError::ConfigError(format!(
            "Snapshot file must end in .json, .yaml or .yml: {path:?}"
        ))),
    }
}

/// Parse a comma separated disk id list; an empty string means no disks.
pub fn parse_disk_list(disks: &str) -> Vec<DiskRef> {
    disks
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(DiskRef::new)
        .collect()
}
