mod config;
mod inspect;
mod operations;
mod power_state;
mod storage;
mod supports;

use clap::Subcommand;
use rhvm_core::{Config as RhvmConfig, Result, RhvmError};
use std::path::{Path, PathBuf};

use crate::output::OutputFormat;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Normalize a provider power state (up, down, suspended)
    PowerState {
        /// Power state as reported by the provider
        raw: String,
    },

    /// Show which power operations are available in a power state
    Operations {
        /// Power state as reported by the provider
        #[arg(short, long)]
        state: String,
    },

    /// Check whether a VM supports a capability
    Supports {
        /// Capability (clone, reconfigure_disks, publish)
        capability: String,

        /// VM snapshot file (.json, .yaml)
        #[arg(long)]
        vm: PathBuf,
    },

    /// Show power state, operations and capabilities of a VM
    Inspect {
        /// VM snapshot file (.json, .yaml)
        #[arg(long)]
        vm: PathBuf,
    },

    /// Reconcile recorded storage against the disks the provider still lists
    Storage {
        /// VM snapshot file (.json, .yaml)
        #[arg(long)]
        vm: PathBuf,

        /// Comma separated disk ids reported by the provider
        #[arg(long, default_value = "")]
        live_disks: String,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Write the default configuration
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

/// Resolve the configuration for `command`.
///
/// An explicit path must exist, except for `config init` which creates it.
pub fn load_config(path: Option<&Path>, command: &Command) -> Result<RhvmConfig> {
    match path {
        Some(path) if path.exists() => RhvmConfig::load_from(path),
        Some(path) => match command {
            Command::Config {
                action: ConfigAction::Init { .. },
            } => Ok(RhvmConfig::default()),
            _ => Err(RhvmError::ConfigError(format!(
                "Configuration file {} does not exist",
                path.display()
            ))),
        },
        None => RhvmConfig::load(),
    }
}

pub async fn execute(
    command: Command,
    config: RhvmConfig,
    config_path: Option<PathBuf>,
    format: OutputFormat,
) -> Result<()> {
    match command {
        Command::PowerState { raw } => power_state::execute(raw, format).await,
        Command::Operations { state } => operations::execute(state, format).await,
        Command::Supports { capability, vm } => {
            supports::execute(capability, vm, config, format).await
        }
        Command::Inspect { vm } => inspect::execute(vm, config, format).await,
        Command::Storage { vm, live_disks } => storage::execute(vm, live_disks, format).await,
        Command::Config { action } => config::execute(action, config, config_path, format).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_explicit_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("typo.yaml");
        let command = Command::Inspect {
            vm: PathBuf::from("vm.yaml"),
        };

        assert!(matches!(
            load_config(Some(missing.as_path()), &command),
            Err(RhvmError::ConfigError(_))
        ));
    }

    #[test]
    fn test_missing_explicit_config_allowed_for_init() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("config.yaml");
        let command = Command::Config {
            action: ConfigAction::Init { force: false },
        };

        assert_eq!(
            load_config(Some(missing.as_path()), &command).unwrap(),
            RhvmConfig::default()
        );
    }

    #[test]
    fn test_explicit_config_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "version: \"1.0\"\nthresholds:\n  publish_min_version: 5\n").unwrap();
        let command = Command::Operations {
            state: "up".to_string(),
        };

        let config = load_config(Some(path.as_path()), &command).unwrap();
        assert_eq!(config.thresholds.publish_min_version, 5);
    }
}
