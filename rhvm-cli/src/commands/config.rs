use super::ConfigAction;
use crate::output::{OutputFormat, OutputFormatter, print_success, print_warning};
use rhvm_core::{Config, Result};
use std::path::PathBuf;

pub async fn execute(
    action: ConfigAction,
    config: Config,
    config_path: Option<PathBuf>,
    format: OutputFormat,
) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let rendered = match format {
                OutputFormat::Json => format.format(&config),
                _ => OutputFormat::Yaml.format(&config),
            };
            println!("{rendered}");
        }
        ConfigAction::Init { force } => {
            let path = match config_path {
                Some(path) => path,
                None => Config::config_path()?,
            };

            if path.exists() && !force {
                print_warning(&format!(
                    "Configuration already exists at {}, use --force to overwrite",
                    path.display()
                ));
                return Ok(());
            }

            Config::default().save_to(&path)?;
            print_success(&format!("Wrote default configuration to {}", path.display()));
        }
    }

    Ok(())
}
