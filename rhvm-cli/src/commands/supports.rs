use crate::output::{OutputFormat, OutputFormatter, print_success, print_warning};
use crate::utils::load_snapshot;
use rhvm_core::{Capability, CapabilityNegotiator, Config, Result};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Serialize)]
struct SupportReport {
    vm_ref: String,
    capability: String,
    supported: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
}

pub async fn execute(
    capability: String,
    vm: PathBuf,
    config: Config,
    format: OutputFormat,
) -> Result<()> {
    let capability: Capability = capability.parse()?;
    let vm = load_snapshot(&vm)?;
    let reason = CapabilityNegotiator::new(config.thresholds).unsupported_reason(capability, &vm);

    match format {
        OutputFormat::Table => match &reason {
            None => print_success(&format!("{} supports {}", vm.vm_ref, capability)),
            Some(reason) => print_warning(&format!(
                "{} does not support {}: {}",
                vm.vm_ref, capability, reason
            )),
        },
        _ => println!(
            "{}",
            format.format(SupportReport {
                vm_ref: vm.vm_ref.clone(),
                capability: capability.to_string(),
                supported: reason.is_none(),
                reason,
            })
        ),
    }

    Ok(())
}
