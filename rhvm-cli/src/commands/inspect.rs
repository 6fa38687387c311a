use super::operations;
use crate::output::{OutputFormat, OutputFormatter, print_info, yes_no};
use crate::utils::load_snapshot;
use rhvm_core::{Capability, CapabilityNegotiator, Config, Result, normalize};
use serde::Serialize;
use std::path::PathBuf;
use tabled::Tabled;

#[derive(Serialize, Tabled)]
struct CapabilityRow {
    capability: String,
    supported: String,
    reason: String,
}

#[derive(Serialize)]
struct InspectReport {
    vm_ref: String,
    name: String,
    power_state: String,
    operations: Vec<operations::OperationRow>,
    capabilities: Vec<CapabilityRow>,
}

pub async fn execute(vm: PathBuf, config: Config, format: OutputFormat) -> Result<()> {
    let vm = load_snapshot(&vm)?;
    let state = normalize(&vm.power_state)?;
    let negotiator = CapabilityNegotiator::new(config.thresholds);

    let capabilities: Vec<CapabilityRow> = Capability::ALL
        .into_iter()
        .map(|capability| {
            let reason = negotiator.unsupported_reason(capability, &vm);
            CapabilityRow {
                capability: capability.to_string(),
                supported: match format {
                    OutputFormat::Table => yes_no(reason.is_none()),
                    _ => reason.is_none().to_string(),
                },
                reason: reason.unwrap_or_default(),
            }
        })
        .collect();

    match format {
        OutputFormat::Table => {
            print_info(&format!(
                "{} ({}) is {} [provider reports {}]",
                vm.name, vm.vm_ref, state, vm.power_state
            ));
            println!("\nOperations:");
            println!("{}", format.format_table(operations::rows(state, format)));
            println!("\nCapabilities:");
            println!("{}", format.format_table(capabilities));
        }
        _ => println!(
            "{}",
            format.format(InspectReport {
                vm_ref: vm.vm_ref.clone(),
                name: vm.name.clone(),
                power_state: state.to_string(),
                operations: operations::rows(state, format),
                capabilities,
            })
        ),
    }

    Ok(())
}
