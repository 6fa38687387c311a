use crate::output::{OutputFormat, OutputFormatter, yes_no};
use rhvm_core::{Availability, Operation, PowerState, RawPowerState, Result, is_available, normalize};
use serde::Serialize;
use tabled::Tabled;

#[derive(Serialize, Tabled)]
pub struct OperationRow {
    operation: String,
    rule: String,
    available: String,
}

impl OperationRow {
    pub fn new(op: Operation, state: PowerState, format: OutputFormat) -> Self {
        let available = is_available(op, state);
        let rule = match op.availability() {
            Availability::WhenPoweredOn => "when powered on",
            Availability::WhenNotPoweredOn => "when not powered on",
            Availability::Never => "never",
        };

        Self {
            operation: op.to_string(),
            rule: rule.to_string(),
            available: match format {
                OutputFormat::Table => yes_no(available),
                _ => available.to_string(),
            },
        }
    }
}

pub fn rows(state: PowerState, format: OutputFormat) -> Vec<OperationRow> {
    Operation::ALL
        .into_iter()
        .map(|op| OperationRow::new(op, state, format))
        .collect()
}

pub async fn execute(state: String, format: OutputFormat) -> Result<()> {
    let state = normalize(&RawPowerState::new(state))?;
    println!("{}", format.format_table(rows(state, format)));
    Ok(())
}
