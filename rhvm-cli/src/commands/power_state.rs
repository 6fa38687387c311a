use crate::output::{OutputFormat, OutputFormatter};
use rhvm_core::{RawPowerState, Result, normalize};
use serde::Serialize;

#[derive(Serialize)]
struct NormalizedState {
    raw: String,
    canonical: String,
}

pub async fn execute(raw: String, format: OutputFormat) -> Result<()> {
    let state = normalize(&RawPowerState::new(raw.clone()))?;

    match format {
        OutputFormat::Table => println!("{raw} -> {state}"),
        _ => println!(
            "{}",
            format.format(NormalizedState {
                raw,
                canonical: state.to_string(),
            })
        ),
    }

    Ok(())
}
