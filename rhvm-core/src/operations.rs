use crate::types::{Operation, PowerState};
use serde::{Deserialize, Serialize};

/// When an operation may be requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    WhenPoweredOn,
    /// Off or suspended.
    WhenNotPoweredOn,
    /// Unsupported by the provider in every state.
    Never,
}

impl Availability {
    pub fn permits(&self, state: PowerState) -> bool {
        match self {
            Availability::WhenPoweredOn => state.is_powered_on(),
            Availability::WhenNotPoweredOn => !state.is_powered_on(),
            Availability::Never => false,
        }
    }
}

impl Operation {
    pub fn availability(&self) -> Availability {
        match self {
            Operation::Start => Availability::WhenNotPoweredOn,
            Operation::Stop
            | Operation::Suspend
            | Operation::ShutdownGuest
            | Operation::RebootGuest => Availability::WhenPoweredOn,
            Operation::Pause | Operation::StandbyGuest | Operation::Reset => Availability::Never,
        }
    }
}

pub fn is_available(op: Operation, state: PowerState) -> bool {
    op.availability().permits(state)
}

/// Every operation that may be requested in `state`, in declaration order.
pub fn available_operations(state: PowerState) -> Vec<Operation> {
    Operation::ALL
        .into_iter()
        .filter(|op| is_available(*op, state))
        .collect()
}
