use crate::error::{Result, RhvmError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Canonical, provider-independent power state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PowerState {
    On,
    Off,
    Suspended,
}

impl PowerState {
    pub const ALL: [PowerState; 3] = [PowerState::On, PowerState::Off, PowerState::Suspended];

    pub fn as_str(&self) -> &'static str {
        match self {
            PowerState::On => "on",
            PowerState::Off => "off",
            PowerState::Suspended => "suspended",
        }
    }

    /// The provider-native spelling of this state.
    pub fn provider_raw(&self) -> RawPowerState {
        match self {
            PowerState::On => RawPowerState::new("up"),
            PowerState::Off => RawPowerState::new("down"),
            PowerState::Suspended => RawPowerState::new("suspended"),
        }
    }

    pub fn is_powered_on(&self) -> bool {
        matches!(self, PowerState::On)
    }
}

impl fmt::Display for PowerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PowerState {
    type Err = RhvmError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "on" => Ok(PowerState::On),
            "off" => Ok(PowerState::Off),
            "suspended" => Ok(PowerState::Suspended),
            _ => Err(RhvmError::UnrecognizedPowerState(s.to_string())),
        }
    }
}

/// Power state exactly as the provider reported it ("up", "down", ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawPowerState(String);

impl RawPowerState {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for RawPowerState {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl From<&str> for RawPowerState {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl fmt::Display for RawPowerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Power operations a caller may request on a VM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Start,
    Stop,
    Suspend,
    Pause,
    ShutdownGuest,
    StandbyGuest,
    RebootGuest,
    Reset,
}

impl Operation {
    pub const ALL: [Operation; 8] = [
        Operation::Start,
        Operation::Stop,
        Operation::Suspend,
        Operation::Pause,
        Operation::ShutdownGuest,
        Operation::StandbyGuest,
        Operation::RebootGuest,
        Operation::Reset,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Start => "start",
            Operation::Stop => "stop",
            Operation::Suspend => "suspend",
            Operation::Pause => "pause",
            Operation::ShutdownGuest => "shutdown_guest",
            Operation::StandbyGuest => "standby_guest",
            Operation::RebootGuest => "reboot_guest",
            Operation::Reset => "reset",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = RhvmError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase().replace('-', "_");
        Operation::ALL
            .into_iter()
            .find(|op| op.as_str() == wanted)
            .ok_or_else(|| RhvmError::UnknownOperation(s.to_string()))
    }
}

/// Optional features gated on VM attributes and the provider API version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    Clone,
    ReconfigureDisks,
    Publish,
}

impl Capability {
    pub const ALL: [Capability; 3] = [
        Capability::Clone,
        Capability::ReconfigureDisks,
        Capability::Publish,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::Clone => "clone",
            Capability::ReconfigureDisks => "reconfigure_disks",
            Capability::Publish => "publish",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Capability {
    type Err = RhvmError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase().replace('-', "_");
        Capability::ALL
            .into_iter()
            .find(|cap| cap.as_str() == wanted)
            .ok_or_else(|| RhvmError::UnknownCapability(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApiVersion(pub u32);

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// Provider-side reference to a storage domain, e.g. `/api/storagedomains/<id>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StorageRef(pub String);

/// A disk as listed by the provider for one VM.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiskRef {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage: Option<StorageRef>,
}

impl DiskRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            storage: None,
        }
    }
}

/// Storage recorded against a VM: one primary reference plus the full set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageSet {
    #[serde(default)]
    pub primary: Option<StorageRef>,
    #[serde(default)]
    pub storages: Vec<StorageRef>,
}

impl StorageSet {
    pub fn single(storage: StorageRef) -> Self {
        Self {
            primary: Some(storage.clone()),
            storages: vec![storage],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.primary.is_none() && self.storages.is_empty()
    }
}

/// Read-only view of a VM handed in by the persistence layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VmSnapshot {
    pub vm_ref: String,
    #[serde(default)]
    pub name: String,
    pub power_state: RawPowerState,
    #[serde(default)]
    pub storage: StorageSet,
    #[serde(default)]
    pub has_provider: bool,
    #[serde(default)]
    pub provider_supported_versions: BTreeSet<ApiVersion>,
}

impl VmSnapshot {
    pub fn new(vm_ref: impl Into<String>, power_state: impl Into<RawPowerState>) -> Self {
        Self {
            vm_ref: vm_ref.into(),
            name: String::new(),
            power_state: power_state.into(),
            storage: StorageSet::default(),
            has_provider: false,
            provider_supported_versions: BTreeSet::new(),
        }
    }

    pub fn with_storage(mut self, storage: StorageSet) -> Self {
        self.storage = storage;
        self
    }

    pub fn with_provider<I>(mut self, versions: I) -> Self
    where
        I: IntoIterator<Item = u32>,
    {
        self.has_provider = true;
        self.provider_supported_versions = versions.into_iter().map(ApiVersion).collect();
        self
    }

    pub fn with_canonical_state(mut self, state: PowerState) -> Self {
        self.power_state = state.provider_raw();
        self
    }

    pub fn has_storage(&self) -> bool {
        self.storage.primary.is_some()
    }

    pub fn highest_supported_api_version(&self) -> Option<ApiVersion> {
        self.provider_supported_versions.iter().next_back().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_from_str() {
        assert_eq!("start".parse::<Operation>().unwrap(), Operation::Start);
        assert_eq!(
            "shutdown-guest".parse::<Operation>().unwrap(),
            Operation::ShutdownGuest
        );
        assert_eq!(
            "Reboot_Guest".parse::<Operation>().unwrap(),
            Operation::RebootGuest
        );
        assert!(matches!(
            "hibernate".parse::<Operation>(),
            Err(RhvmError::UnknownOperation(_))
        ));
    }

    #[test]
    fn test_capability_from_str() {
        assert_eq!(
            "reconfigure_disks".parse::<Capability>().unwrap(),
            Capability::ReconfigureDisks
        );
        assert!(matches!(
            "migrate".parse::<Capability>(),
            Err(RhvmError::UnknownCapability(_))
        ));
    }

    #[test]
    fn test_highest_supported_version() {
        let vm = VmSnapshot::new("/api/vms/1", "up").with_provider([4, 3]);
        assert_eq!(vm.highest_supported_api_version(), Some(ApiVersion(4)));

        let detached = VmSnapshot::new("/api/vms/2", "up");
        assert_eq!(detached.highest_supported_api_version(), None);
    }

    #[test]
    fn test_snapshot_yaml() {
        let yaml = r#"
vm_ref: /api/vms/42
name: web-01
power_state: down
storage:
  primary: /api/storagedomains/ee74
  storages: [/api/storagedomains/ee74]
has_provider: true
provider_supported_versions: [3, 4]
"#;
        let vm: VmSnapshot = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(vm.power_state.as_str(), "down");
        assert!(vm.has_storage());
        assert_eq!(vm.highest_supported_api_version(), Some(ApiVersion(4)));
    }
}
