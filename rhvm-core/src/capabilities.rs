use crate::config::CapabilityThresholds;
use crate::power::normalize;
use crate::types::{Capability, PowerState, VmSnapshot};
use tracing::debug;

/// Decides which optional features a VM can use.
///
/// Checks are total: missing storage, a missing provider, an unknown power
/// state or an empty version set all refuse the capability, none of them
/// raise an error. Structural checks run before version checks.
#[derive(Debug, Clone, Copy, Default)]
pub struct CapabilityNegotiator {
    thresholds: CapabilityThresholds,
}

impl CapabilityNegotiator {
    pub fn new(thresholds: CapabilityThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &CapabilityThresholds {
        &self.thresholds
    }

    pub fn supports(&self, capability: Capability, vm: &VmSnapshot) -> bool {
        match self.unsupported_reason(capability, vm) {
            Some(reason) => {
                debug!("{} unsupported for {}: {}", capability, vm.vm_ref, reason);
                false
            }
            None => true,
        }
    }

    /// Why `capability` is refused for `vm`, or `None` when it is supported.
    pub fn unsupported_reason(&self, capability: Capability, vm: &VmSnapshot) -> Option<String> {
        match capability {
            Capability::Clone => Some("Clone is not supported by this provider".to_string()),
            Capability::ReconfigureDisks => self
                .attached_reason(vm)
                .or_else(|| self.reconfigure_disks_reason(vm)),
            Capability::Publish => self
                .attached_reason(vm)
                .or_else(|| self.publish_reason(vm)),
        }
    }

    fn attached_reason(&self, vm: &VmSnapshot) -> Option<String> {
        if !vm.has_storage() {
            return Some("The VM has no storage".to_string());
        }

        if !vm.has_provider {
            return Some("The VM is not connected to a provider".to_string());
        }

        None
    }

    fn reconfigure_disks_reason(&self, vm: &VmSnapshot) -> Option<String> {
        let minimum = self.thresholds.reconfigure_disks();
        if vm
            .provider_supported_versions
            .iter()
            .any(|version| *version >= minimum)
        {
            None
        } else {
            Some(format!(
                "Disk reconfiguration requires provider API {minimum} or newer"
            ))
        }
    }

    fn publish_reason(&self, vm: &VmSnapshot) -> Option<String> {
        match normalize(&vm.power_state) {
            Ok(PowerState::Off) => {}
            Ok(state) => {
                return Some(format!(
                    "The VM must be powered off to publish (currently {state})"
                ));
            }
            Err(_) => {
                return Some(format!(
                    "The VM power state {:?} is not recognized",
                    vm.power_state.as_str()
                ));
            }
        }

        let minimum = self.thresholds.publish();
        match vm.highest_supported_api_version() {
            Some(highest) if highest >= minimum => None,
            _ => Some(format!("Publishing requires provider API {minimum} or newer")),
        }
    }
}

/// [`CapabilityNegotiator::supports`] with the default thresholds.
pub fn supports(capability: Capability, vm: &VmSnapshot) -> bool {
    CapabilityNegotiator::default().supports(capability, vm)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{StorageRef, StorageSet};

    fn storage() -> StorageSet {
        StorageSet::single(StorageRef("http://example.com/storages/XYZ".to_string()))
    }

    fn attached_vm(state: PowerState, versions: &[u32]) -> VmSnapshot {
        VmSnapshot::new("/api/vms/1", "down")
            .with_storage(storage())
            .with_provider(versions.iter().copied())
            .with_canonical_state(state)
    }

    #[test]
    fn test_clone_never_supported() {
        assert!(!supports(Capability::Clone, &attached_vm(PowerState::Off, &[3, 4])));
        assert!(!supports(Capability::Clone, &VmSnapshot::new("/api/vms/2", "up")));
    }

    #[test]
    fn test_reconfigure_disks_requires_storage() {
        let vm = VmSnapshot::new("/api/vms/1", "up");
        assert!(!supports(Capability::ReconfigureDisks, &vm));
    }

    #[test]
    fn test_reconfigure_disks_requires_provider() {
        let vm = VmSnapshot::new("/api/vms/1", "up").with_storage(storage());
        assert!(!supports(Capability::ReconfigureDisks, &vm));
    }

    #[test]
    fn test_reconfigure_disks_with_provider() {
        assert!(supports(
            Capability::ReconfigureDisks,
            &attached_vm(PowerState::On, &[3])
        ));
        assert!(!supports(
            Capability::ReconfigureDisks,
            &attached_vm(PowerState::On, &[])
        ));
    }

    #[test]
    fn test_publish_requires_storage_and_provider() {
        assert!(!supports(Capability::Publish, &VmSnapshot::new("/api/vms/1", "down")));
        let no_provider = VmSnapshot::new("/api/vms/1", "down").with_storage(storage());
        assert!(!supports(Capability::Publish, &no_provider));
    }

    #[test]
    fn test_publish_requires_powered_off() {
        assert!(!supports(Capability::Publish, &attached_vm(PowerState::On, &[4])));
        assert!(!supports(
            Capability::Publish,
            &attached_vm(PowerState::Suspended, &[4])
        ));
        assert!(supports(Capability::Publish, &attached_vm(PowerState::Off, &[4])));
    }

    #[test]
    fn test_publish_threshold_is_independent() {
        let vm = attached_vm(PowerState::Off, &[3]);
        assert!(supports(Capability::ReconfigureDisks, &vm));
        assert!(!supports(Capability::Publish, &vm));
    }

    #[test]
    fn test_unknown_power_state_refuses_publish() {
        let mut vm = attached_vm(PowerState::Off, &[4]);
        vm.power_state = "image_locked".into();
        let reason = CapabilityNegotiator::default()
            .unsupported_reason(Capability::Publish, &vm)
            .unwrap();
        assert!(reason.contains("image_locked"));
    }

    #[test]
    fn test_custom_thresholds() {
        let negotiator = CapabilityNegotiator::new(CapabilityThresholds {
            reconfigure_disks_min_version: 4,
            publish_min_version: 5,
            unregister_min_version: 4,
        });
        let vm = attached_vm(PowerState::Off, &[3, 4]);
        assert!(negotiator.supports(Capability::ReconfigureDisks, &vm));
        assert!(!negotiator.supports(Capability::Publish, &vm));
        assert!(!negotiator.supports(
            Capability::ReconfigureDisks,
            &attached_vm(PowerState::Off, &[3])
        ));
    }
}
