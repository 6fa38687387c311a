use crate::capabilities::CapabilityNegotiator;
use crate::config::Config;
use crate::error::Result;
use crate::operations::is_available;
use crate::power::normalize;
use crate::provider::ProviderHandle;
use crate::storage::{StorageUpdate, disconnect_storage};
use crate::types::{Capability, Operation, PowerState, VmSnapshot};
use crate::unregister::UnregistrationCoordinator;
use std::sync::Arc;
use tracing::{debug, warn};

/// Ties the lifecycle rules to one provider connection.
pub struct VmController {
    provider: Arc<dyn ProviderHandle>,
    negotiator: CapabilityNegotiator,
    coordinator: UnregistrationCoordinator,
}

impl VmController {
    pub fn new(provider: Arc<dyn ProviderHandle>, config: &Config) -> Self {
        Self {
            provider,
            negotiator: CapabilityNegotiator::new(config.thresholds),
            coordinator: UnregistrationCoordinator::new(config.thresholds),
        }
    }

    pub fn provider(&self) -> &Arc<dyn ProviderHandle> {
        &self.provider
    }

    pub fn power_state(&self, vm: &VmSnapshot) -> Result<PowerState> {
        normalize(&vm.power_state)
    }

    pub fn is_available(&self, vm: &VmSnapshot, op: Operation) -> Result<bool> {
        Ok(is_available(op, self.power_state(vm)?))
    }

    pub fn supports(&self, capability: Capability, vm: &VmSnapshot) -> bool {
        self.negotiator.supports(capability, vm)
    }

    pub fn unsupported_reason(&self, capability: Capability, vm: &VmSnapshot) -> Option<String> {
        self.negotiator.unsupported_reason(capability, vm)
    }

    /// Copy of `vm` carrying the API versions the provider reports right now.
    pub async fn refresh_snapshot(&self, vm: &VmSnapshot) -> Result<VmSnapshot> {
        let versions = self.provider.supported_api_versions().await?;
        debug!(
            "Provider {} supports API versions {:?}",
            self.provider.name(),
            versions
        );

        let mut refreshed = vm.clone();
        refreshed.has_provider = true;
        refreshed.provider_supported_versions = versions;
        Ok(refreshed)
    }

    /// Like [`Self::supports`], but against a freshly queried version set.
    /// A provider that cannot be reached refuses the capability.
    pub async fn supports_live(&self, capability: Capability, vm: &VmSnapshot) -> bool {
        if capability == Capability::Clone || !vm.has_storage() || !vm.has_provider {
            return self.supports(capability, vm);
        }

        match self.refresh_snapshot(vm).await {
            Ok(refreshed) => self.supports(capability, &refreshed),
            Err(e) => {
                warn!(
                    "Cannot query API versions for {}, refusing {}: {}",
                    vm.vm_ref, capability, e
                );
                false
            }
        }
    }

    pub async fn disconnect_storage(&self, vm: &VmSnapshot) -> Result<StorageUpdate> {
        disconnect_storage(self.provider.as_ref(), vm).await
    }

    /// Deregister `vm` using the provider's highest supported API version.
    pub async fn raw_unregister(&self, vm: &VmSnapshot) -> Result<()> {
        let version = self.provider.highest_supported_api_version().await?;
        self.coordinator
            .unregister(vm, self.provider.as_ref(), version)
            .await
    }
}
