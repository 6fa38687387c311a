use crate::config::CapabilityThresholds;
use crate::error::{Result, RhvmError};
use crate::provider::ProviderHandle;
use crate::types::{ApiVersion, VmSnapshot};
use tracing::{info, warn};

/// Call shape used to deregister a VM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnregisterPath {
    /// `unregister` on the VM service object (API v4 and newer).
    NativeService,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct UnregistrationCoordinator {
    thresholds: CapabilityThresholds,
}

impl UnregistrationCoordinator {
    pub fn new(thresholds: CapabilityThresholds) -> Self {
        Self { thresholds }
    }

    /// Older API versions have no known deregistration path and are refused.
    pub fn select_path(&self, version: ApiVersion) -> Result<UnregisterPath> {
        let minimum = self.thresholds.unregister();
        if version >= minimum {
            Ok(UnregisterPath::NativeService)
        } else {
            Err(RhvmError::UnsupportedApiVersion {
                operation: "unregister".to_string(),
                version: version.0,
                minimum: minimum.0,
            })
        }
    }

    /// Deregister `vm` with exactly one provider call. No retries.
    ///
    /// The service object is released whether or not the call succeeds.
    pub async fn unregister(
        &self,
        vm: &VmSnapshot,
        provider: &dyn ProviderHandle,
        version: ApiVersion,
    ) -> Result<()> {
        match self.select_path(version)? {
            UnregisterPath::NativeService => {
                let service = provider.with_provider_object(&vm.vm_ref).await?;
                let result = service.unregister().await;
                service.release().await;

                match &result {
                    Ok(()) => info!("Unregistered {} via API {}", vm.vm_ref, version),
                    Err(e) => warn!("Failed to unregister {}: {}", vm.vm_ref, e),
                }
                result
            }
        }
    }
}
