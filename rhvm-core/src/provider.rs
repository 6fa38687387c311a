use crate::error::{Result, RhvmError};
use crate::types::{ApiVersion, DiskRef};
use async_trait::async_trait;
use std::collections::BTreeSet;

/// Connection to the virtualization manager that owns a VM.
///
/// Implementations own transport, authentication and any retry policy.
#[async_trait]
pub trait ProviderHandle: Send + Sync {
    async fn supported_api_versions(&self) -> Result<BTreeSet<ApiVersion>>;

    async fn highest_supported_api_version(&self) -> Result<ApiVersion> {
        self.supported_api_versions()
            .await?
            .into_iter()
            .next_back()
            .ok_or_else(|| {
                RhvmError::provider_unavailable(
                    "highest_supported_api_version",
                    "provider reported no API versions",
                )
            })
    }

    /// Disks the provider currently lists for `vm_ref`.
    async fn fetch_disks(&self, vm_ref: &str) -> Result<Vec<DiskRef>>;

    /// Acquire the provider-side service object for one VM. Callers must
    /// call [`ProviderVmService::release`] once they are done with it.
    async fn with_provider_object(&self, vm_ref: &str) -> Result<Box<dyn ProviderVmService>>;

    fn name(&self) -> &str;
}

/// Provider-side service object scoped to a single VM.
#[async_trait]
pub trait ProviderVmService: Send + Sync {
    async fn unregister(&self) -> Result<()>;

    async fn release(&self) {}
}
