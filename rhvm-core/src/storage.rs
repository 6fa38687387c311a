use crate::error::Result;
use crate::provider::ProviderHandle;
use crate::types::{DiskRef, StorageSet, VmSnapshot};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// What the caller should do with a VM's recorded storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageUpdate {
    /// The provider lists no disks: drop the primary reference and the collection.
    Clear,
    /// Disks remain: leave the record untouched.
    Retain,
}

impl StorageUpdate {
    pub fn apply(&self, storage: &mut StorageSet) {
        match self {
            StorageUpdate::Clear => {
                storage.primary = None;
                storage.storages.clear();
            }
            StorageUpdate::Retain => {}
        }
    }
}

pub fn detach_stale_storage(vm: &VmSnapshot, live_disks: &[DiskRef]) -> StorageUpdate {
    if live_disks.is_empty() {
        debug!("No disks left for {}, clearing storage", vm.vm_ref);
        StorageUpdate::Clear
    } else {
        debug!(
            "{} disk(s) still attached to {}, keeping storage",
            live_disks.len(),
            vm.vm_ref
        );
        StorageUpdate::Retain
    }
}

/// Fetch the live disk list from the provider and decide the storage update.
///
/// A failed fetch is returned as-is; the record is only touched by the caller.
pub async fn disconnect_storage(
    provider: &dyn ProviderHandle,
    vm: &VmSnapshot,
) -> Result<StorageUpdate> {
    let live_disks = provider.fetch_disks(&vm.vm_ref).await?;
    let update = detach_stale_storage(vm, &live_disks);

    info!(
        "Storage for {} on {}: {:?}",
        vm.vm_ref,
        provider.name(),
        update
    );
    Ok(update)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::StorageRef;

    fn vm_with_storage() -> VmSnapshot {
        VmSnapshot::new("/api/vms/1", "down").with_storage(StorageSet::single(StorageRef(
            "/api/storagedomains/ee745353-c069-4de8-8d76-ec2e155e2ca0".to_string(),
        )))
    }

    #[test]
    fn test_no_disks_clears_storage() {
        let vm = vm_with_storage();
        let update = detach_stale_storage(&vm, &[]);
        assert_eq!(update, StorageUpdate::Clear);

        let mut storage = vm.storage.clone();
        update.apply(&mut storage);
        assert!(storage.primary.is_none());
        assert!(storage.storages.is_empty());
    }

    #[test]
    fn test_remaining_disks_keep_primary() {
        let vm = vm_with_storage();
        let disks = [DiskRef::new("da123bb9-095a-4933-95f2-8032dfa332e1")];
        let update = detach_stale_storage(&vm, &disks);
        assert_eq!(update, StorageUpdate::Retain);

        let mut storage = vm.storage.clone();
        update.apply(&mut storage);
        assert_eq!(storage, vm.storage);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let vm = vm_with_storage();
        let mut storage = vm.storage.clone();

        detach_stale_storage(&vm, &[]).apply(&mut storage);
        let cleared = storage.clone();

        let vm = vm.with_storage(storage.clone());
        detach_stale_storage(&vm, &[]).apply(&mut storage);
        assert_eq!(storage, cleared);
        assert!(storage.is_empty());
    }
}
