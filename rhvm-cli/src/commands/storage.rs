use crate::output::{OutputFormat, OutputFormatter, print_info};
use crate::utils::{load_snapshot, parse_disk_list};
use rhvm_core::{Result, StorageSet, StorageUpdate, detach_stale_storage};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Serialize)]
struct StorageReport {
    vm_ref: String,
    update: StorageUpdate,
    storage: StorageSet,
}

pub async fn execute(vm: PathBuf, live_disks: String, format: OutputFormat) -> Result<()> {
    let vm = load_snapshot(&vm)?;
    let disks = parse_disk_list(&live_disks);

    let update = detach_stale_storage(&vm, &disks);
    let mut storage = vm.storage.clone();
    update.apply(&mut storage);

    if let OutputFormat::Table = format {
        match update {
            StorageUpdate::Clear => print_info(&format!(
                "No disks left for {}, storage would be cleared",
                vm.vm_ref
            )),
            StorageUpdate::Retain => print_info(&format!(
                "{} disk(s) remain for {}, storage is kept",
                disks.len(),
                vm.vm_ref
            )),
        }
    }

    println!(
        "{}",
        format.format(StorageReport {
            vm_ref: vm.vm_ref,
            update,
            storage,
        })
    );

    Ok(())
}
