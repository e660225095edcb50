use std::path::PathBuf;

use serde::Serialize;
use sysinfo::Disks;

#[derive(Debug, Clone, Serialize)]
pub struct DiskInfo {
    pub mount_point: PathBuf,
    pub total: u64,
    pub available: u64,
    pub used: u64,
}

impl DiskInfo {
    pub fn usage_percent(&self) -> f32 {
        if self.total == 0 {
            return 0.0;
        }
        self.used as f32 / self.total as f32 * 100.0
    }
}

/// One-shot snapshot of every mounted volume.
pub fn disk_usage() -> Vec<DiskInfo> {
    let disks = Disks::new_with_refreshed_list();
    disks
        .iter()
        .map(|disk| {
            let total = disk.total_space();
            let available = disk.available_space();
            DiskInfo {
                mount_point: disk.mount_point().to_path_buf(),
                total,
                available,
                used: total.saturating_sub(available),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usage_percent_handles_empty_disk() {
        let disk = DiskInfo {
            mount_point: PathBuf::from("C:\\"),
            total: 0,
            available: 0,
            used: 0,
        };
        assert_eq!(disk.usage_percent(), 0.0);

        let half = DiskInfo {
            total: 200,
            available: 100,
            used: 100,
            ..disk
        };
        assert_eq!(half.usage_percent(), 50.0);
    }
}
