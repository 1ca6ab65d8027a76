//! Scratch sysfs trees for host tests
//!
//! Available under `cfg(test)` and with the `test-util` feature.

use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::interface::SysfsInterface;

/// Temporary directory laid out like `/sys/class/gpio`
///
/// Each requested line gets `direction`, `edge` and `value` files up front,
/// since plain files cannot appear on export the way kernel ones do. The
/// tree is removed on drop.
pub struct FakeSysfs {
    pub root: PathBuf,
}

impl FakeSysfs {
    pub fn new(lines: &[u16]) -> Self {
        static NEXT: AtomicUsize = AtomicUsize::new(0);
        let root = std::env::temp_dir().join(format!(
            "gpio-sysfs-test-{}-{}",
            std::process::id(),
            NEXT.fetch_add(1, Ordering::Relaxed)
        ));
        fs::create_dir_all(&root).expect("create scratch root");
        fs::write(root.join("export"), b"").expect("create export");
        for line in lines {
            let dir = root.join(format!("gpio{line}"));
            fs::create_dir_all(&dir).expect("create line directory");
            fs::write(dir.join("direction"), b"in").expect("create direction");
            fs::write(dir.join("edge"), b"none").expect("create edge");
            fs::write(dir.join("value"), b"0\n").expect("create value");
        }
        Self { root }
    }

    pub fn interface(&self) -> SysfsInterface {
        SysfsInterface::with_root(&self.root).expect("scratch root is a valid path")
    }

    /// Contents of a file relative to the root
    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.root.join(relative)).expect("read scratch file")
    }

    pub fn set_value(&self, line: u16, level: &str) {
        fs::write(self.root.join(format!("gpio{line}/value")), level).expect("write value");
    }

    pub fn remove(&self, relative: &str) {
        fs::remove_file(self.root.join(relative)).expect("remove scratch file");
    }
}

impl Drop for FakeSysfs {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.root);
    }
}
