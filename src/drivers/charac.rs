/*
 * Character-Device Shim ("simple_charac_dd")
 *
 * Stub character driver on major 240. Every operation logs its entry and
 * reports success; no byte is ever stored or produced. Reads complete
 * with zero bytes, and writes acknowledge the full requested length while
 * discarding the data. That write behavior is a documented gap in the
 * contract, preserved here deliberately; do not mistake it for a null
 * device design.
 *
 * Load registers the operations table with the host's chrdev table and
 * runs the flag hook with the configured count; unload runs the hook
 * again and unregisters. Registration outcomes are not inspected: load
 * and unload report success no matter what the host said.
 */

use crate::config::ShimConfig;
use crate::host::ChrdevTable;
use crate::io::device::{DeviceOps, Errno, OpenContext};
use std::sync::Arc;

/// Major number the shim registers.
pub const CHARAC_MAJOR: u32 = 240;

/// Name the shim registers under.
pub const CHARAC_NAME: &str = "simple_charac_dd";

/// The operations object; stateless, so a unit struct.
pub struct SimpleCharacDd;

impl DeviceOps for SimpleCharacDd {
    /// Always succeeds.
    fn open(&self, _ctx: &OpenContext) -> Result<(), Errno> {
        log::info!("Inside simple_charac_dd OPEN function");
        Ok(())
    }

    /// Always reports zero bytes; the destination is left untouched.
    fn read(&self, _buf: &mut [u8], _offset: u64) -> Result<usize, Errno> {
        log::info!("Inside simple_charac_dd READ function");
        Ok(0)
    }

    /// Always reports the full requested length without storing a byte.
    fn write(&self, buf: &[u8], _offset: u64) -> Result<usize, Errno> {
        log::info!("Inside simple_charac_dd WRITE function");
        Ok(buf.len())
    }

    /// Always succeeds.
    fn release(&self, _ctx: &OpenContext) -> Result<(), Errno> {
        log::info!("Inside simple_charac_dd RELEASE function");
        Ok(())
    }

    /// Logs the flag value unchanged.
    fn check_flags(&self, flag: i32) -> Result<(), Errno> {
        log::info!("Inside simple_charac_dd FLAG function, flag = {}", flag);
        Ok(())
    }
}

/// Load the shim into a host
///
/// Registers major 240 and runs the flag hook with `config.count`. The
/// registration result is intentionally left unchecked; load reports
/// success either way.
pub fn load(host: &mut ChrdevTable, config: &ShimConfig) {
    log::info!("Inside simple_charac_dd init function");
    let ops: Arc<dyn DeviceOps> = Arc::new(SimpleCharacDd);
    let _ = host.register_chrdev(CHARAC_MAJOR, CHARAC_NAME, ops.clone());
    let _ = ops.check_flags(config.count);
}

/// Unload the shim from a host
///
/// Runs the flag hook once more, then releases major 240. As with load,
/// the unregistration result is not surfaced.
pub fn unload(host: &mut ChrdevTable, config: &ShimConfig) {
    log::info!("Inside simple_charac_dd exit function");
    let _ = SimpleCharacDd.check_flags(config.count);
    let _ = host.unregister_chrdev(CHARAC_MAJOR);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::journal;

    fn loaded_host(count: i32) -> ChrdevTable {
        crate::init();
        let mut host = ChrdevTable::new();
        load(&mut host, &ShimConfig::new(count));
        host
    }

    #[test]
    fn load_registers_major_240() {
        let host = loaded_host(1);
        assert!(host.is_registered(CHARAC_MAJOR));
        assert_eq!(host.name_of(CHARAC_MAJOR), Some(CHARAC_NAME));
    }

    #[test]
    fn flag_hook_logs_count_at_load_and_unload() {
        // Distinctive value so concurrent tests cannot contribute matches.
        let mut host = loaded_host(4217);
        assert_eq!(journal::count_matching("FLAG function, flag = 4217"), 1);
        unload(&mut host, &ShimConfig::new(4217));
        assert_eq!(journal::count_matching("FLAG function, flag = 4217"), 2);
        assert!(!host.is_registered(CHARAC_MAJOR));
    }

    #[test]
    fn read_reports_zero_and_leaves_buffer_untouched() {
        let host = loaded_host(1);
        let mut buf = [0xa5u8; 64];
        assert_eq!(host.read(CHARAC_MAJOR, &mut buf, 0), Ok(0));
        assert!(buf.iter().all(|&b| b == 0xa5));
        assert!(journal::contains("simple_charac_dd READ function"));
    }

    #[test]
    fn write_reports_full_length_regardless_of_contents() {
        let host = loaded_host(1);
        assert_eq!(host.write(CHARAC_MAJOR, b"hello", 0), Ok(5));
        assert_eq!(host.write(CHARAC_MAJOR, &[0u8; 1000], 0), Ok(1000));
        assert_eq!(host.write(CHARAC_MAJOR, b"", 0), Ok(0));
        // Idempotent: a repeat of the same write reports the same length.
        assert_eq!(host.write(CHARAC_MAJOR, b"hello", 0), Ok(5));
    }

    #[test]
    fn open_and_release_succeed_in_any_order_relative_to_io() {
        let host = loaded_host(1);
        let mut buf = [0u8; 8];

        // I/O before any open succeeds; the stubs keep no per-open state.
        assert_eq!(host.read(CHARAC_MAJOR, &mut buf, 0), Ok(0));

        let ctx = host.open(CHARAC_MAJOR).unwrap();
        assert_eq!(host.write(CHARAC_MAJOR, b"x", 4), Ok(1));
        host.release(&ctx).unwrap();

        // Release/open again after I/O, still fine.
        let ctx = host.open(CHARAC_MAJOR).unwrap();
        host.release(&ctx).unwrap();
    }

    #[test]
    fn reload_after_unload_succeeds() {
        let config = ShimConfig::default();
        let mut host = ChrdevTable::new();
        crate::init();
        load(&mut host, &config);
        unload(&mut host, &config);
        load(&mut host, &config);
        assert!(host.is_registered(CHARAC_MAJOR));
    }

    #[test]
    fn double_load_keeps_first_registration_and_still_reports_success() {
        // The second load's registration fails with EBUSY inside the
        // host, but the shim's load path does not surface it.
        let mut host = loaded_host(1);
        load(&mut host, &ShimConfig::default());
        assert_eq!(host.name_of(CHARAC_MAJOR), Some(CHARAC_NAME));
    }
}
