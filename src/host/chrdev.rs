/*
 * Character-Device Registration Table
 *
 * Host-side table mapping a major number to a registered driver. Each
 * entry pairs the name the driver registered under with its operations
 * object. The table also carries the dispatch path a VFS would provide:
 * opening a major yields an open context, and read/write/release on that
 * context land in the registered operations.
 *
 * Registration is first come, first served: a taken major stays with its
 * owner until that owner unregisters it.
 */

use crate::io::device::{DeviceOps, Errno, OpenContext};
use std::collections::BTreeMap;
use std::sync::Arc;

/// One registered character driver.
struct ChrdevEntry {
    name: &'static str,
    ops: Arc<dyn DeviceOps>,
}

/// Host-side character-device table
///
/// Maps major numbers to driver registrations. Uses Arc for the
/// operations object, allowing open contexts handed out by `open` to
/// outlive a lookup without borrowing the table.
pub struct ChrdevTable {
    majors: BTreeMap<u32, ChrdevEntry>,
}

impl ChrdevTable {
    /// Create an empty table with no registered majors.
    pub fn new() -> Self {
        Self {
            majors: BTreeMap::new(),
        }
    }

    /// Register a driver for a major number
    ///
    /// Returns EBUSY if the major is already taken. On success the table
    /// owns the registration until `unregister_chrdev` with the same
    /// major.
    pub fn register_chrdev(
        &mut self,
        major: u32,
        name: &'static str,
        ops: Arc<dyn DeviceOps>,
    ) -> Result<(), Errno> {
        if self.majors.contains_key(&major) {
            return Err(Errno::EBUSY);
        }
        self.majors.insert(major, ChrdevEntry { name, ops });
        log::info!("chrdev: registered major {} ({})", major, name);
        Ok(())
    }

    /// Unregister the driver holding a major number
    ///
    /// Returns ENODEV if no driver holds the major.
    pub fn unregister_chrdev(&mut self, major: u32) -> Result<(), Errno> {
        let entry = self.majors.remove(&major).ok_or(Errno::ENODEV)?;
        log::info!("chrdev: unregistered major {} ({})", major, entry.name);
        Ok(())
    }

    /// Name registered for a major, if any.
    pub fn name_of(&self, major: u32) -> Option<&'static str> {
        self.majors.get(&major).map(|e| e.name)
    }

    /// Whether a major is currently registered.
    pub fn is_registered(&self, major: u32) -> bool {
        self.majors.contains_key(&major)
    }

    fn entry(&self, major: u32) -> Result<&ChrdevEntry, Errno> {
        self.majors.get(&major).ok_or(Errno::ENODEV)
    }

    /// Open the device node for a major
    ///
    /// Dispatches the registered open handler and returns the context to
    /// use for subsequent release. ENODEV if the major is free.
    pub fn open(&self, major: u32) -> Result<OpenContext, Errno> {
        let entry = self.entry(major)?;
        let ctx = OpenContext {
            major,
            name: entry.name,
        };
        entry.ops.open(&ctx)?;
        Ok(ctx)
    }

    /// Read from the device behind a major.
    pub fn read(&self, major: u32, buf: &mut [u8], offset: u64) -> Result<usize, Errno> {
        self.entry(major)?.ops.read(buf, offset)
    }

    /// Write to the device behind a major.
    pub fn write(&self, major: u32, buf: &[u8], offset: u64) -> Result<usize, Errno> {
        self.entry(major)?.ops.write(buf, offset)
    }

    /// Release an open context.
    pub fn release(&self, ctx: &OpenContext) -> Result<(), Errno> {
        self.entry(ctx.major)?.ops.release(ctx)
    }
}

impl Default for ChrdevTable {
    fn default() -> Self {
        Self::new()
    }
}
