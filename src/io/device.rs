/*
 * Device Operations Layer
 *
 * Character-device operation trait plus the error codes the host can
 * produce. The trait replaces a fixed table of function pointers: one
 * named method per table slot, one implementation per device kind.
 *
 * This provides a simple abstraction for character devices with minimal
 * POSIX compatibility.
 */

/// POSIX errno values
///
/// Subset of standard POSIX error codes for host-side registration and
/// dispatch. The shims' own callbacks never produce any of these; their
/// contract is "always succeeds".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum Errno {
    EIO = 5,     // I/O error
    EBADF = 9,   // Bad file descriptor
    EBUSY = 16,  // Device or resource busy
    ENODEV = 19, // No such device
    EINVAL = 22, // Invalid argument
}

/// Opaque per-open context
///
/// Stands in for the inode/file pair a kernel hands to open and release.
/// The stub operations never look inside it; it exists so the signatures
/// carry the same shape as the real callback table.
#[derive(Debug, Clone)]
pub struct OpenContext {
    /// Major number of the node being opened
    pub major: u32,
    /// Name the driver registered under
    pub name: &'static str,
}

/// Character-device operations
///
/// One method per slot of the classic file-operations table, plus the
/// auxiliary `check_flags` hook. Implementations must be `Send + Sync`:
/// the host may invoke them from any thread, and each call must complete
/// using only its own arguments.
pub trait DeviceOps: Send + Sync {
    /// Called when the device node is opened.
    fn open(&self, ctx: &OpenContext) -> Result<(), Errno>;

    /// Read up to buf.len() bytes into buf at the given offset
    ///
    /// Returns the number of bytes read, or an error.
    fn read(&self, buf: &mut [u8], offset: u64) -> Result<usize, Errno>;

    /// Write buf.len() bytes from buf at the given offset
    ///
    /// Returns the number of bytes written, or an error.
    fn write(&self, buf: &[u8], offset: u64) -> Result<usize, Errno>;

    /// Called when the last reference to an open node is dropped.
    fn release(&self, ctx: &OpenContext) -> Result<(), Errno>;

    /// Auxiliary flag hook
    ///
    /// Invoked by the shim itself at load and unload with the module's
    /// `count` parameter, never per file operation.
    fn check_flags(&self, flag: i32) -> Result<(), Errno> {
        let _ = flag;
        Ok(())
    }
}
