/*
 * Load-time Configuration
 *
 * Each shim exposes one module parameter, `count`, injected by the host at
 * load time and read back at load and unload. Here that is an explicit
 * configuration struct handed to each load routine, not a global.
 */

use bitflags::bitflags;

bitflags! {
    /// Parameter permission bits, 0644-style
    ///
    /// Who may read or rewrite the parameter through the host's parameter
    /// mechanism. Octal values match the classic mode bits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ParamPerm: u32 {
        const OWNER_READ  = 0o400;
        const OWNER_WRITE = 0o200;
        const GROUP_READ  = 0o040;
        const OTHER_READ  = 0o004;
    }
}

impl ParamPerm {
    /// Owner read/write, group and others read (0644).
    pub const DEFAULT: Self = Self::from_bits_truncate(0o644);
}

/// Descriptor for a load-time parameter
///
/// Records what the host would publish about the parameter: its name and
/// the permission bits governing external access to it.
#[derive(Debug, Clone, Copy)]
pub struct ModuleParam {
    pub name: &'static str,
    pub perm: ParamPerm,
}

/// The `count` parameter descriptor shared by both shims.
pub const COUNT_PARAM: ModuleParam = ModuleParam {
    name: "count",
    perm: ParamPerm::DEFAULT,
};

/// Configuration passed into each shim's load routine
///
/// `count` has no semantics beyond being logged by the flag hook; it
/// exists to demonstrate parameter injection.
#[derive(Debug, Clone, Copy)]
pub struct ShimConfig {
    pub count: i32,
}

impl ShimConfig {
    pub const fn new(count: i32) -> Self {
        Self { count }
    }
}

impl Default for ShimConfig {
    fn default() -> Self {
        Self { count: 1 }
    }
}
