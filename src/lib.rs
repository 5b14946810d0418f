/*
 * ddsim - Driver Shim Simulation
 *
 * A user-space rendition of two tutorial device-driver shims: a character
 * device ("simple_charac_dd", major 240) and a USB flash-drive driver
 * ("My_USB"). Neither shim does any I/O; every handler logs its entry and
 * reports success. What makes them worth simulating is the registration
 * contract: each shim hands a table of callbacks to a host subsystem, and
 * the host routes matching events back to them.
 *
 * Why this is important:
 * - The host here stands in for the kernel: it owns the registration
 *   tables and invokes the shims' callbacks, so the whole lifecycle
 *   (load, dispatch, unload) runs inside ordinary tests
 * - Shim callbacks stay host-driven: nothing in `drivers/` initiates
 *   control flow, it only reacts, exactly like the real thing
 * - Log lines are the shims' only observable behavior, so the logger
 *   keeps a journal that tests can inspect
 *
 * Layout:
 * - io:      device operation traits and error codes
 * - host:    the simulated kernel side (chrdev table, USB core)
 * - drivers: the two shims
 * - config:  load-time parameters
 * - utils:   logging
 */

pub mod config;
pub mod drivers;
pub mod host;
pub mod io;
pub mod utils;

pub use config::ShimConfig;
pub use io::device::Errno;

/// Initializes the logging system.
///
/// Call once before loading any shim; repeated calls are no-ops.
pub fn init() {
    utils::logger::init();
}
