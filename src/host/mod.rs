/*
 * Host Simulation
 *
 * The simulated kernel side: the registries the shims hand their callback
 * tables to, and the dispatch paths that route events back into them.
 *
 * Why this is important:
 * - Owns all registration state, so shims stay stateless
 * - Drives every shim callback (file operations, probe, disconnect);
 *   the shims never initiate control flow
 * - Surfaces registration errors the way a kernel would, even though the
 *   shims' load paths choose not to look at them
 */

pub mod chrdev;
pub mod usb;

pub use chrdev::ChrdevTable;
pub use usb::UsbCore;
