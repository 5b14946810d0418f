/*
 * Driver Shims
 *
 * The two tutorial shims this crate exists to model. Both are pure
 * registration exercises: they hand the host a callback table on load,
 * take it back on unload, and log every callback in between. Neither
 * touches data or holds state.
 *
 * Driver catalogue:
 * - charac:    "simple_charac_dd", character device on major 240
 * - usb_flash: "My_USB", claims one specific flash-drive model
 */

pub mod charac;
pub mod usb_flash;
