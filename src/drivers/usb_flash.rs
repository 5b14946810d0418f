/*
 * USB Flash-Drive Shim ("My_USB")
 *
 * Stub USB driver for one specific flash-drive model (vendor 0x0781,
 * product 0x5567, a SanDisk Cruzer Blade). Probe accepts every device it
 * is offered without allocating anything; disconnect has nothing to
 * release. ID filtering is entirely the host's job: the handler itself
 * never re-validates the identity it is handed.
 *
 * Load registers the driver descriptor with the USB core and logs the
 * configured count; unload logs it again and deregisters. As with the
 * character shim, registration outcomes are not inspected.
 */

use crate::config::ShimConfig;
use crate::host::UsbCore;
use crate::host::usb::{UsbDeviceId, UsbDriver, UsbDriverDesc, UsbInterface};
use crate::io::device::Errno;
use std::sync::Arc;

/// Name the shim registers under.
pub const USB_NAME: &str = "My_USB";

/// The one device model this driver matches.
pub const CRUZER_BLADE: UsbDeviceId = UsbDeviceId::new(0x0781, 0x5567);

/// ID-match table: one entry plus the sentinel terminator.
pub static USB_ID_TABLE: &[UsbDeviceId] = &[CRUZER_BLADE, UsbDeviceId::SENTINEL];

/// The callback object; stateless, so a unit struct.
pub struct MyUsb;

impl UsbDriver for MyUsb {
    /// Accepts ownership of any device offered, allocating nothing.
    fn probe(&self, _intf: &UsbInterface, id: &UsbDeviceId) -> Result<(), Errno> {
        log::info!(
            "Inside PROBE func. USB ({:04X}:{:04X}) plugged",
            id.vendor,
            id.product
        );
        Ok(())
    }

    /// Nothing was acquired, so nothing to release.
    fn disconnect(&self, _intf: &UsbInterface) {
        log::info!("Inside DISCONNECT func. USB is disconnected");
    }
}

/// Descriptor handed to the USB core on load.
fn descriptor() -> UsbDriverDesc {
    UsbDriverDesc {
        name: USB_NAME,
        id_table: USB_ID_TABLE,
        driver: Arc::new(MyUsb),
    }
}

/// Load the shim into a host
///
/// Registers the driver descriptor and logs `config.count`. The
/// registration result is intentionally left unchecked.
pub fn load(core: &mut UsbCore, config: &ShimConfig) {
    log::info!("Inside sim_usb_dd init function");
    let _ = core.register_driver(descriptor());
    log::info!("sim_usb_dd count = {}", config.count);
}

/// Unload the shim from a host
///
/// Logs `config.count` once more, then deregisters. The result is not
/// surfaced.
pub fn unload(core: &mut UsbCore, config: &ShimConfig) {
    log::info!("Inside sim_usb_dd exit function");
    log::info!("sim_usb_dd count = {}", config.count);
    let _ = core.deregister_driver(USB_NAME);
}
