/*
 * USB Core Simulation
 *
 * Host-side model of the USB subsystem the shim registers with: a list of
 * driver descriptors in registration order, plus the per-device claim
 * state the core tracks on the drivers' behalf.
 *
 * Matching works the way hotplug does: when a device is plugged, the core
 * walks each registered descriptor's ID table up to the sentinel entry.
 * The first driver with a matching entry is offered the device via its
 * probe callback; a successful probe claims the device. A claimed device
 * routes its eventual unplug to the claiming driver's disconnect.
 *
 * Per device handle the states are exactly two: unclaimed and
 * claimed-by-a-driver. Probe moves unclaimed to claimed; unplug removes
 * the handle, which makes claimed-to-unclaimed terminal. The drivers
 * never initiate either transition.
 */

use crate::io::device::Errno;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Vendor/product identity of a USB device
///
/// The all-zero value is the sentinel terminating an ID table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsbDeviceId {
    pub vendor: u16,
    pub product: u16,
}

impl UsbDeviceId {
    pub const fn new(vendor: u16, product: u16) -> Self {
        Self { vendor, product }
    }

    /// Table terminator.
    pub const SENTINEL: Self = Self::new(0, 0);

    pub const fn is_sentinel(&self) -> bool {
        self.vendor == 0 && self.product == 0
    }
}

/// Handle for one plugged interface
///
/// What the core hands to probe and disconnect. Carries the core-assigned
/// address and the device's identity; the stub driver only ever logs it.
#[derive(Debug, Clone)]
pub struct UsbInterface {
    /// Core-assigned device address, unique per plug event
    pub address: u32,
    /// Identity the device presented when plugged
    pub id: UsbDeviceId,
}

/// USB driver callbacks
///
/// Implementations must be `Send + Sync`; the core invokes them from its
/// caller's thread and each call completes using only its arguments.
pub trait UsbDriver: Send + Sync {
    /// Offered a newly plugged device whose identity matched the ID table
    ///
    /// Returning Ok accepts ownership of the device; an error declines it
    /// and leaves the device unclaimed.
    fn probe(&self, intf: &UsbInterface, id: &UsbDeviceId) -> Result<(), Errno>;

    /// A device this driver claimed has been unplugged.
    fn disconnect(&self, intf: &UsbInterface);
}

/// Driver descriptor registered with the core
///
/// Name, ID-match table (sentinel terminated), and the callback object.
/// The core owns the descriptor for the registration's lifetime.
pub struct UsbDriverDesc {
    pub name: &'static str,
    pub id_table: &'static [UsbDeviceId],
    pub driver: Arc<dyn UsbDriver>,
}

/// One plugged device and who, if anyone, claimed it.
struct PluggedDevice {
    intf: UsbInterface,
    /// Name of the claiming driver; None while unclaimed
    claimed_by: Option<&'static str>,
}

/// The simulated USB subsystem.
pub struct UsbCore {
    drivers: Vec<UsbDriverDesc>,
    devices: BTreeMap<u32, PluggedDevice>,
    next_address: u32,
}

impl UsbCore {
    pub fn new() -> Self {
        Self {
            drivers: Vec::new(),
            devices: BTreeMap::new(),
            next_address: 1,
        }
    }

    /// Register a driver descriptor
    ///
    /// EBUSY if a driver with the same name is already registered.
    /// Already-plugged devices are not re-offered; matching happens at
    /// plug time only.
    pub fn register_driver(&mut self, desc: UsbDriverDesc) -> Result<(), Errno> {
        if self.drivers.iter().any(|d| d.name == desc.name) {
            return Err(Errno::EBUSY);
        }
        log::info!("usbcore: registered new interface driver {}", desc.name);
        self.drivers.push(desc);
        Ok(())
    }

    /// Deregister a driver by name
    ///
    /// Devices the driver had claimed go back to unclaimed without a
    /// disconnect callback; the handles themselves stay plugged. ENODEV
    /// if the name is not registered.
    pub fn deregister_driver(&mut self, name: &str) -> Result<(), Errno> {
        let idx = self
            .drivers
            .iter()
            .position(|d| d.name == name)
            .ok_or(Errno::ENODEV)?;
        self.drivers.remove(idx);
        for dev in self.devices.values_mut() {
            if dev.claimed_by == Some(name) {
                dev.claimed_by = None;
            }
        }
        log::info!("usbcore: deregistering interface driver {}", name);
        Ok(())
    }

    /// Whether a driver name is currently registered.
    pub fn is_registered(&self, name: &str) -> bool {
        self.drivers.iter().any(|d| d.name == name)
    }

    /// Plug a device into the simulated bus
    ///
    /// Assigns an address, then offers the device to registered drivers
    /// in registration order. The first driver whose ID table matches and
    /// whose probe accepts becomes the claimant. Returns the address
    /// regardless of whether anyone claimed the device.
    pub fn plug(&mut self, id: UsbDeviceId) -> u32 {
        let address = self.next_address;
        self.next_address += 1;

        log::info!(
            "usbcore: new device {}, idVendor={:04x}, idProduct={:04x}",
            address,
            id.vendor,
            id.product
        );

        let intf = UsbInterface { address, id };
        let mut claimed_by = None;
        for desc in &self.drivers {
            if !table_matches(desc.id_table, &id) {
                continue;
            }
            if desc.driver.probe(&intf, &id).is_ok() {
                claimed_by = Some(desc.name);
                break;
            }
        }

        if claimed_by.is_none() {
            log::info!("usbcore: device {} left unclaimed", address);
        }
        self.devices.insert(address, PluggedDevice { intf, claimed_by });
        address
    }

    /// Unplug a device by address
    ///
    /// If a driver claimed it, that driver's disconnect runs first. The
    /// handle is then removed for good; unplugging it again is ENODEV.
    pub fn unplug(&mut self, address: u32) -> Result<(), Errno> {
        let dev = self.devices.remove(&address).ok_or(Errno::ENODEV)?;
        log::info!("usbcore: device {} disconnect", address);
        if let Some(name) = dev.claimed_by {
            if let Some(desc) = self.drivers.iter().find(|d| d.name == name) {
                desc.driver.disconnect(&dev.intf);
            }
        }
        Ok(())
    }

    /// Name of the driver that claimed an address, if any.
    pub fn claimant(&self, address: u32) -> Option<&'static str> {
        self.devices.get(&address).and_then(|d| d.claimed_by)
    }

    /// Whether an address refers to a plugged device.
    pub fn is_plugged(&self, address: u32) -> bool {
        self.devices.contains_key(&address)
    }
}

impl Default for UsbCore {
    fn default() -> Self {
        Self::new()
    }
}

/// Walk an ID table up to the sentinel, looking for an exact match.
fn table_matches(table: &[UsbDeviceId], id: &UsbDeviceId) -> bool {
    table
        .iter()
        .take_while(|entry| !entry.is_sentinel())
        .any(|entry| entry == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static TABLE: &[UsbDeviceId] = &[UsbDeviceId::new(0x1234, 0xabcd), UsbDeviceId::SENTINEL];

    /// Driver that counts its callbacks.
    struct Recorder {
        probes: AtomicUsize,
        disconnects: AtomicUsize,
    }

    impl Recorder {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                probes: AtomicUsize::new(0),
                disconnects: AtomicUsize::new(0),
            })
        }
    }

    impl UsbDriver for Recorder {
        fn probe(&self, _intf: &UsbInterface, _id: &UsbDeviceId) -> Result<(), Errno> {
            self.probes.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
        fn disconnect(&self, _intf: &UsbInterface) {
            self.disconnects.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn desc(name: &'static str, driver: Arc<Recorder>) -> UsbDriverDesc {
        UsbDriverDesc {
            name,
            id_table: TABLE,
            driver,
        }
    }

    #[test]
    fn matching_device_is_offered_and_claimed() {
        let mut core = UsbCore::new();
        let driver = Recorder::new();
        core.register_driver(desc("rec", driver.clone())).unwrap();

        let addr = core.plug(UsbDeviceId::new(0x1234, 0xabcd));
        assert_eq!(driver.probes.load(Ordering::SeqCst), 1);
        assert_eq!(core.claimant(addr), Some("rec"));
    }

    #[test]
    fn non_matching_device_is_never_probed() {
        let mut core = UsbCore::new();
        let driver = Recorder::new();
        core.register_driver(desc("rec", driver.clone())).unwrap();

        let addr = core.plug(UsbDeviceId::new(0xdead, 0xbeef));
        assert_eq!(driver.probes.load(Ordering::SeqCst), 0);
        assert_eq!(core.claimant(addr), None);
        assert!(core.is_plugged(addr));
    }

    #[test]
    fn sentinel_identity_never_matches() {
        // A device presenting the all-zero identity must not match the
        // terminator entry itself.
        let mut core = UsbCore::new();
        let driver = Recorder::new();
        core.register_driver(desc("rec", driver.clone())).unwrap();

        core.plug(UsbDeviceId::SENTINEL);
        assert_eq!(driver.probes.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn unplug_routes_disconnect_to_claimant_once() {
        let mut core = UsbCore::new();
        let driver = Recorder::new();
        core.register_driver(desc("rec", driver.clone())).unwrap();

        let addr = core.plug(UsbDeviceId::new(0x1234, 0xabcd));
        core.unplug(addr).unwrap();
        assert_eq!(driver.disconnects.load(Ordering::SeqCst), 1);

        // The handle is gone for good.
        assert_eq!(core.unplug(addr), Err(Errno::ENODEV));
        assert_eq!(driver.disconnects.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn unplug_of_unclaimed_device_invokes_nothing() {
        let mut core = UsbCore::new();
        let driver = Recorder::new();
        core.register_driver(desc("rec", driver.clone())).unwrap();

        let addr = core.plug(UsbDeviceId::new(0xdead, 0xbeef));
        core.unplug(addr).unwrap();
        assert_eq!(driver.disconnects.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn first_registered_matching_driver_wins() {
        let mut core = UsbCore::new();
        let first = Recorder::new();
        let second = Recorder::new();
        core.register_driver(desc("first", first.clone())).unwrap();
        core.register_driver(desc("second", second.clone())).unwrap();

        let addr = core.plug(UsbDeviceId::new(0x1234, 0xabcd));
        assert_eq!(core.claimant(addr), Some("first"));
        assert_eq!(first.probes.load(Ordering::SeqCst), 1);
        assert_eq!(second.probes.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn duplicate_driver_name_is_busy() {
        let mut core = UsbCore::new();
        core.register_driver(desc("rec", Recorder::new())).unwrap();
        let err = core.register_driver(desc("rec", Recorder::new())).unwrap_err();
        assert_eq!(err, Errno::EBUSY);
    }

    #[test]
    fn deregister_releases_claims_without_disconnect() {
        let mut core = UsbCore::new();
        let driver = Recorder::new();
        core.register_driver(desc("rec", driver.clone())).unwrap();

        let addr = core.plug(UsbDeviceId::new(0x1234, 0xabcd));
        core.deregister_driver("rec").unwrap();
        assert_eq!(core.claimant(addr), None);
        assert!(core.is_plugged(addr));
        assert_eq!(driver.disconnects.load(Ordering::SeqCst), 0);

        assert_eq!(core.deregister_driver("rec"), Err(Errno::ENODEV));
    }
}
