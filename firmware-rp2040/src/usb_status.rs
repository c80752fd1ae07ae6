//! USB bus state tracking and host remote wakeup.
//!
//! The USB device task owns the [`UsbDevice`](embassy_usb::UsbDevice), so
//! the polling task cannot call `remote_wakeup` itself. Instead the bus
//! state is mirrored into a static [`UsbStatus`] by a device [`Handler`],
//! and wake requests travel back to the USB task through the same state.

use dual_gamepad_core::LinkState;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_usb::Handler;

/// Bus state shared between the USB task and the polling task.
pub type UsbStatus = LinkState<CriticalSectionRawMutex>;

/// [`HostLink`](dual_gamepad_core::HostLink) of the polling task.
pub type UsbHostLink = &'static UsbStatus;

/// Device event handler mirroring bus state into a [`UsbStatus`].
pub struct UsbStatusHandler {
    status: &'static UsbStatus,
}

impl UsbStatusHandler {
    pub fn new(status: &'static UsbStatus) -> Self {
        Self { status }
    }
}

impl Handler for UsbStatusHandler {
    fn enabled(&mut self, enabled: bool) {
        self.status.on_reset();
        if enabled {
            defmt::info!("USB device enabled");
        } else {
            defmt::info!("USB device disabled");
        }
    }

    fn reset(&mut self) {
        // The stack clears its own suspend flag without a resume event.
        self.status.on_reset();
        defmt::info!("USB bus reset");
    }

    fn addressed(&mut self, addr: u8) {
        defmt::info!("USB address set to {}", addr);
    }

    fn configured(&mut self, configured: bool) {
        if configured {
            defmt::info!("USB configured, gamepads ready");
        } else {
            defmt::info!("USB unconfigured");
        }
    }

    fn suspended(&mut self, suspended: bool) {
        self.status.on_suspended(suspended);
        if suspended {
            defmt::info!("USB suspended");
        } else {
            defmt::info!("USB resumed");
        }
    }

    fn remote_wakeup_enabled(&mut self, enabled: bool) {
        defmt::debug!("Host set remote wakeup enabled: {}", enabled);
    }
}
