//! Build-time configuration: pin layout, axis scale and USB identity.
//!
//! Everything here is fixed by Cargo features; there is no runtime
//! configuration.

use dual_gamepad_core::{report_descriptor, AxisScale, PadLayout, REPORT_DESCRIPTOR_LEN};

#[cfg(all(feature = "layout-9-button", feature = "layout-6-button"))]
compile_error!("Cannot enable both `layout-9-button` and `layout-6-button` features - select one pin layout");

#[cfg(not(any(feature = "layout-9-button", feature = "layout-6-button")))]
compile_error!("Select a pin layout: enable `layout-9-button` or `layout-6-button`");

#[cfg(all(feature = "axis-full", feature = "axis-unit"))]
compile_error!("Cannot enable both `axis-full` and `axis-unit` features - they define conflicting axis ranges");

#[cfg(not(any(feature = "axis-full", feature = "axis-unit")))]
compile_error!("Select an axis scale: enable `axis-full` or `axis-unit`");

/// GPIOs broken out on a Raspberry Pi Pico.
///
/// GPIO 23-25 and 29 are wired to the regulator, VBUS sense, the on-board
/// LED and VSYS sense.
pub const PICO_USABLE_PINS: u32 = 0x1C7F_FFFF;

/// GPIO of the on-board LED.
pub const LED_PIN: u8 = 25;

#[cfg(feature = "axis-unit")]
const AXIS_SCALE: AxisScale = AxisScale::Unit;
#[cfg(feature = "axis-full")]
const AXIS_SCALE: AxisScale = AxisScale::Full;

#[cfg(feature = "layout-6-button")]
const BASE_LAYOUT: PadLayout<'static> = dual_gamepad_core::PICO_DUAL_6;
#[cfg(feature = "layout-9-button")]
const BASE_LAYOUT: PadLayout<'static> = dual_gamepad_core::PICO_DUAL_9;

/// The layout this firmware is built for.
pub const LAYOUT: PadLayout<'static> = BASE_LAYOUT.with_axis_scale(AXIS_SCALE);

/// HID report descriptor describing both gamepads of [`LAYOUT`].
pub static REPORT_DESCRIPTOR: [u8; REPORT_DESCRIPTOR_LEN] =
    report_descriptor(LAYOUT.buttons_per_player, LAYOUT.axis_scale);

// USB identity
pub const USB_VID: u16 = 0x16C0;
pub const USB_PID: u16 = 0x05E1;
pub const USB_MANUFACTURER: &str = "Rust Gamepad";
pub const USB_PRODUCT: &str = "Pico Dual Gamepad";
pub const USB_SERIAL: &str = "001";
pub const USB_MAX_POWER_MA: u16 = 100;

/// HID interrupt IN polling interval.
pub const HID_POLL_MS: u8 = 1;
