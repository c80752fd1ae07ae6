//! Two-player GPIO to USB HID gamepad firmware for RP2040.
//!
//! This crate provides the embedded implementation of a dual gamepad that
//! reads buttons and directions from GPIO and presents them to the host as
//! two USB HID gamepads.
//!
//! # Overview
//!
//! The firmware runs on a Raspberry Pi Pico (RP2040) and:
//! 1. Samples every monitored GPIO in one `GPIO_IN` read
//! 2. Debounces each input with a time-gated window
//! 3. Sends the report of each player whose inputs changed
//!
//! # Hardware Configuration (`layout-9-button`)
//!
//! | Player | Up | Down | Left | Right | Buttons 1-9                      |
//! |--------|----|------|------|-------|----------------------------------|
//! | A      | 2  | 3    | 4    | 5     | 10 11 12 13 14 15 0 28 27        |
//! | B      | 6  | 7    | 8    | 9     | 21 20 19 18 17 16 1 26 22        |
//!
//! The `layout-6-button` variant drops the last three buttons of each
//! player. Switches connect the pin to ground; internal pull-ups are used.
//! GPIO 25 drives the on-board LED (input activity).
//!
//! # Architecture
//!
//! The firmware uses the Embassy async runtime with two tasks:
//!
//! - **USB Task**: Manages the USB device stack, suspend and remote wakeup
//! - **Gamepad Task**: Runs the [`GamepadDriver`] polling loop
//!
//! Bus state reaches the gamepad task through [`UsbStatus`]; wake requests
//! travel back to the USB task through the same structure.
//!
//! # Modules
//!
//! - [`config`]: Build-time layout and USB identity
//! - [`pins`]: GPIO pin source ([`GpioPins`])
//! - [`usb_output`]: USB HID report sink ([`UsbReportSink`])
//! - [`usb_status`]: Bus state tracking and host link ([`UsbStatus`], [`UsbHostLink`])
//! - [`status_led`]: Activity LED ([`LedIndicator`])
//!
//! # Features
//!
//! - **`dev-panic`** (default): Use `panic-probe` for development (prints panic info via RTT)
//! - **`prod-panic`**: Use `panic-reset` for production (silent reset)
//! - **`layout-9-button`** (default) / **`layout-6-button`**: Pin layout
//! - **`axis-full`** (default) / **`axis-unit`**: Direction values ±127 or ±1
//! - **`led-status`** (default): Light the on-board LED while input is held
//! - **`remote-wakeup`** (default): Wake a suspended host on input
//!
//! # Re-exports
//!
//! This crate re-exports the main items of [`dual_gamepad_core`] for
//! convenience, so consumers only need to depend on this crate.

#![no_std]

#[cfg(all(feature = "dev-panic", feature = "prod-panic"))]
compile_error!("Cannot enable both `dev-panic` and `prod-panic` features - they install conflicting panic handlers");

// Re-export core types for convenience
pub use dual_gamepad_core::{
    Clock, GamepadDriver, HostLink, LayoutError, OutputError, PadLayout, PadMap, PinSource,
    Player, PlayerReport, ReportSink, StatusIndicator,
};

pub mod config;
pub mod pins;
pub mod status_led;
pub mod usb_output;
pub mod usb_status;

pub use pins::GpioPins;
pub use status_led::LedIndicator;
pub use usb_output::{configure_usb_hid, GamepadHidWriter, GamepadRequestHandler, UsbReportSink};
pub use usb_status::{UsbHostLink, UsbStatus, UsbStatusHandler};

/// Millisecond clock backed by the embassy time driver.
#[derive(Clone, Copy, Default)]
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    #[inline]
    fn now_ms(&self) -> u32 {
        // Truncation gives the wrapping counter the debounce engine expects.
        embassy_time::Instant::now().as_millis() as u32
    }
}

/// Host link used by the firmware build.
#[cfg(feature = "remote-wakeup")]
pub type FirmwareHost = UsbHostLink;
#[cfg(not(feature = "remote-wakeup"))]
pub type FirmwareHost = ();

/// Status indicator used by the firmware build.
#[cfg(feature = "led-status")]
pub type FirmwareIndicator = LedIndicator<embassy_rp::gpio::Output<'static>>;
#[cfg(not(feature = "led-status"))]
pub type FirmwareIndicator = ();

/// The complete polling driver as wired on the board.
pub type FirmwareDriver = GamepadDriver<
    GpioPins,
    EmbassyClock,
    UsbReportSink<'static>,
    FirmwareHost,
    FirmwareIndicator,
>;
