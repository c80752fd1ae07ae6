//! Platform-agnostic core of a two-player GPIO gamepad.
//!
//! This crate turns a bank of active-low digital inputs into two USB HID
//! gamepad reports without any platform-specific dependencies. It can be
//! used both in embedded `no_std` firmware and on host for testing.
//!
//! # Overview
//!
//! The crate is organized into several modules:
//!
//! - [`types`]: Channel description ([`ChannelSpec`], [`Player`], [`Role`])
//! - [`layout`]: Build-time pin layouts and startup validation ([`PadLayout`], [`PadMap`])
//! - [`sampler`]: One-read pin snapshots ([`PinSource`], [`PinSampler`])
//! - [`debounce`]: Time-gated per-channel debounce ([`DebounceEngine`])
//! - [`pad`]: Debounced state of both pads with dirty flags ([`PadState`])
//! - [`report`]: Report building and wire encoding ([`PlayerReport`])
//! - [`descriptor`]: HID report descriptor matching the layout
//! - [`output`]: Report sink trait ([`ReportSink`])
//! - [`host`]: Host suspend/wakeup ([`HostLink`], [`LinkState`]) and status indicator traits
//! - [`driver`]: The polling loop ([`GamepadDriver`])
//!
//! # Pipeline
//!
//! Every cycle the driver samples all pins once, feeds each channel's level
//! to the debounce engine, and for every player with a committed change
//! builds a report and sends it through the sink, player A first.
//!
//! # Example
//!
//! ```rust
//! use dual_gamepad_core::{PadState, Player, ALL_PINS, PICO_DUAL_9};
//!
//! let map = PICO_DUAL_9.validate(ALL_PINS).unwrap();
//! let mut pad = PadState::new(map, 0);
//!
//! // GPIO 5 is player A's "right"; bits are set for pressed pins.
//! let changed = pad.poll(1 << 5, 100);
//! assert!(changed.contains(Player::A));
//! assert_eq!(pad.build(Player::A).x, 127);
//! ```
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Enable defmt formatting and logging (for embedded use)
//!
//! # No-std Support
//!
//! This crate is `#![no_std]` by default and uses no heap allocations,
//! making it suitable for embedded systems with limited resources.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

pub mod debounce;
pub mod descriptor;
pub mod driver;
pub mod host;
pub mod layout;
pub mod output;
pub mod pad;
pub mod report;
pub mod sampler;
pub mod types;

// Re-export main types at crate root
pub use debounce::{ChannelRuntimeState, DebounceEngine};
pub use descriptor::{gamepad_descriptor, report_descriptor, REPORT_DESCRIPTOR_LEN};
pub use driver::{Clock, GamepadDriver};
pub use host::{HostLink, LinkState, StatusIndicator};
pub use layout::{
    AxisScale, LayoutError, PadLayout, PadMap, PlayerMap, ALL_PINS, DEFAULT_DEBOUNCE_MS,
    MAX_BUTTONS, MAX_CHANNELS, PICO_DUAL_6, PICO_DUAL_9,
};
pub use output::{OutputError, ReportSink};
pub use pad::{PadState, PlayerSet};
pub use report::{build_report, PlayerReport};
pub use sampler::{PinSampler, PinSource};
pub use types::{ChannelSpec, Direction, Player, Role};
