//! GPIO pin source reading the whole input bank in one register access.
//!
//! Every monitored pin is configured as an input with the internal pull-up
//! enabled, so an open switch reads high and a pressed one shorts the pin
//! to ground.

use dual_gamepad_core::{PadMap, PinSource, MAX_CHANNELS};
use embassy_rp::gpio::{AnyPin, Input, Pull};
use embassy_rp::pac;
use heapless::Vec;

/// All monitored pins, sampled together through SIO `GPIO_IN`.
pub struct GpioPins {
    // Held so the pins stay configured as pulled-up inputs.
    _inputs: Vec<Input<'static>, MAX_CHANNELS>,
}

impl GpioPins {
    /// Configure every pin used by `map` as a pulled-up input.
    ///
    /// # Safety
    ///
    /// The pins named by `map` must not be owned by anything else. A
    /// [`PadMap`] validated against [`PICO_USABLE_PINS`](crate::config::PICO_USABLE_PINS)
    /// never names the LED or the board's sense pins.
    pub unsafe fn new(map: &PadMap) -> Self {
        let mut inputs = Vec::new();
        for channel in map.channels() {
            // SAFETY: the caller guarantees exclusive use of the layout's pins,
            // and a validated map holds each pin once.
            let pin = unsafe { AnyPin::steal(channel.pin) };
            // A validated map never exceeds MAX_CHANNELS.
            let _ = inputs.push(Input::new(pin, Pull::Up));
        }
        defmt::debug!("Configured {} input pins", inputs.len());
        Self { _inputs: inputs }
    }
}

impl PinSource for GpioPins {
    #[inline]
    fn read_levels(&mut self) -> u32 {
        pac::SIO.gpio_in(0).read()
    }
}
