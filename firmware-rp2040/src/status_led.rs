//! Input activity LED.

use dual_gamepad_core::StatusIndicator;
use embedded_hal::digital::OutputPin;

/// Lights an LED while any monitored input is held.
pub struct LedIndicator<P> {
    pin: P,
    lit: bool,
}

impl<P: OutputPin> LedIndicator<P> {
    /// Wrap `pin`, starting with the LED off.
    pub fn new(mut pin: P) -> Self {
        let _ = pin.set_low();
        Self { pin, lit: false }
    }
}

impl<P: OutputPin> StatusIndicator for LedIndicator<P> {
    fn set_active(&mut self, active: bool) {
        if active == self.lit {
            return;
        }
        // GPIO writes on the RP2040 cannot fail.
        let _ = self.pin.set_state(active.into());
        self.lit = active;
    }
}
