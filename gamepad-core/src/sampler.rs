//! Pin sampling: one snapshot of every monitored input per polling cycle.

/// Raw access to a bank of digital inputs.
///
/// Implementations return the electrical level of every line in one read,
/// bit `n` set when line `n` is high.
pub trait PinSource {
    fn read_levels(&mut self) -> u32;
}

/// Turns raw active-low pin levels into a "pressed" mask.
///
/// Inputs are pulled up, so a pressed button reads as 0. [`PinSampler::sample`]
/// inverts the read and keeps only the monitored pins.
pub struct PinSampler<P> {
    source: P,
    mask: u32,
}

impl<P: PinSource> PinSampler<P> {
    /// Create a sampler over `source`, monitoring the pins set in `mask`.
    pub fn new(source: P, mask: u32) -> Self {
        Self { source, mask }
    }

    /// Read all monitored pins at once; bit set means pressed.
    #[inline]
    pub fn sample(&mut self) -> u32 {
        !self.source.read_levels() & self.mask
    }

    #[inline]
    #[must_use]
    pub fn mask(&self) -> u32 {
        self.mask
    }

    pub fn source_mut(&mut self) -> &mut P {
        &mut self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedLevels(u32);

    impl PinSource for FixedLevels {
        fn read_levels(&mut self) -> u32 {
            self.0
        }
    }

    #[test]
    fn test_idle_pins_read_released() {
        let mut sampler = PinSampler::new(FixedLevels(u32::MAX), 0x1C7F_FFFF);
        assert_eq!(sampler.sample(), 0);
    }

    #[test]
    fn test_low_pin_reads_pressed() {
        let mut sampler = PinSampler::new(FixedLevels(!(1 << 5)), 0x1C7F_FFFF);
        assert_eq!(sampler.sample(), 1 << 5);
    }

    #[test]
    fn test_unmonitored_pins_masked() {
        // Pins 23..=25 are low but not monitored.
        let mut sampler = PinSampler::new(FixedLevels(!0x0380_0000), 0x1C7F_FFFF);
        assert_eq!(sampler.sample(), 0);

        sampler.source_mut().0 = 0;
        assert_eq!(sampler.sample(), 0x1C7F_FFFF);
    }
}
