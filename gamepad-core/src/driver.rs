//! GamepadDriver: the polling loop tying sampler, debounce and sink together.

use embassy_futures::yield_now;

use crate::host::{HostLink, StatusIndicator};
use crate::layout::PadMap;
use crate::output::{OutputError, ReportSink};
use crate::pad::{PadState, PlayerSet};
use crate::sampler::{PinSampler, PinSource};

/// Free-running millisecond counter.
///
/// Only differences between readings are used, with wrapping arithmetic, so
/// the counter may start anywhere and overflow freely.
pub trait Clock {
    fn now_ms(&self) -> u32;
}

/// Polls the pins, debounces them and sends changed players' reports.
///
/// Each cycle works from a single pin snapshot. A player's report is sent
/// at most once per cycle and only if one of its channels committed a
/// change since its last successful send. Player A is sent before player B.
///
/// # Error Handling
///
/// A failed send leaves the player dirty so its report is sent again on a
/// later cycle; the cycle stops at the first failure.
pub struct GamepadDriver<P, C, S, H = (), L = ()> {
    sampler: PinSampler<P>,
    clock: C,
    pad: PadState,
    sink: S,
    host: H,
    indicator: L,
}

impl<P: PinSource, C: Clock, S: ReportSink> GamepadDriver<P, C, S> {
    /// Create a driver for a validated layout, all inputs released as of now.
    pub fn new(source: P, clock: C, map: PadMap, sink: S) -> Self {
        let sampler = PinSampler::new(source, map.pin_mask());
        let pad = PadState::new(map, clock.now_ms());
        Self {
            sampler,
            clock,
            pad,
            sink,
            host: (),
            indicator: (),
        }
    }
}

impl<P, C, S, H, L> GamepadDriver<P, C, S, H, L>
where
    P: PinSource,
    C: Clock,
    S: ReportSink,
    H: HostLink,
    L: StatusIndicator,
{
    /// Wake the host on input while it is suspended.
    pub fn with_host<H2: HostLink>(self, host: H2) -> GamepadDriver<P, C, S, H2, L> {
        GamepadDriver {
            sampler: self.sampler,
            clock: self.clock,
            pad: self.pad,
            sink: self.sink,
            host,
            indicator: self.indicator,
        }
    }

    /// Show input activity on `indicator`.
    pub fn with_indicator<L2: StatusIndicator>(
        self,
        indicator: L2,
    ) -> GamepadDriver<P, C, S, H, L2> {
        GamepadDriver {
            sampler: self.sampler,
            clock: self.clock,
            pad: self.pad,
            sink: self.sink,
            host: self.host,
            indicator,
        }
    }

    /// Run the polling loop indefinitely.
    ///
    /// Yields to the executor between cycles so the USB stack keeps running.
    pub async fn run(&mut self) -> ! {
        loop {
            let _ = self.poll_once().await;
            yield_now().await;
        }
    }

    /// Run one polling cycle.
    ///
    /// Returns the players whose reports were sent.
    pub async fn poll_once(&mut self) -> Result<PlayerSet, OutputError> {
        let pressed = self.sampler.sample();
        let now = self.clock.now_ms();

        self.indicator.set_active(pressed != 0);

        if pressed != 0 && self.host.is_suspended() {
            #[cfg(feature = "defmt")]
            defmt::info!("Input while host suspended, requesting wakeup");
            self.host.request_wake();
            self.host.wait_resume().await;
            // Sample afresh once the host is back.
            return Ok(PlayerSet::EMPTY);
        }

        self.pad.poll(pressed, now);

        let mut sent = PlayerSet::EMPTY;
        for player in self.pad.dirty().iter() {
            let report = self.pad.build(player);
            self.sink.wait_ready().await;
            if let Err(e) = self.sink.send(player, &report).await {
                #[cfg(feature = "defmt")]
                defmt::warn!("Report for player {} not sent: {}", player, e);
                return Err(e);
            }
            #[cfg(feature = "defmt")]
            defmt::trace!("Player {} report: {}", player, report);
            self.pad.clear_dirty(player);
            sent.insert(player);
        }
        Ok(sent)
    }

    /// Get a reference to the debounced pad state.
    pub fn pad(&self) -> &PadState {
        &self.pad
    }

    /// Get a mutable reference to the pin source.
    pub fn source_mut(&mut self) -> &mut P {
        self.sampler.source_mut()
    }

    /// Get a mutable reference to the clock.
    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    /// Get a reference to the report sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Get a mutable reference to the report sink.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Get a reference to the host link.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Get a reference to the status indicator.
    pub fn indicator(&self) -> &L {
        &self.indicator
    }
}
