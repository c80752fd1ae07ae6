//! Time-gated debounce of individual channels.
//!
//! A channel commits a new level only when the raw level differs from the
//! committed one and more than the debounce window has elapsed since the
//! channel's last commit. The first edge after a quiet period is reported
//! immediately; bounce within the following window is ignored.
//!
//! Timestamps come from a free-running `u32` millisecond counter. Elapsed
//! time is computed with wrapping subtraction, so the window holds across
//! counter overflow.

use heapless::Vec;

use crate::layout::MAX_CHANNELS;

/// Debounced state of one channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelRuntimeState {
    /// Debounced level, `true` when pressed.
    pub committed: bool,
    /// Timestamp of the last commit (or of startup).
    pub last_transition: u32,
}

impl ChannelRuntimeState {
    /// Released, with the window anchored at `now`.
    #[must_use]
    pub const fn released(now: u32) -> Self {
        Self {
            committed: false,
            last_transition: now,
        }
    }
}

/// Per-channel debounce state, indexed by channel declaration order.
#[derive(Clone, Debug)]
pub struct DebounceEngine {
    window: u32,
    states: Vec<ChannelRuntimeState, MAX_CHANNELS>,
}

impl DebounceEngine {
    /// Create an engine for `channels` channels, all released at `now`.
    ///
    /// Channels beyond [`MAX_CHANNELS`] are ignored; a validated layout never
    /// has more.
    #[must_use]
    pub fn new(channels: usize, window: u32, now: u32) -> Self {
        let mut states = Vec::new();
        for _ in 0..channels.min(MAX_CHANNELS) {
            let _ = states.push(ChannelRuntimeState::released(now));
        }
        Self { window, states }
    }

    /// Feed the raw level of `channel` observed at `now`.
    ///
    /// Returns `true` if the committed level changed.
    pub fn update(&mut self, channel: usize, raw: bool, now: u32) -> bool {
        let window = self.window;
        let Some(state) = self.states.get_mut(channel) else {
            return false;
        };

        if now.wrapping_sub(state.last_transition) > window && raw != state.committed {
            state.committed = raw;
            state.last_transition = now;
            true
        } else {
            false
        }
    }

    /// Debounced level of `channel`; unknown channels read as released.
    #[inline]
    #[must_use]
    pub fn is_pressed(&self, channel: usize) -> bool {
        self.states.get(channel).is_some_and(|s| s.committed)
    }

    #[inline]
    #[must_use]
    pub fn state(&self, channel: usize) -> Option<ChannelRuntimeState> {
        self.states.get(channel).copied()
    }

    #[inline]
    #[must_use]
    pub fn window(&self) -> u32 {
        self.window
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}
