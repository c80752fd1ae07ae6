//! Debounced state of both pads and their dirty flags.

use crate::debounce::DebounceEngine;
use crate::layout::PadMap;
use crate::report::{build_report, PlayerReport};
use crate::types::Player;

/// A set of players, one bit each.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PlayerSet(u8);

impl PlayerSet {
    pub const EMPTY: Self = Self(0);
    pub const BOTH: Self = Self(0b11);

    #[inline]
    const fn bit(player: Player) -> u8 {
        1 << player.index()
    }

    #[inline]
    #[must_use]
    pub const fn contains(self, player: Player) -> bool {
        self.0 & Self::bit(player) != 0
    }

    #[inline]
    pub fn insert(&mut self, player: Player) {
        self.0 |= Self::bit(player);
    }

    #[inline]
    pub fn remove(&mut self, player: Player) {
        self.0 &= !Self::bit(player);
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Players in the set, A before B.
    pub fn iter(self) -> impl Iterator<Item = Player> {
        Player::ALL.into_iter().filter(move |&p| self.contains(p))
    }
}

impl From<Player> for PlayerSet {
    fn from(player: Player) -> Self {
        Self(Self::bit(player))
    }
}

/// Channel debounce state of both pads plus a dirty flag per player.
///
/// A player is dirty from the cycle one of its channels commits a change
/// until [`PadState::clear_dirty`] is called after its report was sent.
#[derive(Clone, Debug)]
pub struct PadState {
    map: PadMap,
    engine: DebounceEngine,
    dirty: PlayerSet,
}

impl PadState {
    /// All channels released, debounce windows anchored at `now`.
    #[must_use]
    pub fn new(map: PadMap, now: u32) -> Self {
        let engine = DebounceEngine::new(map.channels().len(), map.debounce_ms(), now);
        Self {
            map,
            engine,
            dirty: PlayerSet::EMPTY,
        }
    }

    /// Debounce every channel against one sampled `pressed` mask.
    ///
    /// Returns the players with at least one committed change in this cycle;
    /// they are also marked dirty.
    pub fn poll(&mut self, pressed: u32, now: u32) -> PlayerSet {
        let mut changed = PlayerSet::EMPTY;
        for (index, channel) in self.map.channels().iter().enumerate() {
            let raw = pressed & channel.pin_bit() != 0;
            if self.engine.update(index, raw, now) {
                changed.insert(channel.player);
            }
        }
        self.dirty.0 |= changed.0;
        changed
    }

    /// Current report for `player`.
    #[must_use]
    pub fn build(&self, player: Player) -> PlayerReport {
        build_report(self.map.player(player), &self.engine, self.map.axis_scale())
    }

    #[inline]
    #[must_use]
    pub fn dirty(&self) -> PlayerSet {
        self.dirty
    }

    #[inline]
    #[must_use]
    pub fn is_dirty(&self, player: Player) -> bool {
        self.dirty.contains(player)
    }

    #[inline]
    pub fn clear_dirty(&mut self, player: Player) {
        self.dirty.remove(player);
    }

    #[inline]
    #[must_use]
    pub fn map(&self) -> &PadMap {
        &self.map
    }

    #[inline]
    #[must_use]
    pub fn engine(&self) -> &DebounceEngine {
        &self.engine
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{ALL_PINS, PICO_DUAL_6, PICO_DUAL_9};

    // PICO_DUAL_9 pins
    const A_RIGHT: u32 = 1 << 5;
    const A_BUTTON_1: u32 = 1 << 10;
    const A_BUTTON_9: u32 = 1 << 27;
    const B_UP: u32 = 1 << 6;
    const B_BUTTON_7: u32 = 1 << 1;

    fn pad() -> PadState {
        PadState::new(PICO_DUAL_9.validate(ALL_PINS).unwrap(), 0)
    }

    #[test]
    fn test_player_set() {
        let mut set = PlayerSet::EMPTY;
        assert!(set.is_empty());
        set.insert(Player::B);
        assert!(set.contains(Player::B));
        assert!(!set.contains(Player::A));
        set.insert(Player::A);
        assert_eq!(set, PlayerSet::BOTH);
        assert_eq!(set.iter().collect::<heapless::Vec<_, 2>>().as_slice(), &Player::ALL);
        set.remove(Player::A);
        assert_eq!(set, PlayerSet::from(Player::B));
    }

    #[test]
    fn test_poll_marks_owner_dirty() {
        let mut pad = pad();
        assert_eq!(pad.poll(A_RIGHT, 100), PlayerSet::from(Player::A));
        assert!(pad.is_dirty(Player::A));
        assert!(!pad.is_dirty(Player::B));
        assert_eq!(pad.build(Player::A).x, 127);
    }

    #[test]
    fn test_same_cycle_changes_fold_into_one_report() {
        let mut pad = pad();
        pad.poll(A_RIGHT | A_BUTTON_1 | A_BUTTON_9, 100);
        let report = pad.build(Player::A);
        assert_eq!(report.x, 127);
        assert_eq!(report.buttons, 0b1_0000_0001);
    }

    #[test]
    fn test_both_players_dirty_in_one_cycle() {
        let mut pad = pad();
        assert_eq!(pad.poll(A_BUTTON_1 | B_UP, 100), PlayerSet::BOTH);
        assert_eq!(pad.dirty(), PlayerSet::BOTH);
        assert_eq!(pad.build(Player::B).y, -127);
    }

    #[test]
    fn test_dirty_persists_until_cleared() {
        let mut pad = pad();
        pad.poll(B_BUTTON_7, 100);
        // Nothing new commits, flag stays.
        assert!(pad.poll(B_BUTTON_7, 101).is_empty());
        assert!(pad.is_dirty(Player::B));
        pad.clear_dirty(Player::B);
        assert!(pad.dirty().is_empty());
        assert_eq!(pad.build(Player::B).buttons, 1 << 6);
    }

    #[test]
    fn test_bounce_inside_window_leaves_pad_clean() {
        let mut pad = pad();
        pad.poll(A_BUTTON_1, 100);
        pad.clear_dirty(Player::A);

        assert!(pad.poll(0, 102).is_empty());
        assert!(pad.poll(A_BUTTON_1, 104).is_empty());
        assert!(pad.poll(0, 106).is_empty());
        assert!(pad.dirty().is_empty());
        assert_eq!(pad.build(Player::A).buttons, 1);
    }

    #[test]
    fn test_unmonitored_bits_ignored() {
        let mut pad = PadState::new(PICO_DUAL_6.validate(ALL_PINS).unwrap(), 0);
        // Pins 0, 1 and 22 are not part of the six-button layout.
        assert!(pad.poll(0b11 | 1 << 22, 100).is_empty());
    }
}
