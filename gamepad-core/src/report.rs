//! Per-player HID input reports.
//!
//! A report carries two signed 8-bit axes and a 32-bit button mask, packed
//! without padding:
//!
//! ```text
//! byte 0      1      2..6
//!      x:i8   y:i8   buttons:u32 (little-endian)
//! ```
//!
//! On the wire each report is prefixed by the player's report ID.

use crate::debounce::DebounceEngine;
use crate::layout::{AxisScale, PlayerMap};
use crate::types::{Direction, Player};

/// Input report for one gamepad.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PlayerReport {
    /// Left is negative, right is positive.
    pub x: i8,
    /// Up is negative, down is positive.
    pub y: i8,
    /// Bit `k` is the player's `k`-th button in declaration order.
    pub buttons: u32,
}

impl PlayerReport {
    /// Size of the report payload in bytes.
    pub const SIZE: usize = 6;

    /// Size of the report on the interrupt endpoint, including the report ID.
    pub const INPUT_REPORT_SIZE: usize = Self::SIZE + 1;

    /// Centered axes, nothing pressed.
    #[must_use]
    pub const fn neutral() -> Self {
        Self {
            x: 0,
            y: 0,
            buttons: 0,
        }
    }

    /// Packed payload bytes.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let buttons = self.buttons.to_le_bytes();
        [
            self.x as u8,
            self.y as u8,
            buttons[0],
            buttons[1],
            buttons[2],
            buttons[3],
        ]
    }

    /// Payload prefixed with `player`'s report ID.
    #[must_use]
    pub fn to_input_report(&self, player: Player) -> [u8; Self::INPUT_REPORT_SIZE] {
        let mut out = [0u8; Self::INPUT_REPORT_SIZE];
        out[0] = player.report_id();
        out[1..].copy_from_slice(&self.to_bytes());
        out
    }

    /// Check if the given button (report bit) is pressed.
    #[inline]
    #[must_use]
    pub const fn is_pressed(&self, bit: u8) -> bool {
        bit < 32 && self.buttons & (1 << bit) != 0
    }
}

/// Build a player's report from the debounced channel levels.
///
/// Pure function of the engine's committed state.
#[must_use]
pub fn build_report(map: &PlayerMap, engine: &DebounceEngine, scale: AxisScale) -> PlayerReport {
    let pressed = |dir: Direction| engine.is_pressed(map.direction(dir));

    let x = scale.axis(pressed(Direction::Left), pressed(Direction::Right));
    let y = scale.axis(pressed(Direction::Up), pressed(Direction::Down));

    let buttons = map
        .buttons()
        .enumerate()
        .filter(|&(_, channel)| engine.is_pressed(channel))
        .fold(0u32, |mask, (bit, _)| mask | (1 << bit));

    PlayerReport { x, y, buttons }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{ALL_PINS, PICO_DUAL_6, PICO_DUAL_9};
    use crate::types::{ChannelSpec, Role};
    use crate::PadLayout;

    /// Engine with the given channels already committed as pressed.
    fn pressed_engine(channels: usize, pressed: &[usize]) -> DebounceEngine {
        let mut engine = DebounceEngine::new(channels, 8, 0);
        for &ch in pressed {
            assert!(engine.update(ch, true, 100));
        }
        engine
    }

    #[test]
    fn test_neutral_when_nothing_pressed() {
        let map = PICO_DUAL_9.validate(ALL_PINS).unwrap();
        let engine = pressed_engine(26, &[]);
        for player in Player::ALL {
            let report = build_report(map.player(player), &engine, map.axis_scale());
            assert_eq!(report, PlayerReport::neutral());
        }
    }

    #[test]
    fn test_right_only_full_scale() {
        let map = PICO_DUAL_9.validate(ALL_PINS).unwrap();
        let right = map.player(Player::A).direction(Direction::Right);
        let engine = pressed_engine(26, &[right]);
        let report = build_report(map.player(Player::A), &engine, map.axis_scale());
        assert_eq!(report.x, 127);
        assert_eq!(report.y, 0);
        assert_eq!(report.buttons, 0);
    }

    #[test]
    fn test_right_only_unit_scale() {
        let map = PICO_DUAL_6.validate(ALL_PINS).unwrap();
        let right = map.player(Player::B).direction(Direction::Right);
        let engine = pressed_engine(20, &[right]);
        let report = build_report(map.player(Player::B), &engine, map.axis_scale());
        assert_eq!((report.x, report.y), (1, 0));
    }

    #[test]
    fn test_opposing_directions_cancel() {
        for layout in [PICO_DUAL_9, PICO_DUAL_6] {
            let map = layout.validate(ALL_PINS).unwrap();
            let pm = map.player(Player::A);
            let engine = pressed_engine(
                map.channels().len(),
                &[
                    pm.direction(Direction::Left),
                    pm.direction(Direction::Right),
                    pm.direction(Direction::Up),
                    pm.direction(Direction::Down),
                ],
            );
            let report = build_report(pm, &engine, map.axis_scale());
            assert_eq!((report.x, report.y), (0, 0));
        }
    }

    #[test]
    fn test_axis_magnitudes() {
        for scale in [AxisScale::Unit, AxisScale::Full] {
            let map = PICO_DUAL_9.with_axis_scale(scale).validate(ALL_PINS).unwrap();
            let pm = map.player(Player::B);
            let engine = pressed_engine(
                26,
                &[pm.direction(Direction::Left), pm.direction(Direction::Up)],
            );
            let report = build_report(pm, &engine, scale);
            assert_eq!(report.x, -scale.magnitude());
            assert_eq!(report.y, -scale.magnitude());
        }
    }

    #[test]
    fn test_single_button_sets_single_bit() {
        let map = PICO_DUAL_9.validate(ALL_PINS).unwrap();
        let pm = map.player(Player::B);
        for (bit, channel) in pm.buttons().enumerate() {
            let engine = pressed_engine(26, &[channel]);
            let report = build_report(pm, &engine, map.axis_scale());
            assert_eq!(report.buttons, 1 << bit);
            assert_eq!((report.x, report.y), (0, 0));
        }
    }

    #[test]
    fn test_other_player_channels_ignored() {
        let map = PICO_DUAL_9.validate(ALL_PINS).unwrap();
        let pressed: [usize; 13] = core::array::from_fn(|i| i);
        let engine = pressed_engine(26, &pressed);
        let b = build_report(map.player(Player::B), &engine, map.axis_scale());
        assert_eq!(b, PlayerReport::neutral());
        let a = build_report(map.player(Player::A), &engine, map.axis_scale());
        assert_eq!(a.buttons, 0x1FF);
    }

    #[test]
    fn test_button_bits_follow_declaration_order() {
        const PIN_10: ChannelSpec = ChannelSpec::new(10, Role::Button(1), Player::A);
        const PIN_11: ChannelSpec = ChannelSpec::new(11, Role::Button(2), Player::A);

        let mut channels = [
            ChannelSpec::new(0, Role::UP, Player::A),
            ChannelSpec::new(1, Role::DOWN, Player::A),
            ChannelSpec::new(2, Role::LEFT, Player::A),
            ChannelSpec::new(3, Role::RIGHT, Player::A),
            PIN_10,
            PIN_11,
            ChannelSpec::new(4, Role::UP, Player::B),
            ChannelSpec::new(5, Role::DOWN, Player::B),
            ChannelSpec::new(6, Role::LEFT, Player::B),
            ChannelSpec::new(7, Role::RIGHT, Player::B),
            ChannelSpec::new(12, Role::Button(1), Player::B),
            ChannelSpec::new(13, Role::Button(2), Player::B),
        ];

        // Press the pin 10 button and report player A.
        let report_for = |channels: &[ChannelSpec]| {
            let map = PadLayout {
                name: "order",
                channels,
                buttons_per_player: 2,
                axis_scale: AxisScale::Unit,
                debounce_ms: 8,
            }
            .validate(ALL_PINS)
            .unwrap();
            let index = channels.iter().position(|c| c.pin == 10).unwrap();
            let engine = pressed_engine(channels.len(), &[index]);
            build_report(map.player(Player::A), &engine, map.axis_scale())
        };

        assert_eq!(report_for(&channels).buttons, 0b01);

        channels.swap(4, 5);
        assert_eq!(report_for(&channels).buttons, 0b10);
    }

    #[test]
    fn test_build_is_idempotent() {
        let map = PICO_DUAL_9.validate(ALL_PINS).unwrap();
        let engine = pressed_engine(26, &[3, 4, 12, 16, 20]);
        for player in Player::ALL {
            let first = build_report(map.player(player), &engine, map.axis_scale());
            let second = build_report(map.player(player), &engine, map.axis_scale());
            assert_eq!(first.to_bytes(), second.to_bytes());
        }
    }

    #[test]
    fn test_to_bytes_layout() {
        let report = PlayerReport {
            x: -127,
            y: 1,
            buttons: 0x0000_0105,
        };
        assert_eq!(report.to_bytes(), [0x81, 0x01, 0x05, 0x01, 0x00, 0x00]);
    }

    #[test]
    fn test_input_report_prefixed_with_id() {
        let report = PlayerReport {
            x: 127,
            y: 0,
            buttons: 1 << 8,
        };
        assert_eq!(
            report.to_input_report(Player::A),
            [1, 0x7F, 0x00, 0x00, 0x01, 0x00, 0x00]
        );
        assert_eq!(report.to_input_report(Player::B)[0], 2);
    }

    #[test]
    fn test_is_pressed() {
        let report = PlayerReport {
            buttons: 1 << 4,
            ..PlayerReport::neutral()
        };
        assert!(report.is_pressed(4));
        assert!(!report.is_pressed(3));
        assert!(!report.is_pressed(40));
    }
}
