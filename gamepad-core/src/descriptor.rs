//! HID report descriptor for the two gamepads.
//!
//! Each gamepad is its own Generic Desktop / Gamepad application collection
//! with a report ID, an X/Y pair of signed 8-bit axes and a 32-bit button
//! field. The button usage maximum and the axis logical range are taken from
//! the layout, so the descriptor always agrees with the reports sent.

use crate::layout::AxisScale;
use crate::types::Player;

/// Descriptor bytes for one gamepad collection.
pub const GAMEPAD_DESCRIPTOR_LEN: usize = 41;

/// Descriptor bytes for both gamepads.
pub const REPORT_DESCRIPTOR_LEN: usize = GAMEPAD_DESCRIPTOR_LEN * 2;

/// Build the descriptor for one gamepad collection.
#[must_use]
pub const fn gamepad_descriptor(
    player: Player,
    buttons: u8,
    scale: AxisScale,
) -> [u8; GAMEPAD_DESCRIPTOR_LEN] {
    let max = scale.magnitude() as u8;
    let min = (-scale.magnitude()) as u8;
    [
        0x05, 0x01, // Usage Page (Generic Desktop)
        0x09, 0x05, // Usage (Gamepad)
        0xA1, 0x01, // Collection (Application)
        0x85, player.report_id(), //   Report ID
        //
        // --- X/Y axes ---
        0x05, 0x01, //   Usage Page (Generic Desktop)
        0x09, 0x30, //   Usage (X)
        0x09, 0x31, //   Usage (Y)
        0x15, min, //   Logical Minimum (-scale)
        0x25, max, //   Logical Maximum (scale)
        0x95, 0x02, //   Report Count (2)
        0x75, 0x08, //   Report Size (8)
        0x81, 0x02, //   Input (Data, Variable, Absolute)
        //
        // --- Buttons (32-bit field) ---
        0x05, 0x09, //   Usage Page (Button)
        0x19, 0x01, //   Usage Minimum (Button 1)
        0x29, buttons, //   Usage Maximum (declared buttons)
        0x15, 0x00, //   Logical Minimum (0)
        0x25, 0x01, //   Logical Maximum (1)
        0x95, 0x20, //   Report Count (32)
        0x75, 0x01, //   Report Size (1)
        0x81, 0x02, //   Input (Data, Variable, Absolute)
        //
        0xC0, // End Collection
    ]
}

/// Build the full report descriptor: player A's collection, then player B's.
#[must_use]
pub const fn report_descriptor(buttons: u8, scale: AxisScale) -> [u8; REPORT_DESCRIPTOR_LEN] {
    let a = gamepad_descriptor(Player::A, buttons, scale);
    let b = gamepad_descriptor(Player::B, buttons, scale);

    let mut out = [0u8; REPORT_DESCRIPTOR_LEN];
    let mut i = 0;
    while i < GAMEPAD_DESCRIPTOR_LEN {
        out[i] = a[i];
        out[GAMEPAD_DESCRIPTOR_LEN + i] = b[i];
        i += 1;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const DUAL_9: [u8; REPORT_DESCRIPTOR_LEN] = report_descriptor(9, AxisScale::Full);

    #[test]
    fn test_collections_balanced() {
        let opens = DUAL_9.windows(2).filter(|w| *w == [0xA1u8, 0x01]).count();
        let closes = DUAL_9.iter().filter(|&&b| b == 0xC0).count();
        assert_eq!(opens, 2);
        assert_eq!(closes, 2);
        assert_eq!(DUAL_9[GAMEPAD_DESCRIPTOR_LEN - 1], 0xC0);
        assert_eq!(DUAL_9[REPORT_DESCRIPTOR_LEN - 1], 0xC0);
    }

    #[test]
    fn test_report_ids() {
        assert_eq!(&DUAL_9[6..8], &[0x85, 1]);
        assert_eq!(
            &DUAL_9[GAMEPAD_DESCRIPTOR_LEN + 6..GAMEPAD_DESCRIPTOR_LEN + 8],
            &[0x85, 2]
        );
    }

    #[test]
    fn test_usage_maximum_matches_buttons() {
        assert_eq!(&DUAL_9[28..30], &[0x29, 9]);
        let dual_6 = report_descriptor(6, AxisScale::Unit);
        assert_eq!(&dual_6[28..30], &[0x29, 6]);
        assert_eq!(
            &dual_6[GAMEPAD_DESCRIPTOR_LEN + 28..GAMEPAD_DESCRIPTOR_LEN + 30],
            &[0x29, 6]
        );
    }

    #[test]
    fn test_axis_range_follows_scale() {
        assert_eq!(&DUAL_9[14..18], &[0x15, 0x81, 0x25, 0x7F]);
        let unit = gamepad_descriptor(Player::A, 6, AxisScale::Unit);
        assert_eq!(&unit[14..18], &[0x15, 0xFF, 0x25, 0x01]);
    }

    #[test]
    fn test_input_bits_match_report_size() {
        // 2 x 8-bit axes + 32 x 1-bit buttons = 6 bytes per report.
        let bits = 2 * 8 + 32;
        assert_eq!(bits / 8, crate::PlayerReport::SIZE);
        assert_eq!(&DUAL_9[18..22], &[0x95, 0x02, 0x75, 0x08]);
        assert_eq!(&DUAL_9[34..38], &[0x95, 0x20, 0x75, 0x01]);
    }
}
