//! Core input types: Player, Direction, Role, ChannelSpec.

/// One of the two independently-addressed gamepads.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Player {
    A,
    B,
}

impl Player {
    /// Both players, in send order.
    pub const ALL: [Player; 2] = [Player::A, Player::B];

    /// Index into per-player arrays.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Player::A => 0,
            Player::B => 1,
        }
    }

    /// HID report ID for this player's gamepad collection.
    #[inline]
    #[must_use]
    pub const fn report_id(self) -> u8 {
        match self {
            Player::A => 1,
            Player::B => 2,
        }
    }
}

/// A digital direction contributing to one of the two axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Direction::Up => 0,
            Direction::Down => 1,
            Direction::Left => 2,
            Direction::Right => 3,
        }
    }
}

/// What a channel means to its player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Role {
    /// One of the four directions feeding the X/Y axes.
    Direction(Direction),
    /// A numbered button (1-based label).
    ///
    /// The label is informational; the bit a button occupies in the report
    /// is its position among the player's buttons in declaration order.
    Button(u8),
}

impl Role {
    pub const UP: Self = Self::Direction(Direction::Up);
    pub const DOWN: Self = Self::Direction(Direction::Down);
    pub const LEFT: Self = Self::Direction(Direction::Left);
    pub const RIGHT: Self = Self::Direction(Direction::Right);

    #[inline]
    #[must_use]
    pub const fn is_button(self) -> bool {
        matches!(self, Role::Button(_))
    }
}

/// Static description of one input channel: a pin bound to a role and a player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelSpec {
    /// GPIO number of the electrical input.
    pub pin: u8,
    pub role: Role,
    pub player: Player,
}

impl ChannelSpec {
    #[must_use]
    pub const fn new(pin: u8, role: Role, player: Player) -> Self {
        Self { pin, role, player }
    }

    /// Bit of this channel's pin in a raw GPIO mask.
    ///
    /// Pins at or above 32 yield an empty mask; layout validation rejects them.
    #[inline]
    #[must_use]
    pub const fn pin_bit(&self) -> u32 {
        if self.pin < 32 {
            1 << self.pin
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_ids_distinct() {
        assert_eq!(Player::A.report_id(), 1);
        assert_eq!(Player::B.report_id(), 2);
    }

    #[test]
    fn test_player_order() {
        assert_eq!(Player::ALL[0].index(), 0);
        assert_eq!(Player::ALL[1].index(), 1);
    }

    #[test]
    fn test_pin_bit() {
        assert_eq!(ChannelSpec::new(0, Role::UP, Player::A).pin_bit(), 1);
        assert_eq!(ChannelSpec::new(28, Role::Button(1), Player::B).pin_bit(), 1 << 28);
        assert_eq!(ChannelSpec::new(40, Role::Button(1), Player::B).pin_bit(), 0);
    }

    #[test]
    fn test_role_is_button() {
        assert!(Role::Button(3).is_button());
        assert!(!Role::LEFT.is_button());
    }
}
