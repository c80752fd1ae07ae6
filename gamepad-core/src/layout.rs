//! Build-time pin layouts and their startup validation.
//!
//! A [`PadLayout`] is a `const` table describing which GPIO feeds which
//! role of which player, together with the axis scale and debounce window.
//! It is checked once at startup by [`PadLayout::validate`], which either
//! rejects it with a [`LayoutError`] or returns a [`PadMap`] with the
//! per-player channel indices precomputed for the debounce engine and the
//! report builder.
//!
//! Two layouts are provided, matching the two wiring variants of the
//! Raspberry Pi Pico dual-gamepad board:
//!
//! | Layout          | Buttons/player | Channels | Axis scale |
//! |-----------------|----------------|----------|------------|
//! | [`PICO_DUAL_9`] | 9              | 26       | ±127       |
//! | [`PICO_DUAL_6`] | 6              | 20       | ±1         |

use core::fmt;

use heapless::Vec;

use crate::types::{ChannelSpec, Direction, Player, Role};

/// Maximum number of channels: one per line of a 32-bit GPIO bank.
pub const MAX_CHANNELS: usize = 32;

/// Maximum number of buttons per player: width of the report's button mask.
pub const MAX_BUTTONS: usize = 32;

/// Default debounce window in milliseconds.
pub const DEFAULT_DEBOUNCE_MS: u32 = 8;

/// Every line of a 32-bit bank, for platforms without reserved pins.
pub const ALL_PINS: u32 = u32::MAX;

/// Axis convention used when turning two opposing directions into one axis value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AxisScale {
    /// `positive - negative`, range -1..=1.
    Unit,
    /// `negative * -127 + positive * 127`, range -127..=127.
    Full,
}

impl AxisScale {
    /// Magnitude of a fully deflected axis.
    #[inline]
    #[must_use]
    pub const fn magnitude(self) -> i8 {
        match self {
            AxisScale::Unit => 1,
            AxisScale::Full => 127,
        }
    }

    /// Axis value for the given committed levels of the two opposing directions.
    #[inline]
    #[must_use]
    pub const fn axis(self, negative: bool, positive: bool) -> i8 {
        match self {
            AxisScale::Unit => positive as i8 - negative as i8,
            AxisScale::Full => negative as i8 * -127 + positive as i8 * 127,
        }
    }
}

/// Startup validation failure of a [`PadLayout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LayoutError {
    /// More channels than [`MAX_CHANNELS`].
    TooManyChannels(usize),
    /// Declared buttons per player exceed the [`MAX_BUTTONS`]-bit mask.
    ButtonMaskOverflow(u8),
    /// Pin number does not fit a 32-bit GPIO mask.
    PinOutOfRange(u8),
    /// Pin is not usable on this platform.
    PinUnavailable(u8),
    /// Pin bound to more than one channel.
    DuplicatePin(u8),
    MissingDirection(Player, Direction),
    DuplicateDirection(Player, Direction),
    /// Button label is 0 or above the declared button count.
    ButtonLabelOutOfRange(Player, u8),
    DuplicateButtonLabel(Player, u8),
    /// Number of button channels differs from the declared button count.
    ButtonCountMismatch {
        player: Player,
        declared: u8,
        actual: usize,
    },
    ZeroDebounceWindow,
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooManyChannels(n) => {
                write!(f, "{n} channels exceed the maximum of {MAX_CHANNELS}")
            }
            Self::ButtonMaskOverflow(n) => {
                write!(f, "{n} buttons per player exceed the {MAX_BUTTONS}-bit mask")
            }
            Self::PinOutOfRange(pin) => write!(f, "pin {pin} is out of range"),
            Self::PinUnavailable(pin) => write!(f, "pin {pin} is not available"),
            Self::DuplicatePin(pin) => write!(f, "pin {pin} is used more than once"),
            Self::MissingDirection(player, dir) => {
                write!(f, "player {player:?} has no {dir:?} channel")
            }
            Self::DuplicateDirection(player, dir) => {
                write!(f, "player {player:?} has more than one {dir:?} channel")
            }
            Self::ButtonLabelOutOfRange(player, label) => {
                write!(f, "player {player:?} button label {label} is out of range")
            }
            Self::DuplicateButtonLabel(player, label) => {
                write!(f, "player {player:?} button label {label} is used more than once")
            }
            Self::ButtonCountMismatch {
                player,
                declared,
                actual,
            } => write!(
                f,
                "player {player:?} declares {declared} buttons but has {actual}"
            ),
            Self::ZeroDebounceWindow => write!(f, "debounce window must be non-zero"),
        }
    }
}

/// Build-time description of the pads: channels plus timing and axis settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PadLayout<'a> {
    /// Human readable name, for logs.
    pub name: &'a str,
    /// Channels in declaration order.
    pub channels: &'a [ChannelSpec],
    /// Buttons each player declares in its HID collection.
    pub buttons_per_player: u8,
    pub axis_scale: AxisScale,
    /// Quiet period in milliseconds after a commit before the next one.
    pub debounce_ms: u32,
}

impl<'a> PadLayout<'a> {
    /// Same layout with a different axis convention.
    #[must_use]
    pub const fn with_axis_scale(mut self, axis_scale: AxisScale) -> Self {
        self.axis_scale = axis_scale;
        self
    }

    /// Same layout with a different debounce window.
    #[must_use]
    pub const fn with_debounce_ms(mut self, debounce_ms: u32) -> Self {
        self.debounce_ms = debounce_ms;
        self
    }

    /// Check the layout against the platform's usable pins.
    ///
    /// Every player must have exactly one channel per direction and exactly
    /// `buttons_per_player` buttons labelled `1..=buttons_per_player`, and
    /// no pin may be used twice.
    pub fn validate(&self, available_pins: u32) -> Result<PadMap, LayoutError> {
        if self.debounce_ms == 0 {
            return Err(LayoutError::ZeroDebounceWindow);
        }
        if self.channels.len() > MAX_CHANNELS {
            return Err(LayoutError::TooManyChannels(self.channels.len()));
        }
        if usize::from(self.buttons_per_player) > MAX_BUTTONS {
            return Err(LayoutError::ButtonMaskOverflow(self.buttons_per_player));
        }

        let mut pin_mask = 0u32;
        let mut directions = [[None::<u8>; 4]; 2];
        let mut buttons: [Vec<u8, MAX_BUTTONS>; 2] = [Vec::new(), Vec::new()];
        let mut labels_seen = [0u32; 2];
        let mut channels = Vec::new();

        for (index, channel) in self.channels.iter().enumerate() {
            if channel.pin >= 32 {
                return Err(LayoutError::PinOutOfRange(channel.pin));
            }
            let bit = channel.pin_bit();
            if available_pins & bit == 0 {
                return Err(LayoutError::PinUnavailable(channel.pin));
            }
            if pin_mask & bit != 0 {
                return Err(LayoutError::DuplicatePin(channel.pin));
            }
            pin_mask |= bit;

            let player = channel.player;
            let slot = player.index();
            // index < MAX_CHANNELS, fits u8
            let index = index as u8;

            match channel.role {
                Role::Direction(dir) => {
                    let entry = &mut directions[slot][dir.index()];
                    if entry.is_some() {
                        return Err(LayoutError::DuplicateDirection(player, dir));
                    }
                    *entry = Some(index);
                }
                Role::Button(label) => {
                    if label == 0 || label > self.buttons_per_player {
                        return Err(LayoutError::ButtonLabelOutOfRange(player, label));
                    }
                    let label_bit = 1u32 << (label - 1);
                    if labels_seen[slot] & label_bit != 0 {
                        return Err(LayoutError::DuplicateButtonLabel(player, label));
                    }
                    labels_seen[slot] |= label_bit;
                    // Unique labels within 1..=buttons_per_player cannot overflow.
                    let _ = buttons[slot].push(index);
                }
            }
            let _ = channels.push(*channel);
        }

        let mut players = [PlayerMap::EMPTY, PlayerMap::EMPTY];
        for player in Player::ALL {
            let slot = player.index();
            for dir in Direction::ALL {
                players[slot].directions[dir.index()] = directions[slot][dir.index()]
                    .ok_or(LayoutError::MissingDirection(player, dir))?;
            }
            if buttons[slot].len() != usize::from(self.buttons_per_player) {
                return Err(LayoutError::ButtonCountMismatch {
                    player,
                    declared: self.buttons_per_player,
                    actual: buttons[slot].len(),
                });
            }
            players[slot].buttons = buttons[slot].clone();
        }

        Ok(PadMap {
            channels,
            players,
            pin_mask,
            axis_scale: self.axis_scale,
            debounce_ms: self.debounce_ms,
            buttons_per_player: self.buttons_per_player,
        })
    }
}

/// Channel indices belonging to one player.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayerMap {
    /// Channel index per [`Direction::index`].
    directions: [u8; 4],
    /// Button channel indices; position in this list is the report bit.
    buttons: Vec<u8, MAX_BUTTONS>,
}

impl PlayerMap {
    const EMPTY: Self = Self {
        directions: [0; 4],
        buttons: Vec::new(),
    };

    /// Channel index of the given direction.
    #[inline]
    #[must_use]
    pub fn direction(&self, dir: Direction) -> usize {
        usize::from(self.directions[dir.index()])
    }

    /// Channel indices of the buttons, in report bit order.
    pub fn buttons(&self) -> impl Iterator<Item = usize> + '_ {
        self.buttons.iter().map(|&index| usize::from(index))
    }

    #[inline]
    #[must_use]
    pub fn button_count(&self) -> usize {
        self.buttons.len()
    }
}

/// A validated layout, ready to drive the debounce engine and report builder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PadMap {
    channels: Vec<ChannelSpec, MAX_CHANNELS>,
    players: [PlayerMap; 2],
    pin_mask: u32,
    axis_scale: AxisScale,
    debounce_ms: u32,
    buttons_per_player: u8,
}

impl PadMap {
    /// Channels in declaration order.
    #[inline]
    #[must_use]
    pub fn channels(&self) -> &[ChannelSpec] {
        &self.channels
    }

    #[inline]
    #[must_use]
    pub fn player(&self, player: Player) -> &PlayerMap {
        &self.players[player.index()]
    }

    /// Union of every monitored pin's bit.
    #[inline]
    #[must_use]
    pub fn pin_mask(&self) -> u32 {
        self.pin_mask
    }

    #[inline]
    #[must_use]
    pub fn axis_scale(&self) -> AxisScale {
        self.axis_scale
    }

    #[inline]
    #[must_use]
    pub fn debounce_ms(&self) -> u32 {
        self.debounce_ms
    }

    #[inline]
    #[must_use]
    pub fn buttons_per_player(&self) -> u8 {
        self.buttons_per_player
    }
}

const fn a(pin: u8, role: Role) -> ChannelSpec {
    ChannelSpec::new(pin, role, Player::A)
}

const fn b(pin: u8, role: Role) -> ChannelSpec {
    ChannelSpec::new(pin, role, Player::B)
}

const PICO_DUAL_9_CHANNELS: [ChannelSpec; 26] = [
    // Gamepad A
    a(2, Role::UP),
    a(3, Role::DOWN),
    a(4, Role::LEFT),
    a(5, Role::RIGHT),
    a(10, Role::Button(1)),
    a(11, Role::Button(2)),
    a(12, Role::Button(3)),
    a(13, Role::Button(4)),
    a(14, Role::Button(5)),
    a(15, Role::Button(6)),
    a(0, Role::Button(7)),
    a(28, Role::Button(8)),
    a(27, Role::Button(9)),
    // Gamepad B
    b(6, Role::UP),
    b(7, Role::DOWN),
    b(8, Role::LEFT),
    b(9, Role::RIGHT),
    b(21, Role::Button(1)),
    b(20, Role::Button(2)),
    b(19, Role::Button(3)),
    b(18, Role::Button(4)),
    b(17, Role::Button(5)),
    b(16, Role::Button(6)),
    b(1, Role::Button(7)),
    b(26, Role::Button(8)),
    b(22, Role::Button(9)),
];

const PICO_DUAL_6_CHANNELS: [ChannelSpec; 20] = [
    // Gamepad A
    a(2, Role::UP),
    a(3, Role::DOWN),
    a(4, Role::LEFT),
    a(5, Role::RIGHT),
    a(10, Role::Button(1)),
    a(11, Role::Button(2)),
    a(12, Role::Button(3)),
    a(13, Role::Button(4)),
    a(14, Role::Button(5)),
    a(15, Role::Button(6)),
    // Gamepad B
    b(6, Role::UP),
    b(7, Role::DOWN),
    b(8, Role::LEFT),
    b(9, Role::RIGHT),
    b(21, Role::Button(1)),
    b(20, Role::Button(2)),
    b(19, Role::Button(3)),
    b(18, Role::Button(4)),
    b(17, Role::Button(5)),
    b(16, Role::Button(6)),
];

/// Four directions and nine buttons per player, full-scale axes.
pub const PICO_DUAL_9: PadLayout<'static> = PadLayout {
    name: "pico-dual-9",
    channels: &PICO_DUAL_9_CHANNELS,
    buttons_per_player: 9,
    axis_scale: AxisScale::Full,
    debounce_ms: DEFAULT_DEBOUNCE_MS,
};

/// Four directions and six buttons per player, unit axes.
pub const PICO_DUAL_6: PadLayout<'static> = PadLayout {
    name: "pico-dual-6",
    channels: &PICO_DUAL_6_CHANNELS,
    buttons_per_player: 6,
    axis_scale: AxisScale::Unit,
    debounce_ms: DEFAULT_DEBOUNCE_MS,
};
