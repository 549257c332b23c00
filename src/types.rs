//! Core types shared by the rendering pipeline and the status handlers.

/// Animation mode of the indicator strip.
///
/// Exactly one mode is active at any time. `Off` means no tick is scheduled
/// and no frame is emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AnimationMode {
    /// Strip dark, timer stopped.
    #[default]
    Off,

    /// Slot colors rendered unscaled every tick.
    Solid,

    /// Slow cosine pulse applied to all slots.
    Breathe,

    /// Square wave; the external rail is gated in sync with the off phase.
    Blink,
}

impl AnimationMode {
    /// Returns true for every mode except `Off`.
    #[inline]
    pub fn is_running(self) -> bool {
        self != AnimationMode::Off
    }
}

/// One of the three indicator roles on the strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Slot {
    /// Battery charge.
    Power,

    /// Wireless pairing / connection state.
    Connectivity,

    /// Highest active keymap layer.
    Layer,
}

impl Slot {
    /// Number of slots.
    pub const COUNT: usize = 3;

    /// All slots in storage order.
    pub const ALL: [Slot; Slot::COUNT] = [Slot::Power, Slot::Connectivity, Slot::Layer];

    /// Storage index of this slot (not its pixel position).
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Slot::Power => 0,
            Slot::Connectivity => 1,
            Slot::Layer => 2,
        }
    }
}

/// Pairing state of the active wireless profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PairingStatus {
    /// Profile bonded but the host is not connected.
    Disconnected,

    /// Profile open and advertising for a new host.
    Advertising,

    /// Connected to the host bonded on `profile`.
    Connected { profile: u8 },
}

/// Coarse device activity state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActivityState {
    /// Keys are being pressed.
    Active,

    /// Idle timeout elapsed.
    Idle,

    /// Deep sleep pending. Ignored by the indicators.
    Sleep,
}

/// Result of a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TickOutcome {
    /// Mode was `Off`; nothing rendered.
    Skipped,

    /// Frame written to the strip.
    Rendered,

    /// Frame computed but the strip rejected it. The next tick retries.
    WriteFailed,
}

/// Errors raised by the indicator engine.
///
/// Only `DeviceNotReady` is returned to callers, from
/// [`IndicatorEngine::toggle`](crate::IndicatorEngine::toggle). The other
/// variants are logged only, never returned: the engine carries on and the
/// next tick or event retries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IndicatorError {
    /// The strip, or the power rail when gating is enabled, is not ready.
    DeviceNotReady,

    /// The strip rejected a frame. Logged only, never returned.
    WriteFailed,

    /// The power rail rejected an enable or disable request. Logged only,
    /// never returned.
    PowerFailed,

    /// An event payload was outside its documented domain and was clamped.
    /// Logged only, never returned.
    InvalidInput,
}

impl core::fmt::Display for IndicatorError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            IndicatorError::DeviceNotReady => write!(f, "indicator device not ready"),
            IndicatorError::WriteFailed => write!(f, "failed to update the led strip"),
            IndicatorError::PowerFailed => write!(f, "failed to switch external power"),
            IndicatorError::InvalidInput => write!(f, "event payload out of range"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for IndicatorError {}

/// Configuration validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// A slot is mapped past the end of the strip.
    SlotOutOfRange {
        slot: Slot,
        index: usize,
        pixel_count: usize,
    },

    /// Two slots share one pixel.
    DuplicateSlotIndex { index: usize },

    /// A tick period, breathe period or blink period is zero.
    ZeroPeriod,

    /// The active mode must render something.
    ActiveModeOff,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::SlotOutOfRange {
                slot,
                index,
                pixel_count,
            } => {
                write!(
                    f,
                    "{:?} slot index {} out of strip length {}",
                    slot, index, pixel_count
                )
            }
            ConfigError::DuplicateSlotIndex { index } => {
                write!(f, "pixel {} is mapped to more than one slot", index)
            }
            ConfigError::ZeroPeriod => write!(f, "periods must be non-zero"),
            ConfigError::ActiveModeOff => write!(f, "active mode cannot be Off"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}
