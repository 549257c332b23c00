//! Typed event payloads delivered by the status bus.

use crate::types::{ActivityState, PairingStatus};

/// A status change notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IndicatorEvent {
    /// Battery state of charge changed (percent, nominally 0-100).
    Battery(i32),
    /// Active wireless profile or its connection changed.
    Pairing(PairingStatus),
    /// Highest active keymap layer changed.
    Layer(u8),
    /// Device activity changed.
    Activity(ActivityState),
}
