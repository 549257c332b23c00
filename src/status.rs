//! Status handlers.
//!
//! Pure mappings from device status to slot colors, plus the palette they
//! draw from and the [`StatusSource`] used to resynchronize slots when
//! no change event has fired.

use palette::Srgb;

use crate::colors::{BLACK, lerp};
use crate::types::PairingStatus;

/// Number of battery anchors: one per decile boundary, 0 through 100.
pub const BATTERY_ANCHOR_COUNT: usize = 11;

/// Battery colors at 0, 10, 20, ... 100 percent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatteryAnchors(pub [Srgb; BATTERY_ANCHOR_COUNT]);

impl BatteryAnchors {
    /// Red at empty, green at half, green with a touch of blue at full.
    pub const DEFAULT: BatteryAnchors = BatteryAnchors([
        Srgb::new(1.0, 0.0, 0.0),
        Srgb::new(0.8, 0.2, 0.0),
        Srgb::new(0.6, 0.4, 0.0),
        Srgb::new(0.4, 0.6, 0.0),
        Srgb::new(0.2, 0.8, 0.0),
        Srgb::new(0.0, 1.0, 0.0),
        Srgb::new(0.0, 1.0, 0.06),
        Srgb::new(0.0, 1.0, 0.12),
        Srgb::new(0.0, 1.0, 0.18),
        Srgb::new(0.0, 1.0, 0.24),
        Srgb::new(0.0, 1.0, 0.3),
    ]);

    /// Anchor color for decile `index` (0 = empty, 10 = full).
    ///
    /// Indices past the table return the full-charge anchor.
    pub fn anchor(&self, index: usize) -> Srgb {
        self.0[index.min(BATTERY_ANCHOR_COUNT - 1)]
    }

    /// Piecewise-linear color for a charge percentage.
    pub fn color_at(&self, percent: i32) -> Srgb {
        // 100 stays inside the top decile.
        let value = percent.clamp(0, 99);
        let band = (value / 10) as usize;
        let t = (value - (band as i32) * 10) as f32 / 10.0;
        lerp(self.anchor(band), self.anchor(band + 1), t)
    }
}

impl Default for BatteryAnchors {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Every color the status handlers can produce.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorPalette {
    pub battery: BatteryAnchors,
    pub advertising: Srgb,
    pub disconnected: Srgb,
    /// Colors for wireless profiles 0, 1 and 2.
    pub profiles: [Srgb; 3],
    pub profile_fallback: Srgb,
    /// Colors for layers 0 through 3.
    pub layers: [Srgb; 4],
    pub layer_fallback: Srgb,
}

impl IndicatorPalette {
    pub const DEFAULT: IndicatorPalette = IndicatorPalette {
        battery: BatteryAnchors::DEFAULT,
        advertising: Srgb::new(0.0, 0.0, 1.0),
        disconnected: BLACK,
        profiles: [
            Srgb::new(1.0, 0.3, 0.0),
            Srgb::new(0.0, 0.8, 1.0),
            Srgb::new(0.8, 0.8, 0.0),
        ],
        profile_fallback: Srgb::new(1.0, 1.0, 1.0),
        layers: [
            Srgb::new(1.0, 0.0, 0.0),
            Srgb::new(0.4, 0.0, 1.0),
            Srgb::new(0.0, 1.0, 0.0),
            Srgb::new(0.0, 0.4, 1.0),
        ],
        layer_fallback: BLACK,
    };
}

impl Default for IndicatorPalette {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Battery slot color for `percent`. Out-of-range input saturates.
pub fn battery_color(anchors: &BatteryAnchors, percent: i32) -> Srgb {
    anchors.color_at(percent)
}

/// Connectivity slot color for the active profile's pairing state.
pub fn connectivity_color(palette: &IndicatorPalette, status: PairingStatus) -> Srgb {
    match status {
        PairingStatus::Connected { profile } => palette
            .profiles
            .get(profile as usize)
            .copied()
            .unwrap_or(palette.profile_fallback),
        PairingStatus::Advertising => palette.advertising,
        PairingStatus::Disconnected => palette.disconnected,
    }
}

/// Layer slot color for the highest active layer.
pub fn layer_color(palette: &IndicatorPalette, layer: u8) -> Srgb {
    palette
        .layers
        .get(layer as usize)
        .copied()
        .unwrap_or(palette.layer_fallback)
}

/// Current device status, queried when slots need resynchronizing.
///
/// Implement this over your battery reader, BLE stack and keymap.
pub trait StatusSource {
    /// State of charge, nominally 0-100.
    fn battery_percent(&self) -> i32;

    /// Pairing state of the active profile.
    fn pairing_status(&self) -> PairingStatus;

    /// Highest active keymap layer.
    fn highest_layer(&self) -> u8;
}

impl<T: StatusSource + ?Sized> StatusSource for &T {
    fn battery_percent(&self) -> i32 {
        (**self).battery_percent()
    }

    fn pairing_status(&self) -> PairingStatus {
        (**self).pairing_status()
    }

    fn highest_layer(&self) -> u8 {
        (**self).highest_layer()
    }
}
