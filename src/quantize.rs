//! Temporal-dithering quantizer.
//!
//! Real indicator brightness sits well below one LSB per frame, so each
//! channel's fractional remainder is carried into the next frame. Averaged
//! over many frames the output converges on the requested intensity.

use crate::colors::{BLACK, Pixel};
use crate::types::Slot;
use palette::Srgb;

/// Per-channel brightness ceiling applied before quantization.
///
/// Asymmetric to compensate for LED color balance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelScale {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
}

impl ChannelScale {
    /// Ceiling tuned for WS2812-class pixels viewed up close.
    pub const DEFAULT: ChannelScale = ChannelScale::new(0.006, 0.005, 0.0064);

    /// Full 0-255 range on every channel.
    pub const UNITY: ChannelScale = ChannelScale::new(1.0, 1.0, 1.0);

    pub const fn new(red: f32, green: f32, blue: f32) -> Self {
        Self { red, green, blue }
    }
}

impl Default for ChannelScale {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[inline]
fn quantize_channel(target: f32, carry: &mut f32, scale: f32) -> u8 {
    // Negative targets are out of contract; they render dark and drop the
    // carry. Flooring a tiny negative value would round the carry up to 1.0.
    let value = (target * 255.0 * scale + *carry).max(0.0);
    let whole = libm::floorf(value);
    *carry = value - whole;
    whole.min(255.0) as u8
}

/// Quantizes `target` to a pixel, folding in and updating `carry`.
///
/// After the call each carry channel lies in `[0, 1)`.
pub fn quantize(target: Srgb, carry: &mut Srgb, scale: &ChannelScale) -> Pixel {
    Srgb::new(
        quantize_channel(target.red, &mut carry.red, scale.red),
        quantize_channel(target.green, &mut carry.green, scale.green),
        quantize_channel(target.blue, &mut carry.blue, scale.blue),
    )
}

/// Carried quantization error, one entry per slot.
///
/// Lives for the lifetime of the engine and is never reset.
#[derive(Debug, Clone, Copy)]
pub struct DitherState {
    carry: [Srgb; Slot::COUNT],
}

impl DitherState {
    pub const fn new() -> Self {
        Self {
            carry: [BLACK; Slot::COUNT],
        }
    }

    /// Quantizes `target` using the carry owned by `slot`.
    #[inline]
    pub fn quantize_slot(&mut self, slot: Slot, target: Srgb, scale: &ChannelScale) -> Pixel {
        quantize(target, &mut self.carry[slot.index()], scale)
    }

    /// Current carry for `slot`.
    pub fn carry(&self, slot: Slot) -> Srgb {
        self.carry[slot.index()]
    }
}

impl Default for DitherState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_white_at_unity_is_saturated() {
        let mut carry = BLACK;
        let px = quantize(Srgb::new(1.0, 1.0, 1.0), &mut carry, &ChannelScale::UNITY);
        assert_eq!(px, Srgb::new(255, 255, 255));
        assert_eq!(carry, BLACK);
    }

    #[test]
    fn negative_target_renders_dark() {
        let mut carry = BLACK;
        let px = quantize(Srgb::new(-0.5, 0.0, 0.0), &mut carry, &ChannelScale::UNITY);
        assert_eq!(px.red, 0);
        assert_eq!(carry.red, 0.0);
    }

    #[test]
    fn slots_keep_independent_carries() {
        let mut state = DitherState::new();
        let scale = ChannelScale::new(0.002, 0.002, 0.002);
        state.quantize_slot(Slot::Power, Srgb::new(1.0, 0.0, 0.0), &scale);
        assert!(state.carry(Slot::Power).red > 0.0);
        assert_eq!(state.carry(Slot::Layer), BLACK);
    }
}
