//! Color arithmetic helpers.
//!
//! Colors are `palette::Srgb<f32>` with channels nominally in 0.0-1.0.
//! Nothing here clamps; the quantizer is the only place values are bounded.

use palette::Srgb;

/// Hardware pixel, one byte per channel.
pub type Pixel = Srgb<u8>;

/// Black as a normalized color.
pub const BLACK: Srgb = Srgb::new(0.0, 0.0, 0.0);

/// Dark pixel.
pub const PIXEL_OFF: Pixel = Srgb::new(0, 0, 0);

/// Multiplies every channel by `factor`.
#[inline]
pub fn scale(color: Srgb, factor: f32) -> Srgb {
    Srgb::new(color.red * factor, color.green * factor, color.blue * factor)
}

/// Per-channel linear interpolation from `a` (t = 0) to `b` (t = 1).
///
/// `t` is not clamped; values outside 0.0-1.0 extrapolate.
#[inline]
pub fn lerp(a: Srgb, b: Srgb, t: f32) -> Srgb {
    Srgb::new(
        a.red + (b.red - a.red) * t,
        a.green + (b.green - a.green) * t,
        a.blue + (b.blue - a.blue) * t,
    )
}
