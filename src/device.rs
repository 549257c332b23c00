//! Hardware seams: the pixel strip and the external power rail.

use core::convert::Infallible;
use core::fmt::Debug;

use crate::colors::Pixel;

/// Trait for abstracting an addressable RGB strip.
///
/// Implement this for your strip driver (SPI, PIO, RMT, ...). The engine
/// always writes a full frame, one pixel per strip position.
pub trait PixelStrip {
    type Error: Debug;

    /// Returns false if the driver is unavailable.
    fn is_ready(&self) -> bool {
        true
    }

    /// Sends one frame to the strip.
    fn write_pixels(&mut self, pixels: &[Pixel]) -> Result<(), Self::Error>;
}

/// Trait for a switchable DC rail feeding the strip.
pub trait PowerRail {
    type Error: Debug;

    /// Returns false if the rail controller is unavailable.
    fn is_ready(&self) -> bool {
        true
    }

    fn enable(&mut self) -> Result<(), Self::Error>;

    fn disable(&mut self) -> Result<(), Self::Error>;
}

/// Stand-in for boards whose strip is permanently powered.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPowerRail;

impl PowerRail for NoPowerRail {
    type Error = Infallible;

    fn enable(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn disable(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

#[cfg(feature = "smart-leds")]
pub use self::smart::SmartLedsStrip;

#[cfg(feature = "smart-leds")]
mod smart {
    use core::fmt::Debug;

    use smart_leds::{RGB8, SmartLedsWrite};

    use super::PixelStrip;
    use crate::colors::Pixel;

    /// Adapts any `smart-leds` driver (ws2812-spi, ws2812-pio, ...) to [`PixelStrip`].
    pub struct SmartLedsStrip<W>(pub W);

    impl<W> PixelStrip for SmartLedsStrip<W>
    where
        W: SmartLedsWrite<Color = RGB8>,
        W::Error: Debug,
    {
        type Error = W::Error;

        fn write_pixels(&mut self, pixels: &[Pixel]) -> Result<(), Self::Error> {
            self.0
                .write(pixels.iter().map(|px| RGB8::new(px.red, px.green, px.blue)))
        }
    }
}
