#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`IndicatorEngine`**: Owns the strip, power rail and timer; renders one frame per tick
//! - **`Slot`**: One of the three indicator roles (`Power`, `Connectivity`, `Layer`)
//! - **`AnimationMode`**: `Off`, `Solid`, `Breathe` or `Blink`
//! - **`Envelope`**: Brightness multiplier applied to every slot for the active mode
//! - **`quantize`**: Temporal dithering from `Srgb<f32>` to 8-bit pixels
//! - **`IndicatorPalette`**: Colors used by the battery, pairing and layer handlers
//! - **`IndicatorConfig`**: Slot positions, modes, power gating and timing
//! - **`PixelStrip`** / **`PowerRail`** / **`TickTimer`**: Traits to implement for your hardware
//! - **`StatusSource`**: Current device status, used to resynchronize slots
//!
//! The library uses `Srgb<f32>` (0.0-1.0 range) for slot colors and `Srgb<u8>`
//! for the pixels handed to the strip.

#[macro_use]
mod fmt;

// Re-export Srgb from palette for user convenience
pub use palette::Srgb;

pub mod colors;
pub mod config;
pub mod device;
pub mod envelope;
pub mod event;
pub mod indicator;
pub mod quantize;
pub mod slots;
pub mod status;
pub mod time;
pub mod types;

pub use colors::{BLACK, PIXEL_OFF, Pixel, lerp, scale};
pub use config::{IndicatorConfig, SlotMap};
pub use device::{NoPowerRail, PixelStrip, PowerRail};
#[cfg(feature = "smart-leds")]
pub use device::SmartLedsStrip;
pub use envelope::{Blink, Breathe, Envelope, breathe};
pub use event::IndicatorEvent;
pub use indicator::IndicatorEngine;
pub use quantize::{ChannelScale, DitherState, quantize};
pub use slots::IndicatorSlots;
pub use status::{
    BatteryAnchors, IndicatorPalette, StatusSource, battery_color, connectivity_color,
    layer_color,
};
pub use time::TickTimer;
pub use types::{
    ActivityState, AnimationMode, ConfigError, IndicatorError, PairingStatus, Slot, TickOutcome,
};
