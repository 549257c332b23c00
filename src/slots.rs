//! Indicator slot registers.
//!
//! Each slot holds the most recent target color written by its status
//! handler. Slots are guarded individually so a handler write never tears
//! a color the tick is reading, and never waits on a frame in flight.

use core::cell::Cell;

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::RawMutex;
use palette::Srgb;

use crate::colors::BLACK;
use crate::status::IndicatorPalette;
use crate::types::Slot;

/// Three last-write-wins color registers.
pub struct IndicatorSlots<R: RawMutex> {
    colors: [Mutex<R, Cell<Srgb>>; Slot::COUNT],
}

impl<R: RawMutex> IndicatorSlots<R> {
    /// Creates slots initialized to black.
    pub const fn new() -> Self {
        Self {
            colors: [
                Mutex::new(Cell::new(BLACK)),
                Mutex::new(Cell::new(BLACK)),
                Mutex::new(Cell::new(BLACK)),
            ],
        }
    }

    /// Creates slots holding the palette's startup colors.
    pub fn with_defaults(palette: &IndicatorPalette) -> Self {
        let slots = Self::new();
        slots.reset(palette);
        slots
    }

    /// Restores the startup colors: empty battery, disconnected, no layer.
    pub fn reset(&self, palette: &IndicatorPalette) {
        self.write(Slot::Power, palette.battery.anchor(0));
        self.write(Slot::Connectivity, palette.disconnected);
        self.write(Slot::Layer, palette.layer_fallback);
    }

    pub fn write(&self, slot: Slot, color: Srgb) {
        self.colors[slot.index()].lock(|cell| cell.set(color));
    }

    pub fn read(&self, slot: Slot) -> Srgb {
        self.colors[slot.index()].lock(Cell::get)
    }

    /// Copies every slot, in `Slot::ALL` order.
    pub fn snapshot(&self) -> [Srgb; Slot::COUNT] {
        Slot::ALL.map(|slot| self.read(slot))
    }
}

impl<R: RawMutex> Default for IndicatorSlots<R> {
    fn default() -> Self {
        Self::new()
    }
}
