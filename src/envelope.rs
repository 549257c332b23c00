//! Brightness envelopes.
//!
//! Each envelope is a pure function of the tick counter. The same multiplier
//! is applied to every slot.

use core::f32::consts::TAU;

#[inline]
fn phase(tick: u32, period: u32) -> u32 {
    tick.checked_rem(period).unwrap_or(0)
}

/// Smooth pulse: dimmest at phase 0, brightest at half period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Breathe {
    /// Ticks per full pulse.
    pub period: u32,
}

impl Breathe {
    /// Multiplier floor, reached at phase 0.
    pub const MIN_LEVEL: f32 = 0.1 * 0.45;

    /// Multiplier ceiling, reached at half period.
    pub const MAX_LEVEL: f32 = 2.1 * 0.45;

    pub const fn new(period: u32) -> Self {
        Self { period }
    }

    /// Multiplier for `tick`, in `[MIN_LEVEL, MAX_LEVEL]`.
    pub fn level(&self, tick: u32) -> f32 {
        breathe(tick, self.period)
    }
}

impl Default for Breathe {
    fn default() -> Self {
        Self::new(5000)
    }
}

/// Breathe multiplier: `(1.1 - cos(2π · phase / period)) · 0.45`.
pub fn breathe(tick: u32, period: u32) -> f32 {
    if period == 0 {
        return Breathe::MIN_LEVEL;
    }
    let angle = TAU * (phase(tick, period) as f32 / period as f32);
    (1.1 - libm::cosf(angle)) * 0.45
}

/// Square wave: `off_len` dark ticks followed by `on_len` ticks at `level`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Blink {
    pub on_len: u32,
    pub off_len: u32,
    /// Multiplier during the on phase.
    pub level: f32,
}

impl Blink {
    pub const fn new(on_len: u32, off_len: u32, level: f32) -> Self {
        Self {
            on_len,
            off_len,
            level,
        }
    }

    /// Ticks per on/off cycle.
    #[inline]
    pub fn period(&self) -> u32 {
        self.on_len.saturating_add(self.off_len)
    }

    /// Position of `tick` within the cycle.
    #[inline]
    pub fn phase(&self, tick: u32) -> u32 {
        phase(tick, self.period())
    }

    pub fn level(&self, tick: u32) -> f32 {
        if self.phase(tick) < self.off_len {
            0.0
        } else {
            self.level
        }
    }

    /// True on the tick where brightness drops to zero.
    pub fn entering_off(&self, tick: u32) -> bool {
        self.phase(tick) == 0
    }

    /// True on the tick where brightness rises again.
    pub fn entering_on(&self, tick: u32) -> bool {
        self.phase(tick) == self.off_len
    }
}

impl Default for Blink {
    fn default() -> Self {
        Self::new(500, 500, 0.5)
    }
}

/// Envelope selected by a running animation mode.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Envelope {
    Solid,
    Breathe(Breathe),
    Blink(Blink),
}

impl Envelope {
    /// Multiplier for `tick`.
    pub fn level(&self, tick: u32) -> f32 {
        match self {
            Envelope::Solid => 1.0,
            Envelope::Breathe(breathe) => breathe.level(tick),
            Envelope::Blink(blink) => blink.level(tick),
        }
    }
}
