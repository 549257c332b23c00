//! Engine configuration.
//!
//! Fixed after construction. Build-time options of the firmware (start on
//! boot, external power gating, follow the idle timer, animation style)
//! become plain fields here.

use crate::envelope::{Blink, Breathe, Envelope};
use crate::quantize::ChannelScale;
use crate::types::{AnimationMode, ConfigError, Slot};

/// Pixel position of each slot on the strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SlotMap {
    pub power: usize,
    pub connectivity: usize,
    pub layer: usize,
}

impl SlotMap {
    pub const fn new(power: usize, connectivity: usize, layer: usize) -> Self {
        Self {
            power,
            connectivity,
            layer,
        }
    }

    /// Pixel index for `slot`.
    #[inline]
    pub const fn index(&self, slot: Slot) -> usize {
        match slot {
            Slot::Power => self.power,
            Slot::Connectivity => self.connectivity,
            Slot::Layer => self.layer,
        }
    }
}

impl Default for SlotMap {
    fn default() -> Self {
        Self::new(0, 1, 2)
    }
}

/// Indicator engine configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorConfig {
    pub slot_map: SlotMap,
    /// Mode entered by `toggle` and on activity.
    pub active_mode: AnimationMode,
    /// Mode entered when the device goes idle.
    pub idle_mode: AnimationMode,
    /// Gate the external power rail.
    pub ext_power: bool,
    /// Turn the strip on during `init`.
    pub auto_start: bool,
    /// React to activity events.
    pub follow_activity: bool,
    /// Timer period between ticks.
    pub tick_period_ms: u32,
    pub breathe: Breathe,
    pub blink: Blink,
    pub channel_scale: ChannelScale,
    /// Wait before the first resynchronization so battery, pairing and
    /// keymap state are valid.
    pub settle_delay_ms: u32,
}

impl IndicatorConfig {
    pub const DEFAULT: IndicatorConfig = IndicatorConfig {
        slot_map: SlotMap::new(0, 1, 2),
        active_mode: AnimationMode::Solid,
        idle_mode: AnimationMode::Off,
        ext_power: false,
        auto_start: false,
        follow_activity: true,
        tick_period_ms: 1,
        breathe: Breathe::new(5000),
        blink: Blink::new(500, 500, 0.5),
        channel_scale: ChannelScale::DEFAULT,
        settle_delay_ms: 200,
    };

    pub fn slot_map(mut self, slot_map: SlotMap) -> Self {
        self.slot_map = slot_map;
        self
    }

    pub fn active_mode(mut self, mode: AnimationMode) -> Self {
        self.active_mode = mode;
        self
    }

    pub fn idle_mode(mut self, mode: AnimationMode) -> Self {
        self.idle_mode = mode;
        self
    }

    pub fn ext_power(mut self, enabled: bool) -> Self {
        self.ext_power = enabled;
        self
    }

    pub fn auto_start(mut self, enabled: bool) -> Self {
        self.auto_start = enabled;
        self
    }

    pub fn follow_activity(mut self, enabled: bool) -> Self {
        self.follow_activity = enabled;
        self
    }

    pub fn tick_period_ms(mut self, period: u32) -> Self {
        self.tick_period_ms = period;
        self
    }

    pub fn breathe(mut self, breathe: Breathe) -> Self {
        self.breathe = breathe;
        self
    }

    pub fn blink(mut self, blink: Blink) -> Self {
        self.blink = blink;
        self
    }

    pub fn channel_scale(mut self, scale: ChannelScale) -> Self {
        self.channel_scale = scale;
        self
    }

    pub fn settle_delay_ms(mut self, delay: u32) -> Self {
        self.settle_delay_ms = delay;
        self
    }

    /// Envelope for `mode`; `None` for `Off`.
    pub fn envelope(&self, mode: AnimationMode) -> Option<Envelope> {
        match mode {
            AnimationMode::Off => None,
            AnimationMode::Solid => Some(Envelope::Solid),
            AnimationMode::Breathe => Some(Envelope::Breathe(self.breathe)),
            AnimationMode::Blink => Some(Envelope::Blink(self.blink)),
        }
    }

    /// Checks the configuration against a strip of `pixel_count` pixels.
    ///
    /// # Errors
    /// * `SlotOutOfRange` - a slot is mapped past the end of the strip
    /// * `DuplicateSlotIndex` - two slots share a pixel
    /// * `ZeroPeriod` - tick, breathe or blink period is zero
    /// * `ActiveModeOff` - the active mode would never render
    pub fn validate(&self, pixel_count: usize) -> Result<(), ConfigError> {
        for slot in Slot::ALL {
            let index = self.slot_map.index(slot);
            if index >= pixel_count {
                return Err(ConfigError::SlotOutOfRange {
                    slot,
                    index,
                    pixel_count,
                });
            }
        }

        let map = &self.slot_map;
        if map.power == map.connectivity || map.power == map.layer {
            return Err(ConfigError::DuplicateSlotIndex { index: map.power });
        }
        if map.connectivity == map.layer {
            return Err(ConfigError::DuplicateSlotIndex {
                index: map.connectivity,
            });
        }

        if self.tick_period_ms == 0 || self.breathe.period == 0 || self.blink.period() == 0 {
            return Err(ConfigError::ZeroPeriod);
        }

        if self.active_mode == AnimationMode::Off {
            return Err(ConfigError::ActiveModeOff);
        }

        Ok(())
    }
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
