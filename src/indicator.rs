//! Indicator engine: animation state machine and power/lifecycle control.
//!
//! Provides [`IndicatorEngine`], the single owned context that status
//! handlers, the timer interrupt, the tick worker and the user toggle all
//! share through `&self`.
//!
//! State is guarded in two tiers:
//! - slot colors, the animation mode, the tick counter and the dither
//!   carries sit behind short blocking locks that are never held across a
//!   hardware call;
//! - the strip, power rail and timer sit behind an async mutex held for the
//!   whole of a tick or a mode transition, so frames never interleave. The
//!   mode, counter and carries are only changed while it is held.

use core::cell::{Cell, RefCell};

use embassy_sync::blocking_mutex::Mutex as BlockingMutex;
use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::mutex::Mutex;
use embassy_sync::signal::Signal;
use embedded_hal_async::delay::DelayNs;
use palette::Srgb;

use crate::colors::{PIXEL_OFF, scale};
use crate::config::IndicatorConfig;
use crate::device::{PixelStrip, PowerRail};
use crate::event::IndicatorEvent;
use crate::quantize::DitherState;
use crate::slots::IndicatorSlots;
use crate::status::{
    IndicatorPalette, StatusSource, battery_color, connectivity_color, layer_color,
};
use crate::time::TickTimer;
use crate::types::{
    ActivityState, AnimationMode, ConfigError, IndicatorError, PairingStatus, Slot, TickOutcome,
};

struct Hardware<S, P, T> {
    strip: S,
    power: P,
    timer: T,
}

/// Tick counter and dither carries. Only mutated while the hardware guard
/// is held.
struct RenderState {
    tick: u32,
    dither: DitherState,
}

/// Renders three status slots onto an `N`-pixel strip.
///
/// # Type Parameters
/// * `R` - Raw mutex guarding shared state (e.g. `CriticalSectionRawMutex`)
/// * `S` - Strip driver
/// * `P` - External power rail (use [`NoPowerRail`](crate::NoPowerRail) if none)
/// * `T` - Periodic tick timer
/// * `Q` - Status snapshot used for resynchronization
/// * `N` - Number of pixels on the strip
pub struct IndicatorEngine<R: RawMutex, S, P, T, Q, const N: usize> {
    config: IndicatorConfig,
    palette: IndicatorPalette,
    slots: IndicatorSlots<R>,
    mode: BlockingMutex<R, Cell<AnimationMode>>,
    render: BlockingMutex<R, RefCell<RenderState>>,
    hardware: Mutex<R, Hardware<S, P, T>>,
    tick_request: Signal<R, ()>,
    status: Q,
}

impl<R, S, P, T, Q, const N: usize> IndicatorEngine<R, S, P, T, Q, N>
where
    R: RawMutex,
    S: PixelStrip,
    P: PowerRail,
    T: TickTimer,
    Q: StatusSource,
{
    /// Creates an engine in `Off` mode with slots at their startup colors.
    ///
    /// # Errors
    /// Returns the first [`ConfigError`] found by [`IndicatorConfig::validate`].
    pub fn new(
        config: IndicatorConfig,
        palette: IndicatorPalette,
        strip: S,
        power: P,
        timer: T,
        status: Q,
    ) -> Result<Self, ConfigError> {
        config.validate(N)?;

        Ok(Self {
            config,
            palette,
            slots: IndicatorSlots::with_defaults(&palette),
            mode: BlockingMutex::new(Cell::new(AnimationMode::Off)),
            render: BlockingMutex::new(RefCell::new(RenderState {
                tick: 0,
                dither: DitherState::new(),
            })),
            hardware: Mutex::new(Hardware {
                strip,
                power,
                timer,
            }),
            tick_request: Signal::new(),
            status,
        })
    }

    /// Startup sequence.
    ///
    /// Shuts down a running strip, resets the slots, starts the strip if
    /// `auto_start` is set, waits `settle_delay_ms` for battery, pairing and
    /// keymap state to become valid, then resynchronizes every slot.
    pub async fn init(&self, delay: &mut impl DelayNs) {
        {
            let mut hw = self.hardware.lock().await;
            self.enter(&mut hw, AnimationMode::Off);
            self.render.lock(|cell| cell.borrow_mut().tick = 0);
        }
        self.slots.reset(&self.palette);

        if self.config.auto_start {
            if let Err(err) = self.switch_on().await {
                warn!("Indicator auto-start failed: {}", err);
            }
        }

        delay.delay_ms(self.config.settle_delay_ms).await;
        self.resync();
    }

    /// Flips the strip between `Off` and the configured active mode.
    ///
    /// # Errors
    /// `DeviceNotReady` if the strip, or the power rail when gating is
    /// enabled, is unavailable. No state is changed in that case.
    pub async fn toggle(&self) -> Result<(), IndicatorError> {
        let resumed = {
            let mut hw = self.hardware.lock().await;
            self.check_ready(&hw)?;
            if self.mode().is_running() {
                self.enter(&mut hw, AnimationMode::Off);
                false
            } else {
                self.enter(&mut hw, self.config.active_mode);
                true
            }
        };

        if resumed {
            self.resync();
        }
        Ok(())
    }

    async fn switch_on(&self) -> Result<(), IndicatorError> {
        {
            let mut hw = self.hardware.lock().await;
            self.check_ready(&hw)?;
            self.enter(&mut hw, self.config.active_mode);
        }
        self.resync();
        Ok(())
    }

    /// Battery state of charge changed.
    pub fn on_battery(&self, percent: i32) {
        if !self.mode().is_running() {
            return;
        }
        if !(0..=100).contains(&percent) {
            warn!("{}: battery at {}%", IndicatorError::InvalidInput, percent);
        }
        self.slots
            .write(Slot::Power, battery_color(&self.palette.battery, percent));
    }

    /// Pairing state of the active profile changed.
    pub fn on_pairing(&self, status: PairingStatus) {
        if !self.mode().is_running() {
            return;
        }
        self.slots
            .write(Slot::Connectivity, connectivity_color(&self.palette, status));
    }

    /// Highest active layer changed.
    pub fn on_layer(&self, layer: u8) {
        if !self.mode().is_running() {
            return;
        }
        self.slots.write(Slot::Layer, layer_color(&self.palette, layer));
    }

    /// Device activity changed.
    ///
    /// `Active` enters the active mode and asserts external power; `Idle`
    /// enters the idle mode, shutting the strip down if that mode is `Off`.
    pub async fn on_activity(&self, state: ActivityState) {
        if !self.config.follow_activity {
            return;
        }

        let target = match state {
            ActivityState::Active => self.config.active_mode,
            ActivityState::Idle => self.config.idle_mode,
            ActivityState::Sleep => return,
        };

        let resumed = {
            let mut hw = self.hardware.lock().await;
            if let Err(err) = self.check_ready(&hw) {
                warn!("Ignoring activity change: {}", err);
                return;
            }

            let was_running = self.mode().is_running();
            let changed = self.enter(&mut hw, target);
            if state == ActivityState::Active && !changed {
                self.power_on(&mut hw);
            }
            !was_running && target.is_running()
        };

        if resumed {
            self.resync();
        }
    }

    /// Dispatches a bus event to its handler.
    pub async fn handle_event(&self, event: IndicatorEvent) {
        match event {
            IndicatorEvent::Battery(percent) => self.on_battery(percent),
            IndicatorEvent::Pairing(status) => self.on_pairing(status),
            IndicatorEvent::Layer(layer) => self.on_layer(layer),
            IndicatorEvent::Activity(state) => self.on_activity(state).await,
        }
    }

    /// Re-runs every slot handler against the current status snapshot.
    ///
    /// Handlers are skipped while `Off`, so slots go stale; this brings
    /// them back in line once the strip is running again.
    pub fn resync(&self) {
        debug!("Resynchronizing indicator slots");
        self.on_battery(self.status.battery_percent());
        self.on_layer(self.status.highest_layer());
        self.on_pairing(self.status.pairing_status());
    }

    /// Timer expiry. Posts a tick request for the worker.
    ///
    /// Requests collapse: if the worker has not consumed the previous one,
    /// this one is dropped.
    pub fn request_tick(&self) {
        if self.mode().is_running() {
            self.tick_request.signal(());
        }
    }

    /// Returns true if a tick request is waiting for the worker.
    pub fn tick_pending(&self) -> bool {
        self.tick_request.signaled()
    }

    /// Waits for the next tick request and renders one frame.
    pub async fn run_once(&self) -> TickOutcome {
        self.tick_request.wait().await;
        self.tick().await
    }

    /// Tick worker. Spawn once; renders a frame per tick request.
    pub async fn run(&self) -> ! {
        loop {
            self.run_once().await;
        }
    }

    /// Renders one frame.
    ///
    /// Applies the mode's envelope to every slot, quantizes each into its
    /// pixel, writes the frame and advances the tick counter. A failed
    /// write is logged; the next tick retries.
    ///
    /// Slot and counter locks are released before the strip is written, so
    /// status handlers never wait on a frame in flight.
    pub async fn tick(&self) -> TickOutcome {
        let mut hw = self.hardware.lock().await;

        let mode = self.mode();
        let Some(envelope) = self.config.envelope(mode) else {
            return TickOutcome::Skipped;
        };

        let targets = self.slots.snapshot();
        let (tick, frame) = self.render.lock(|cell| {
            let mut state = cell.borrow_mut();
            let tick = state.tick;
            let level = envelope.level(tick);

            let mut frame = [PIXEL_OFF; N];
            for slot in Slot::ALL {
                let target = scale(targets[slot.index()], level);
                frame[self.config.slot_map.index(slot)] =
                    state
                        .dither
                        .quantize_slot(slot, target, &self.config.channel_scale);
            }

            state.tick = tick.wrapping_add(1);
            (tick, frame)
        });

        let blink = &self.config.blink;
        let gated = self.config.ext_power && mode == AnimationMode::Blink;

        if gated && blink.entering_on(tick) {
            self.power_on(&mut hw);
        }

        let outcome = match hw.strip.write_pixels(&frame) {
            Ok(()) => TickOutcome::Rendered,
            Err(_) => {
                error!("{} (tick {})", IndicatorError::WriteFailed, tick);
                TickOutcome::WriteFailed
            }
        };

        if gated && blink.off_len > 0 && blink.entering_off(tick) {
            self.power_off(&mut hw);
        }

        trace!("Tick {} in {:?}: {:?}", tick, mode, outcome);
        outcome
    }

    /// Current animation mode.
    pub fn mode(&self) -> AnimationMode {
        self.mode.lock(Cell::get)
    }

    /// Ticks rendered since the current mode was entered.
    pub fn tick_count(&self) -> u32 {
        self.render.lock(|cell| cell.borrow().tick)
    }

    /// Target color currently held by `slot`.
    pub fn slot_color(&self, slot: Slot) -> Srgb {
        self.slots.read(slot)
    }

    /// Quantization carry currently held by `slot`.
    pub fn carry(&self, slot: Slot) -> Srgb {
        self.render.lock(|cell| cell.borrow().dither.carry(slot))
    }

    pub fn config(&self) -> &IndicatorConfig {
        &self.config
    }

    pub fn palette(&self) -> &IndicatorPalette {
        &self.palette
    }

    fn set_mode(&self, mode: AnimationMode) {
        self.mode.lock(|cell| cell.set(mode));
    }

    fn check_ready(&self, hw: &Hardware<S, P, T>) -> Result<(), IndicatorError> {
        if !hw.strip.is_ready() {
            return Err(IndicatorError::DeviceNotReady);
        }
        if self.config.ext_power && !hw.power.is_ready() {
            return Err(IndicatorError::DeviceNotReady);
        }
        Ok(())
    }

    /// Moves to `mode`. Returns false if already there.
    ///
    /// Entering a running mode powers the rail, resets the tick counter and
    /// restarts the timer. Entering `Off` shuts the hardware down.
    fn enter(&self, hw: &mut Hardware<S, P, T>, mode: AnimationMode) -> bool {
        let previous = self.mode();
        if previous == mode {
            return false;
        }

        if mode.is_running() {
            self.power_on(hw);
            self.set_mode(mode);
            self.render.lock(|cell| cell.borrow_mut().tick = 0);
            hw.timer.start(self.config.tick_period_ms);
        } else {
            self.shut_down(hw);
        }

        info!("Indicator mode {:?} -> {:?}", previous, mode);
        true
    }

    fn shut_down(&self, hw: &mut Hardware<S, P, T>) {
        hw.timer.stop();
        self.set_mode(AnimationMode::Off);
        self.tick_request.reset();

        // Blank before cutting power so the strip is dark even if the rail
        // refuses to switch.
        if hw.strip.write_pixels(&[PIXEL_OFF; N]).is_err() {
            error!("{}: unable to blank the strip", IndicatorError::WriteFailed);
        }
        self.power_off(hw);
    }

    fn power_on(&self, hw: &mut Hardware<S, P, T>) {
        if self.config.ext_power && hw.power.enable().is_err() {
            error!("{}: unable to enable external power", IndicatorError::PowerFailed);
        }
    }

    fn power_off(&self, hw: &mut Hardware<S, P, T>) {
        if self.config.ext_power && hw.power.disable().is_err() {
            error!("{}: unable to disable external power", IndicatorError::PowerFailed);
        }
    }
}
