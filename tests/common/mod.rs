//! Shared test infrastructure for indicator-strip integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use core::cell::{Cell, RefCell};

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embedded_hal_async::delay::DelayNs;
use heapless::HistoryBuf;
use indicator_strip::{
    IndicatorConfig, IndicatorEngine, IndicatorPalette, PIXEL_OFF, PairingStatus, Pixel,
    PixelStrip, PowerRail, Srgb, StatusSource, TickTimer,
};

/// Strip length used by the engine tests; pixel 3 is never mapped.
pub const PIXELS: usize = 4;

// ============================================================================
// Mock Strip
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockError;

/// Mock strip that records the most recent frames
pub struct MockStrip<const N: usize> {
    frames: RefCell<HistoryBuf<[Pixel; N], 32>>,
    writes: Cell<usize>,
    ready: Cell<bool>,
    failing: Cell<bool>,
}

impl<const N: usize> MockStrip<N> {
    pub fn new() -> Self {
        Self {
            frames: RefCell::new(HistoryBuf::new()),
            writes: Cell::new(0),
            ready: Cell::new(true),
            failing: Cell::new(false),
        }
    }

    pub fn set_ready(&self, ready: bool) {
        self.ready.set(ready);
    }

    /// Make every subsequent write fail
    pub fn set_failing(&self, failing: bool) {
        self.failing.set(failing);
    }

    /// Number of write attempts, including failed ones
    pub fn writes(&self) -> usize {
        self.writes.get()
    }

    pub fn last_frame(&self) -> Option<[Pixel; N]> {
        self.frames.borrow().recent().copied()
    }

    pub fn last_frame_is_dark(&self) -> bool {
        self.last_frame()
            .is_some_and(|frame| frame.iter().all(|px| *px == PIXEL_OFF))
    }
}

impl<const N: usize> PixelStrip for &MockStrip<N> {
    type Error = MockError;

    fn is_ready(&self) -> bool {
        self.ready.get()
    }

    fn write_pixels(&mut self, pixels: &[Pixel]) -> Result<(), Self::Error> {
        self.writes.set(self.writes.get() + 1);
        if self.failing.get() {
            return Err(MockError);
        }
        let frame: [Pixel; N] = pixels.try_into().map_err(|_| MockError)?;
        self.frames.borrow_mut().write(frame);
        Ok(())
    }
}

// ============================================================================
// Mock Power Rail
// ============================================================================

/// Mock rail tracking its state and every switch request
pub struct MockPower {
    enabled: Cell<bool>,
    enables: Cell<usize>,
    disables: Cell<usize>,
    ready: Cell<bool>,
}

impl MockPower {
    pub fn new() -> Self {
        Self {
            enabled: Cell::new(false),
            enables: Cell::new(0),
            disables: Cell::new(0),
            ready: Cell::new(true),
        }
    }

    pub fn set_ready(&self, ready: bool) {
        self.ready.set(ready);
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.get()
    }

    pub fn enables(&self) -> usize {
        self.enables.get()
    }

    pub fn disables(&self) -> usize {
        self.disables.get()
    }
}

impl PowerRail for &MockPower {
    type Error = MockError;

    fn is_ready(&self) -> bool {
        self.ready.get()
    }

    fn enable(&mut self) -> Result<(), Self::Error> {
        self.enabled.set(true);
        self.enables.set(self.enables.get() + 1);
        Ok(())
    }

    fn disable(&mut self) -> Result<(), Self::Error> {
        self.enabled.set(false);
        self.disables.set(self.disables.get() + 1);
        Ok(())
    }
}

// ============================================================================
// Mock Timer
// ============================================================================

pub struct MockTimer {
    running: Cell<bool>,
    starts: Cell<usize>,
    period_ms: Cell<u32>,
}

impl MockTimer {
    pub fn new() -> Self {
        Self {
            running: Cell::new(false),
            starts: Cell::new(0),
            period_ms: Cell::new(0),
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.get()
    }

    pub fn starts(&self) -> usize {
        self.starts.get()
    }

    pub fn period_ms(&self) -> u32 {
        self.period_ms.get()
    }
}

impl TickTimer for &MockTimer {
    fn start(&mut self, period_ms: u32) {
        self.running.set(true);
        self.starts.set(self.starts.get() + 1);
        self.period_ms.set(period_ms);
    }

    fn stop(&mut self) {
        self.running.set(false);
    }
}

// ============================================================================
// Mock Status Source
// ============================================================================

/// Mock status snapshot with settable values
pub struct MockStatus {
    pub battery: Cell<i32>,
    pub pairing: Cell<PairingStatus>,
    pub layer: Cell<u8>,
}

impl MockStatus {
    pub fn new() -> Self {
        Self {
            battery: Cell::new(45),
            pairing: Cell::new(PairingStatus::Connected { profile: 1 }),
            layer: Cell::new(7),
        }
    }
}

impl StatusSource for MockStatus {
    fn battery_percent(&self) -> i32 {
        self.battery.get()
    }

    fn pairing_status(&self) -> PairingStatus {
        self.pairing.get()
    }

    fn highest_layer(&self) -> u8 {
        self.layer.get()
    }
}

// ============================================================================
// Mock Delay
// ============================================================================

/// Records how long the engine asked to sleep
#[derive(Default)]
pub struct MockDelay {
    pub total_ns: u64,
}

impl DelayNs for MockDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.total_ns += u64::from(ms) * 1_000_000;
    }
}

// ============================================================================
// Test Rig
// ============================================================================

pub type TestEngine<'a> = IndicatorEngine<
    CriticalSectionRawMutex,
    &'a MockStrip<PIXELS>,
    &'a MockPower,
    &'a MockTimer,
    &'a MockStatus,
    PIXELS,
>;

/// Owns the mocks an engine borrows
pub struct Rig {
    pub strip: MockStrip<PIXELS>,
    pub power: MockPower,
    pub timer: MockTimer,
    pub status: MockStatus,
}

impl Rig {
    pub fn new() -> Self {
        Self {
            strip: MockStrip::new(),
            power: MockPower::new(),
            timer: MockTimer::new(),
            status: MockStatus::new(),
        }
    }

    pub fn engine(&self, config: IndicatorConfig) -> TestEngine<'_> {
        IndicatorEngine::new(
            config,
            IndicatorPalette::default(),
            &self.strip,
            &self.power,
            &self.timer,
            &self.status,
        )
        .unwrap()
    }
}

// ============================================================================
// Test Helper Functions
// ============================================================================

/// Compare two colors with floating-point tolerance
pub fn colors_equal(a: Srgb, b: Srgb) -> bool {
    const EPSILON: f32 = 0.001;
    (a.red - b.red).abs() < EPSILON
        && (a.green - b.green).abs() < EPSILON
        && (a.blue - b.blue).abs() < EPSILON
}
