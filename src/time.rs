//! Periodic timer abstraction.

/// Periodic hardware timer driving the tick.
///
/// Each expiry should call [`IndicatorEngine::request_tick`], which only
/// posts a request; the tick itself runs on the worker.
///
/// [`IndicatorEngine::request_tick`]: crate::IndicatorEngine::request_tick
pub trait TickTimer {
    /// Starts (or restarts) periodic expiry every `period_ms` milliseconds.
    ///
    /// The first expiry should fire without delay.
    fn start(&mut self, period_ms: u32);

    /// Stops expiry. Safe to call when already stopped.
    fn stop(&mut self);
}
