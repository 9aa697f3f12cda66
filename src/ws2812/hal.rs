//! Capability interface between the platform-agnostic driver and one target's
//! timer, data-transfer channels, GPIO port and clock.
//!
//! A backend implements these four traits. The encoder and orchestrator only
//! ever talk to them, so they run unchanged against a fake backend on the host.

use core::hint::spin_loop;

use embassy_time::{Duration, Instant};

use super::descriptor::{SetResetTarget, TransferDescriptor, TriggerSource};
use super::pin::PinDescriptor;
use super::timing::SENTINEL;

/// Electrical mode of an output pin.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Drive {
    /// Sources and sinks current.
    PushPull,
    /// Only sinks current, no pull resistor.
    OpenDrain,
}

/// A GPIO port able to drive any line it owns.
pub trait GpioLine {
    /// Configures `pin` as an output in the given mode.
    fn configure_output(&mut self, pin: &PinDescriptor, drive: Drive);

    /// Writes the output level of `pin`.
    fn write(&mut self, pin: &PinDescriptor, high: bool);

    /// Register and command words a transfer channel writes to toggle `pin`.
    fn set_reset_target(&self, pin: &PinDescriptor) -> SetResetTarget;
}

/// A counter whose period is set by a reload register and whose "period
/// elapsed" event can request data transfers.
pub trait ReloadTimer {
    /// Powers the timer, counting up with no prescaling and `initial_reload` loaded.
    fn init(&mut self, initial_reload: u16);

    /// Address of the reload register, the destination of the reload stream.
    fn reload_register(&self) -> usize;

    /// Request line raised on every period.
    fn trigger(&self) -> TriggerSource;

    /// Enables the counter and the period-elapsed transfer request.
    fn start(&mut self);

    /// Generates one period event immediately, priming the first reload value.
    fn force_update(&mut self);

    /// Reload value currently in effect.
    fn live_reload(&self) -> u16;

    /// Disables the counter and its transfer request.
    fn stop(&mut self);

    /// Gates the timer's clock off.
    fn power_down(&mut self);

    /// Spins until the reload stream has drained or `window.timeout` passes.
    ///
    /// Drained means the live reload register holds [`SENTINEL`] and at least
    /// `window.grace` has passed since `armed_at`. The grace period hides the
    /// sentinel the timer was initialized with.
    fn wait_for_drain<C: DrainClock>(
        &self,
        clock: &C,
        armed_at: Instant,
        window: DrainWindow,
    ) -> DrainOutcome {
        loop {
            let elapsed = clock.now().saturating_duration_since(armed_at);
            if elapsed >= window.grace && self.live_reload() == SENTINEL {
                return DrainOutcome::Drained;
            }
            if elapsed >= window.timeout {
                return DrainOutcome::TimedOut;
            }
            spin_loop();
        }
    }
}

/// One data-transfer channel.
pub trait TransferChannel {
    /// Loads `descriptor` without starting the channel.
    fn configure(&mut self, descriptor: &TransferDescriptor<'_>);

    /// Starts serving requests.
    fn enable(&mut self);

    /// Stops the channel, abandoning any remaining transfers.
    fn disable(&mut self);

    /// Clears completion and error flags.
    fn clear_flags(&mut self);
}

/// Monotonic time source for busy-waits.
pub trait DrainClock {
    /// Current instant.
    fn now(&self) -> Instant;
}

/// Bounds of one drain wait.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DrainWindow {
    /// Time after arming before the sentinel is trusted.
    pub grace: Duration,
    /// Time after arming at which the wait gives up.
    pub timeout: Duration,
}

/// How a transmission ended.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DrainOutcome {
    /// The timer settled on the terminating sentinel.
    Drained,
    /// The budget ran out first; the frame may be truncated.
    TimedOut,
}

/// Spins for `duration` on `clock`.
pub fn block_for<C: DrainClock>(clock: &C, duration: Duration) {
    let start = clock.now();
    while clock.now().saturating_duration_since(start) < duration {
        spin_loop();
    }
}
