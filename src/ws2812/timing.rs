//! Pulse timing for one LED chip family and its conversion to reload counts.
//!
//! Everything here is `const`. A configuration stored in a `const` that maps a
//! pulse to a reload count of zero, or to a count the reload register cannot
//! hold, fails the build instead of emitting corrupted timing.

use embassy_time::Duration;

// ============================================================================
// Frame geometry
// ============================================================================

/// Reload value reserved as the end-of-stream marker (the register's maximum).
///
/// Never produced for a real pulse.
pub const SENTINEL: u16 = u16::MAX;

/// Largest number of LEDs one frame can carry.
pub const MAX_LED_COUNT: usize = 10;

/// Color bits sent per LED.
pub const BITS_PER_LED: usize = 24;

/// Reload entries per LED: one HIGH and one LOW phase per bit.
pub const ENTRIES_PER_LED: usize = 2 * BITS_PER_LED;

/// Trailing slots that always hold [`SENTINEL`].
pub const SENTINEL_SLOTS: usize = 2;

/// Capacity of a [`TimingBuffer`](super::TimingBuffer).
pub const TIMING_BUFFER_LEN: usize = ENTRIES_PER_LED * MAX_LED_COUNT + SENTINEL_SLOTS;

const NANOS_PER_SECOND: u32 = 1_000_000_000;

// ============================================================================
// Protocol constants
// ============================================================================

/// Pulse widths of one addressable-LED chip family, in nanoseconds.
///
/// Switching chip family means substituting this constant set.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Ws2812Timing {
    /// HIGH phase of a `0` bit.
    pub zero_high_ns: u32,
    /// LOW phase of a `0` bit.
    pub zero_low_ns: u32,
    /// HIGH phase of a `1` bit.
    pub one_high_ns: u32,
    /// LOW phase of a `1` bit.
    pub one_low_ns: u32,
    /// Idle LOW time that latches a frame into the LEDs.
    pub reset_ns: u32,
}

impl Ws2812Timing {
    /// Length of the slower of the two bit shapes.
    #[must_use]
    pub const fn bit_period_ns(&self) -> u32 {
        let zero = self.zero_high_ns + self.zero_low_ns;
        let one = self.one_high_ns + self.one_low_ns;
        if zero > one { zero } else { one }
    }
}

/// WS2812B datasheet timing.
///
/// The 280 µs reset gap is the latch time of current WS2812B parts; older parts
/// that latch after 50 µs accept it too.
pub const WS2812B: Ws2812Timing = Ws2812Timing {
    zero_high_ns: 400,
    zero_low_ns: 850,
    one_high_ns: 800,
    one_low_ns: 450,
    reset_ns: 280_000,
};

/// Default timer input clock: RP2040 `clk_sys` at its boot frequency.
pub const TIMER_CLOCK_HZ_DEFAULT: u32 = 125_000_000;

/// Default settle time after arming before the sentinel counts as "drained".
pub const DRAIN_GRACE_DEFAULT: Duration = Duration::from_micros(10);

/// Default budget for one frame to drain before giving up.
pub const DRAIN_TIMEOUT_DEFAULT: Duration = Duration::from_millis(20);

// ============================================================================
// Configuration
// ============================================================================

/// Immutable driver configuration.
///
/// ```rust
/// use ws2812_dma::ws2812::{WS2812B, Ws2812Config};
///
/// const CONFIG: Ws2812Config = Ws2812Config::new(WS2812B, 125_000_000).with_led_count(4);
/// const COUNTS: ws2812_dma::ws2812::ReloadCounts = CONFIG.reload_counts();
///
/// assert_eq!(COUNTS.zero_high, 400 / 8 - 1);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Ws2812Config {
    /// Pulse widths of the LED chip family.
    pub timing: Ws2812Timing,
    /// Input clock of the reload timer, after any prescaling.
    pub timer_clock_hz: u32,
    /// LEDs driven by [`transmit_color`](super::Ws2812::transmit_color).
    pub led_count: usize,
    /// Minimum time after arming before the sentinel is trusted.
    pub drain_grace: Duration,
    /// Longest a transmission may take before it is abandoned.
    pub drain_timeout: Duration,
}

impl Ws2812Config {
    /// Configuration for `timing` on a timer clocked at `timer_clock_hz`, driving a
    /// full frame of [`MAX_LED_COUNT`] LEDs.
    #[must_use]
    pub const fn new(timing: Ws2812Timing, timer_clock_hz: u32) -> Self {
        Self {
            timing,
            timer_clock_hz,
            led_count: MAX_LED_COUNT,
            drain_grace: DRAIN_GRACE_DEFAULT,
            drain_timeout: DRAIN_TIMEOUT_DEFAULT,
        }
    }

    /// Same configuration with a different fixed LED count.
    #[must_use]
    pub const fn with_led_count(self, led_count: usize) -> Self {
        Self { led_count, ..self }
    }

    /// Same configuration with a different drain grace period.
    #[must_use]
    pub const fn with_drain_grace(self, drain_grace: Duration) -> Self {
        Self {
            drain_grace,
            ..self
        }
    }

    /// Same configuration with a different drain budget.
    #[must_use]
    pub const fn with_drain_timeout(self, drain_timeout: Duration) -> Self {
        Self {
            drain_timeout,
            ..self
        }
    }

    /// Duration of one timer tick.
    #[must_use]
    pub const fn nanos_per_tick(&self) -> u32 {
        nanos_per_tick(self.timer_clock_hz)
    }

    /// Longest a full frame of `led_count` LEDs can take, including the period the
    /// timer spends on the sentinel.
    #[must_use]
    pub const fn worst_case_frame_ns(&self) -> u64 {
        let bits = (self.led_count * BITS_PER_LED) as u64;
        let sentinel_ns = (SENTINEL as u64 + 1) * self.nanos_per_tick() as u64;
        bits * self.timing.bit_period_ns() as u64 + sentinel_ns
    }

    /// Validates the configuration and converts its pulse widths to reload counts.
    ///
    /// # Panics
    ///
    /// Panics when the LED count is outside `1..=MAX_LED_COUNT`, when the drain budget
    /// is shorter than a worst case frame, or when any pulse maps to a reload count of
    /// zero or one the reload register cannot hold. In a `const` these are build
    /// errors.
    #[must_use]
    pub const fn reload_counts(&self) -> ReloadCounts {
        assert!(self.led_count > 0, "LED count must be positive");
        assert!(
            self.led_count <= MAX_LED_COUNT,
            "LED count exceeds the largest supported frame"
        );
        assert!(
            self.drain_timeout.as_micros().saturating_mul(1_000) >= self.worst_case_frame_ns(),
            "drain timeout is shorter than a worst case frame"
        );
        ReloadCounts::new(&self.timing, self.nanos_per_tick())
    }
}

impl Default for Ws2812Config {
    fn default() -> Self {
        Self::new(WS2812B, TIMER_CLOCK_HZ_DEFAULT)
    }
}

// ============================================================================
// Reload counts
// ============================================================================

/// Reload register values for the four pulse shapes.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ReloadCounts {
    /// HIGH phase of a `0` bit.
    pub zero_high: u16,
    /// LOW phase of a `0` bit.
    pub zero_low: u16,
    /// HIGH phase of a `1` bit.
    pub one_high: u16,
    /// LOW phase of a `1` bit.
    pub one_low: u16,
}

impl ReloadCounts {
    /// Converts every pulse of `timing` at `nanos_per_tick`.
    ///
    /// # Panics
    ///
    /// See [`reload_count`].
    #[must_use]
    pub const fn new(timing: &Ws2812Timing, nanos_per_tick: u32) -> Self {
        Self {
            zero_high: reload_count(timing.zero_high_ns, nanos_per_tick),
            zero_low: reload_count(timing.zero_low_ns, nanos_per_tick),
            one_high: reload_count(timing.one_high_ns, nanos_per_tick),
            one_low: reload_count(timing.one_low_ns, nanos_per_tick),
        }
    }

    /// `(high, low)` reload pair for one bit.
    #[must_use]
    pub const fn for_bit(&self, bit: bool) -> (u16, u16) {
        if bit {
            (self.one_high, self.one_low)
        } else {
            (self.zero_high, self.zero_low)
        }
    }
}

/// Nanoseconds per tick of a timer clocked at `timer_clock_hz`.
///
/// # Panics
///
/// Panics when the clock is zero or faster than 1 GHz.
#[must_use]
pub const fn nanos_per_tick(timer_clock_hz: u32) -> u32 {
    assert!(timer_clock_hz > 0, "timer clock must be positive");
    let nanos = NANOS_PER_SECOND / timer_clock_hz;
    assert!(nanos > 0, "timer clock is faster than one tick per nanosecond");
    nanos
}

/// Reload value that makes the timer's period last `duration_ns`.
///
/// The timer counts `reload + 1` ticks per period, so one is subtracted from the
/// tick count.
///
/// # Panics
///
/// Panics when the result would be zero (timer clock too slow for the pulse) or
/// would reach [`SENTINEL`] (clock too fast or pulse too long).
#[must_use]
pub const fn reload_count(duration_ns: u32, nanos_per_tick: u32) -> u16 {
    assert!(nanos_per_tick > 0, "tick length must be positive");
    let ticks = duration_ns / nanos_per_tick;
    assert!(
        ticks > 1,
        "pulse maps to a reload count of zero; timer clock too slow"
    );
    let reload = ticks - 1;
    assert!(
        reload < SENTINEL as u32,
        "pulse does not fit the reload register; timer clock too fast"
    );
    reload as u16
}
