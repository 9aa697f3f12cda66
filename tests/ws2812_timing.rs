#![allow(missing_docs)]
use embassy_time::Duration;
use ws2812_dma::ws2812::{
    MAX_LED_COUNT, ReloadCounts, SENTINEL, TIMING_BUFFER_LEN, WS2812B, Ws2812Config,
    nanos_per_tick, reload_count,
};

// Evaluated by the compiler: a bad timing constant here would fail the build.
const COUNTS_125MHZ: ReloadCounts = Ws2812Config::new(WS2812B, 125_000_000).reload_counts();

#[test]
fn ws2812b_at_125mhz() {
    assert_eq!(nanos_per_tick(125_000_000), 8);
    assert_eq!(
        COUNTS_125MHZ,
        ReloadCounts {
            zero_high: 49,
            zero_low: 105,
            one_high: 99,
            one_low: 55,
        }
    );
    assert_eq!(COUNTS_125MHZ.for_bit(false), (49, 105));
    assert_eq!(COUNTS_125MHZ.for_bit(true), (99, 55));
}

#[test]
fn reload_is_ticks_minus_one() {
    assert_eq!(reload_count(16, 8), 1);
    assert_eq!(reload_count(400, 10), 39);
    // Partial ticks are dropped.
    assert_eq!(reload_count(455, 10), 44);
}

#[test]
fn largest_reload_stays_below_sentinel() {
    assert_eq!(reload_count(65_535 * 8, 8), SENTINEL - 1);
}

#[test]
#[should_panic(expected = "reload count of zero")]
fn one_tick_pulse_is_fatal() {
    let _ = reload_count(8, 8);
}

#[test]
#[should_panic(expected = "reload count of zero")]
fn sub_tick_pulse_is_fatal() {
    let _ = reload_count(4, 8);
}

#[test]
#[should_panic(expected = "does not fit the reload register")]
fn reload_reaching_sentinel_is_fatal() {
    let _ = reload_count(65_536 * 8, 8);
}

#[test]
#[should_panic(expected = "reload count of zero")]
fn slow_timer_clock_is_rejected_by_config() {
    let config = Ws2812Config::new(WS2812B, 2_000_000)
        .with_led_count(1)
        .with_drain_timeout(Duration::from_millis(100));
    let _ = config.reload_counts();
}

#[test]
#[should_panic(expected = "LED count must be positive")]
fn zero_leds_is_rejected() {
    let _ = Ws2812Config::default().with_led_count(0).reload_counts();
}

#[test]
#[should_panic(expected = "LED count exceeds")]
fn too_many_leds_is_rejected() {
    let _ = Ws2812Config::default()
        .with_led_count(MAX_LED_COUNT + 1)
        .reload_counts();
}

#[test]
#[should_panic(expected = "drain timeout is shorter")]
fn timeout_below_worst_case_frame_is_rejected() {
    let _ = Ws2812Config::default()
        .with_drain_timeout(Duration::from_micros(100))
        .reload_counts();
}

#[test]
fn huge_drain_timeout_is_accepted() {
    let counts = Ws2812Config::default()
        .with_drain_timeout(Duration::from_secs(u64::MAX / 1_000_000))
        .reload_counts();
    assert_eq!(counts, Ws2812Config::default().reload_counts());
}

#[test]
fn worst_case_frame_includes_the_sentinel_period() {
    let config = Ws2812Config::default().with_led_count(1);
    assert_eq!(WS2812B.bit_period_ns(), 1_250);
    assert_eq!(config.worst_case_frame_ns(), 24 * 1_250 + 65_536 * 8);
}

#[test]
fn default_config() {
    let config = Ws2812Config::default();
    assert_eq!(config.timing, WS2812B);
    assert_eq!(config.timer_clock_hz, 125_000_000);
    assert_eq!(config.led_count, MAX_LED_COUNT);
    assert_eq!(config.drain_grace, Duration::from_micros(10));
    assert_eq!(config.drain_timeout, Duration::from_millis(20));
}

#[test]
fn buffer_holds_a_full_frame_and_two_sentinels() {
    assert_eq!(TIMING_BUFFER_LEN, 48 * MAX_LED_COUNT + 2);
}
