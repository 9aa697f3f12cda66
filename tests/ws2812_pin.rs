#![allow(missing_docs)]
mod fake_backend;

use fake_backend::{Event, FakeGpio, count, driver, shared};
use ws2812_dma::ws2812::{Drive, PinDescriptor, SENTINEL, Ws2812Config, set_pin};

const LED: PinDescriptor = PinDescriptor::bank0(25);

#[test]
fn descriptor_names_one_line() {
    assert_eq!(LED.port(), 0);
    assert_eq!(LED.mask(), 1 << 25);
    assert_eq!(LED.line(), 25);
    assert_eq!(PinDescriptor::new(1, 0x0000_0100).line(), 8);
}

#[test]
fn bank0_descriptors_are_on_port_zero() {
    for line in 0..32 {
        let pin = PinDescriptor::bank0(line);
        assert_eq!(pin.port(), 0);
        assert_eq!(pin.line(), line);
    }
}

#[test]
#[should_panic(expected = "exactly one line")]
fn descriptor_rejects_multi_bit_mask() {
    let _ = PinDescriptor::new(0, 0b11);
}

#[test]
#[should_panic(expected = "bank 0 has 32 lines")]
fn descriptor_rejects_line_32() {
    let _ = PinDescriptor::bank0(32);
}

#[test]
fn on_is_push_pull_high() {
    let shared = shared(1, &[SENTINEL]);
    let mut gpio = FakeGpio(shared.clone());

    set_pin(&mut gpio, &LED, true);

    assert_eq!(
        shared.borrow().events,
        [
            Event::Configure {
                line: 25,
                drive: Drive::PushPull
            },
            Event::Write {
                line: 25,
                high: true
            },
        ]
    );
}

#[test]
fn off_is_open_drain_low() {
    let shared = shared(1, &[SENTINEL]);
    let mut gpio = FakeGpio(shared.clone());

    set_pin(&mut gpio, &LED, false);

    assert_eq!(
        shared.borrow().events,
        [
            Event::Configure {
                line: 25,
                drive: Drive::OpenDrain
            },
            Event::Write {
                line: 25,
                high: false
            },
        ]
    );
}

#[test]
fn off_twice_leaves_the_same_state() {
    let shared = shared(1, &[SENTINEL]);
    let mut gpio = FakeGpio(shared.clone());

    set_pin(&mut gpio, &LED, false);
    let once = shared.borrow().events.clone();
    set_pin(&mut gpio, &LED, false);

    let events = shared.borrow().events.clone();
    assert_eq!(events.len(), 2 * once.len());
    assert_eq!(events[once.len()..], once[..]);
}

#[test]
fn driver_set_pin_touches_only_the_gpio() {
    let shared = shared(1, &[SENTINEL]);
    let mut ws2812 = driver(&shared, Ws2812Config::default());

    ws2812.set_pin(&LED, true);
    ws2812.set_pin(&LED, false);

    assert_eq!(shared.borrow().events.len(), 4);
    assert_eq!(count(&shared, Event::TimerStart), 0);
    assert_eq!(shared.borrow().now_us, 0);
}
