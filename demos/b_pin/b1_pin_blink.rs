#![no_std]
#![no_main]
#![cfg(not(feature = "host"))]

use core::{convert::Infallible, future, panic};

use embassy_executor::Spawner;
use embassy_time::Timer;
use ws2812_dma::{
    Result,
    ws2812::{
        PinDescriptor, Ws2812, Ws2812Config, colors,
        rp::{RpClock, RpDmaChannel, RpGpio, RpPwmTimer},
    },
};
use {defmt_rtt as _, panic_probe as _};

// Pico 1 onboard LED, plus one WS2812B on GPIO 16.
const ONBOARD_LED: PinDescriptor = PinDescriptor::bank0(25);
const PIXEL: PinDescriptor = PinDescriptor::bank0(16);

#[embassy_executor::main]
async fn main(spawner: Spawner) -> ! {
    let err = inner_main(spawner).await.unwrap_err();
    panic!("{err}");
}

async fn inner_main(_spawner: Spawner) -> Result<Infallible> {
    let p = embassy_rp::init(Default::default());

    let mut ws2812 = Ws2812::new(
        RpGpio::new(),
        RpPwmTimer::new(p.PWM_SLICE0),
        RpDmaChannel::new(p.DMA_CH0),
        RpDmaChannel::new(p.DMA_CH1),
        RpClock,
        Ws2812Config::default().with_led_count(1),
    );

    // Blink the plain LED five times, then hand over to the pixel.
    for _ in 0..5 {
        ws2812.set_pin(&ONBOARD_LED, true);
        Timer::after_millis(250).await;
        ws2812.set_pin(&ONBOARD_LED, false);
        Timer::after_millis(250).await;
    }
    ws2812.write_frame(&PIXEL, [colors::YELLOW])?;

    future::pending().await // run forever
}
