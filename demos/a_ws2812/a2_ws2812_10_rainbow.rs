#![no_std]
#![no_main]
#![cfg(not(feature = "host"))]

use core::{convert::Infallible, panic};

use embassy_executor::Spawner;
use embassy_time::Timer;
use smart_leds::{
    SmartLedsWrite, brightness,
    hsv::{Hsv, hsv2rgb},
};
use ws2812_dma::{
    Result,
    ws2812::{
        MAX_LED_COUNT, PinDescriptor, Ws2812, Ws2812Config,
        rp::{RpClock, RpDmaChannel, RpGpio, RpPwmTimer},
    },
};
use {defmt_rtt as _, panic_probe as _};

// A strip of 10 WS2812B LEDs on GPIO 2.
const STRIP: PinDescriptor = PinDescriptor::bank0(2);

#[embassy_executor::main]
async fn main(spawner: Spawner) -> ! {
    let err = inner_main(spawner).await.unwrap_err();
    panic!("{err}");
}

async fn inner_main(_spawner: Spawner) -> Result<Infallible> {
    let p = embassy_rp::init(Default::default());

    let mut ws2812 = Ws2812::new(
        RpGpio::new(),
        RpPwmTimer::new(p.PWM_SLICE3),
        RpDmaChannel::new(p.DMA_CH4),
        RpDmaChannel::new(p.DMA_CH5),
        RpClock,
        Ws2812Config::default(),
    );
    let mut strip = ws2812.line(STRIP);

    // Rotate a rainbow along the strip, dimmed to save eyes and power.
    let mut offset: u8 = 0;
    loop {
        let pixels = (0..MAX_LED_COUNT).map(|index| {
            let hue = offset.wrapping_add((index * 256 / MAX_LED_COUNT) as u8);
            hsv2rgb(Hsv {
                hue,
                sat: 255,
                val: 255,
            })
        });
        strip.write(brightness(pixels, 32))?;
        offset = offset.wrapping_add(1);
        Timer::after_millis(20).await;
    }
}
