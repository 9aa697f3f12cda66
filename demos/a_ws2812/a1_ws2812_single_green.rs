#![no_std]
#![no_main]
#![cfg(not(feature = "host"))]

use core::{convert::Infallible, panic};

use embassy_executor::Spawner;
use embassy_time::Timer;
use ws2812_dma::{
    Result,
    ws2812::{
        DrainOutcome, PinDescriptor, Rgb24, Ws2812, Ws2812Config,
        rp::{RpClock, RpDmaChannel, RpGpio, RpPwmTimer},
    },
};
use {defmt::info, defmt::warn, defmt_rtt as _, panic_probe as _};

// One onboard WS2812B, as on RP2040-Zero style boards.
const LED: PinDescriptor = PinDescriptor::bank0(16);
const CONFIG: Ws2812Config = Ws2812Config::new(ws2812_dma::ws2812::WS2812B, 125_000_000)
    .with_led_count(1);

// Nice trick: Two "mains" let's us use Results.
#[embassy_executor::main]
async fn main(spawner: Spawner) -> ! {
    let err = inner_main(spawner).await.unwrap_err();
    panic!("{err}");
}

async fn inner_main(_spawner: Spawner) -> Result<Infallible> {
    let p = embassy_rp::init(Default::default());

    let timer = RpPwmTimer::new(p.PWM_SLICE0);
    info!("PWM slice clock: {} Hz", timer.clock_hz());
    let mut ws2812 = Ws2812::new(
        RpGpio::new(),
        timer,
        RpDmaChannel::new(p.DMA_CH0),
        RpDmaChannel::new(p.DMA_CH1),
        RpClock,
        CONFIG,
    );

    // Green, then off, forever.
    let mut lit = true;
    loop {
        let color = if lit { Rgb24::new(0x00_FF_00) } else { Rgb24::new(0) };
        if ws2812.transmit_color(&LED, color) == DrainOutcome::TimedOut {
            warn!("frame timed out");
        }
        lit = !lit;
        Timer::after_millis(500).await;
    }
}
