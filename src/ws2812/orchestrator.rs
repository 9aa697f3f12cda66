//! Transmission orchestrator: arms the timer and both transfer channels, waits
//! for the reload stream to drain, then tears everything down.

use embassy_time::Duration;
use smart_leds::{RGB8, SmartLedsWrite};

use super::Rgb24;
use super::descriptor::{GpioCommands, TransferPair};
use super::encoder::TimingBuffer;
use super::hal::{
    DrainClock, DrainOutcome, DrainWindow, Drive, GpioLine, ReloadTimer, TransferChannel,
    block_for,
};
use super::pin::{PinDescriptor, set_pin};
use super::timing::{ReloadCounts, SENTINEL, Ws2812Config};
use crate::{Error, Result};

/// Addressable-LED driver that clocks WS2812-style frames out of one GPIO line
/// with a reload timer and two chained transfer channels.
///
/// The driver owns every peripheral it touches, and every operation takes
/// `&mut self`, so two transmissions can never overlap. Each transmission
/// blocks the caller until the frame has drained or the configured budget runs
/// out; the peripherals are back to idle when it returns either way.
///
///
/// ```rust,ignore
/// use ws2812_dma::ws2812::{PinDescriptor, Rgb24, Ws2812, Ws2812Config};
/// use ws2812_dma::ws2812::rp::{RpGpio, RpPwmTimer, RpDmaChannel, RpClock};
///
/// fn example(p: embassy_rp::Peripherals) {
///     const STATUS_LED: PinDescriptor = PinDescriptor::bank0(16);
///     let mut ws2812 = Ws2812::new(
///         RpGpio::new(),
///         RpPwmTimer::new(p.PWM_SLICE0),
///         RpDmaChannel::new(p.DMA_CH0),
///         RpDmaChannel::new(p.DMA_CH1),
///         RpClock,
///         Ws2812Config::default().with_led_count(1),
///     );
///
///     ws2812.transmit_color(&STATUS_LED, Rgb24::new(0x00_FF_00));
/// }
/// ```
pub struct Ws2812<G, T, D, C> {
    gpio: G,
    timer: T,
    gpio_channel: D,
    reload_channel: D,
    clock: C,
    config: Ws2812Config,
    counts: ReloadCounts,
}

impl<G, T, D, C> Ws2812<G, T, D, C>
where
    G: GpioLine,
    T: ReloadTimer,
    D: TransferChannel,
    C: DrainClock,
{
    /// Takes ownership of the hardware and validates `config`.
    ///
    /// # Panics
    ///
    /// Panics, before touching any peripheral, when `config` maps a pulse to a
    /// reload count of zero or one the reload register cannot hold. See
    /// [`Ws2812Config::reload_counts`].
    pub fn new(
        gpio: G,
        timer: T,
        gpio_channel: D,
        reload_channel: D,
        clock: C,
        config: Ws2812Config,
    ) -> Self {
        let counts = config.reload_counts();
        info!(
            "ws2812: {} LEDs, {} ns/tick, reload 0=({},{}) 1=({},{})",
            config.led_count,
            config.nanos_per_tick(),
            counts.zero_high,
            counts.zero_low,
            counts.one_high,
            counts.one_low
        );
        Self {
            gpio,
            timer,
            gpio_channel,
            reload_channel,
            clock,
            config,
            counts,
        }
    }

    /// The configuration the driver was built with.
    #[must_use]
    pub const fn config(&self) -> &Ws2812Config {
        &self.config
    }

    /// Reload counts derived from the configuration.
    #[must_use]
    pub const fn reload_counts(&self) -> &ReloadCounts {
        &self.counts
    }

    /// Turns `pin` on (push-pull high) or off (open-drain low).
    pub fn set_pin(&mut self, pin: &PinDescriptor, active: bool) {
        set_pin(&mut self.gpio, pin, active);
    }

    /// Sends `color` to every LED of the configured count and blocks until the
    /// frame has been clocked out.
    ///
    /// A timeout is logged and returned but not retried; the LEDs keep whatever
    /// part of the frame reached them.
    pub fn transmit_color(
        &mut self,
        pin: &PinDescriptor,
        color: impl Into<Rgb24>,
    ) -> DrainOutcome {
        let mut buffer = TimingBuffer::new();
        buffer.encode_color(color.into(), self.config.led_count, &self.counts);
        self.transmit(pin, &mut buffer)
    }

    /// Sends one color per LED and blocks until the frame has been clocked out.
    ///
    /// # Errors
    ///
    /// [`Error::TooManyLeds`] when the frame is longer than
    /// [`MAX_LED_COUNT`](super::MAX_LED_COUNT), [`Error::EmptyFrame`] when it is
    /// empty. Nothing is sent in either case.
    pub fn write_frame<I>(&mut self, pin: &PinDescriptor, colors: I) -> Result<DrainOutcome>
    where
        I: IntoIterator,
        I::Item: Into<Rgb24>,
    {
        let mut buffer = TimingBuffer::new();
        buffer.encode_frame(colors, &self.counts)?;
        Ok(self.transmit(pin, &mut buffer))
    }

    /// Binds `pin` so the driver can be used through [`SmartLedsWrite`].
    pub fn line(&mut self, pin: PinDescriptor) -> Ws2812Line<'_, G, T, D, C> {
        Ws2812Line { driver: self, pin }
    }

    /// Gives the hardware back: GPIO, timer, GPIO channel, reload channel, clock.
    pub fn release(self) -> (G, T, D, D, C) {
        (
            self.gpio,
            self.timer,
            self.gpio_channel,
            self.reload_channel,
            self.clock,
        )
    }

    fn transmit(&mut self, pin: &PinDescriptor, buffer: &mut TimingBuffer) -> DrainOutcome {
        debug!(
            "ws2812: sending {} reload entries on pin {}.{}",
            buffer.len(),
            pin.port(),
            pin.line()
        );

        // Idle: hold the line low long enough for the previous frame to latch.
        self.gpio.configure_output(pin, Drive::PushPull);
        self.gpio.write(pin, false);
        block_for(
            &self.clock,
            Duration::from_micros(u64::from(self.config.timing.reset_ns.div_ceil(1_000))),
        );

        let target = self.gpio.set_reset_target(pin);
        let commands = GpioCommands::new(&target);
        self.timer.init(SENTINEL);
        let transfers = TransferPair::build(
            &commands,
            &target,
            buffer,
            self.timer.reload_register(),
            self.timer.trigger(),
        );
        self.gpio_channel.configure(&transfers.gpio_update);
        self.reload_channel.configure(&transfers.timer_reload);

        // Armed -> running. Only the enable sequence runs with interrupts off.
        let armed_at = critical_section::with(|_| {
            self.gpio_channel.enable();
            self.reload_channel.enable();
            self.timer.start();
            self.timer.force_update();
            self.clock.now()
        });

        let outcome = self.timer.wait_for_drain(
            &self.clock,
            armed_at,
            DrainWindow {
                grace: self.config.drain_grace,
                timeout: self.config.drain_timeout,
            },
        );

        self.timer.stop();
        self.timer.power_down();
        self.gpio_channel.disable();
        self.reload_channel.disable();
        self.gpio_channel.clear_flags();
        self.reload_channel.clear_flags();
        buffer.clear();

        match outcome {
            DrainOutcome::Drained => trace!("ws2812: frame drained"),
            DrainOutcome::TimedOut => warn!(
                "ws2812: frame did not drain within {} us, frame may be truncated",
                self.config.drain_timeout.as_micros()
            ),
        }

        set_pin(&mut self.gpio, pin, false);
        outcome
    }
}

/// A [`Ws2812`] bound to one pin, writable through [`SmartLedsWrite`].
pub struct Ws2812Line<'a, G, T, D, C> {
    driver: &'a mut Ws2812<G, T, D, C>,
    pin: PinDescriptor,
}

impl<G, T, D, C> SmartLedsWrite for Ws2812Line<'_, G, T, D, C>
where
    G: GpioLine,
    T: ReloadTimer,
    D: TransferChannel,
    C: DrainClock,
{
    type Error = Error;
    type Color = RGB8;

    fn write<Iter, I>(&mut self, iterator: Iter) -> Result<(), Self::Error>
    where
        Iter: IntoIterator<Item = I>,
        I: Into<Self::Color>,
    {
        let pin = self.pin;
        self.driver
            .write_frame(&pin, iterator.into_iter().map(Into::<RGB8>::into))?;
        Ok(())
    }
}
