//! A device abstraction for WS2812B-style addressable LEDs driven by a hardware
//! timer and two chained data-transfer channels instead of CPU bit-banging.
//!
//!
//! 1. The [`TimingBuffer`] turns each color bit, green first, into two timer
//!    reload counts: the HIGH and the LOW phase of that bit. A [`SENTINEL`]
//!    terminates the stream.
//! 2. A [`TransferPair`] sets up one channel that alternately writes the pin's
//!    reset and set commands, and one that streams the reload counts into the
//!    timer. Both are paced by the timer's "period elapsed" request.
//! 3. [`Ws2812`] starts both channels and the timer inside a critical section,
//!    then spins until the timer settles on the sentinel (or a time budget runs
//!    out), and tears everything down.
//!
//! The hardware sits behind the [`GpioLine`], [`ReloadTimer`],
//! [`TransferChannel`] and [`DrainClock`] traits. The [`rp`] module implements
//! them for the RP2040.
//!
//!
//! ```rust,ignore
//! use smart_leds::colors;
//! use ws2812_dma::ws2812::rp::{RpClock, RpDmaChannel, RpGpio, RpPwmTimer};
//! use ws2812_dma::ws2812::{PinDescriptor, Ws2812, Ws2812Config};
//!
//! fn example(p: embassy_rp::Peripherals) -> ws2812_dma::Result<()> {
//!     const STRIP: PinDescriptor = PinDescriptor::bank0(2);
//!     let mut ws2812 = Ws2812::new(
//!         RpGpio::new(),
//!         RpPwmTimer::new(p.PWM_SLICE1),
//!         RpDmaChannel::new(p.DMA_CH2),
//!         RpDmaChannel::new(p.DMA_CH3),
//!         RpClock,
//!         Ws2812Config::default(),
//!     );
//!
//!     // Every LED the same color.
//!     ws2812.transmit_color(&STRIP, colors::ORANGE);
//!
//!     // One color per LED.
//!     ws2812.write_frame(&STRIP, [colors::RED, colors::GREEN, colors::BLUE])?;
//!
//!     // A plain LED on another pin.
//!     ws2812.set_pin(&PinDescriptor::bank0(25), true);
//!     Ok(())
//! }
//! ```

use smart_leds::RGB8;

// ============================================================================
// Submodules
// ============================================================================

pub mod descriptor;
pub mod encoder;
pub mod hal;
pub mod orchestrator;
pub mod pin;
#[cfg(not(feature = "host"))]
pub mod rp;
pub mod timing;

pub use descriptor::{
    ChannelPriority, GpioCommands, SetResetTarget, TransferDescriptor, TransferMode,
    TransferPair, TransferWidth, TriggerSource,
};
pub use encoder::TimingBuffer;
pub use hal::{
    DrainClock, DrainOutcome, DrainWindow, Drive, GpioLine, ReloadTimer, TransferChannel,
    block_for,
};
pub use orchestrator::{Ws2812, Ws2812Line};
pub use pin::{PinDescriptor, set_pin};
pub use timing::{
    BITS_PER_LED, ENTRIES_PER_LED, MAX_LED_COUNT, ReloadCounts, SENTINEL, SENTINEL_SLOTS,
    TIMING_BUFFER_LEN, WS2812B, Ws2812Config, Ws2812Timing, nanos_per_tick, reload_count,
};

/// Predefined RGB color constants from the `smart_leds` crate.
#[doc(inline)]
pub use smart_leds::colors;

// ============================================================================
// Rgb24 - packed color
// ============================================================================

/// A 24-bit color packed as `0xRRGGBB`.
///
/// WS2812 LEDs expect green, then red, then blue; [`to_grb`](Self::to_grb)
/// performs that reorder and the encoder applies it to every color.
///
/// ```rust
/// use ws2812_dma::ws2812::Rgb24;
///
/// let color = Rgb24::new(0x12_34_56);
/// assert_eq!(color.to_grb(), 0x34_12_56);
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rgb24(u32);

impl Rgb24 {
    /// Color from `0xRRGGBB`. Bits above the low 24 are dropped.
    #[must_use]
    pub const fn new(rgb: u32) -> Self {
        Self(rgb & 0x00FF_FFFF)
    }

    /// Color from its three channels.
    #[must_use]
    pub const fn from_channels(red: u8, green: u8, blue: u8) -> Self {
        Self(((red as u32) << 16) | ((green as u32) << 8) | blue as u32)
    }

    /// Packed `0xRRGGBB` value.
    #[must_use]
    pub const fn rgb(self) -> u32 {
        self.0
    }

    /// Red channel.
    #[must_use]
    pub const fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    /// Green channel.
    #[must_use]
    pub const fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    /// Blue channel.
    #[must_use]
    pub const fn blue(self) -> u8 {
        self.0 as u8
    }

    /// The same color packed in transmission order, `0xGGRRBB`.
    #[must_use]
    pub const fn to_grb(self) -> u32 {
        ((self.green() as u32) << 16) | ((self.red() as u32) << 8) | self.blue() as u32
    }
}

impl From<RGB8> for Rgb24 {
    fn from(color: RGB8) -> Self {
        Self::from_channels(color.r, color.g, color.b)
    }
}

impl From<Rgb24> for RGB8 {
    fn from(color: Rgb24) -> Self {
        Self::new(color.red(), color.green(), color.blue())
    }
}
