//! RP2040 backend.
//!
//! - Reload timer: one PWM slice. `TOP` is the reload register; the slice counts
//!   up from 0 to `TOP`, so a reload of `n` lasts `n + 1` ticks of `clk_sys`.
//!   The slice's wrap DREQ paces both DMA channels.
//! - Set/reset register: the pin's `IO_BANK0` `GPIOn_CTRL`. The two command words
//!   differ only in the output override (drive low / drive high), and each DMA
//!   write replaces the whole register in one store.
//! - Transfer channels: DMA channels, the GPIO stream wrapping on an 8-byte read
//!   ring.
//!
//! `TOP` is latched on wrap, so a value written at one wrap sets the length of
//! the period after the next one. The GPIO stream toggles on every wrap, which
//! shifts both streams by the same one period and keeps them in step.

use core::marker::PhantomData;

use embassy_rp::Peri;
use embassy_rp::clocks::clk_sys_freq;
use embassy_rp::dma::Channel;
use embassy_rp::pac;
use embassy_rp::pwm::Slice;
use embassy_time::Instant;

use super::descriptor::{
    ChannelPriority, SetResetTarget, TransferDescriptor, TransferMode, TransferWidth,
    TriggerSource,
};
use super::hal::{DrainClock, Drive, GpioLine, ReloadTimer, TransferChannel};
use super::pin::PinDescriptor;
use super::timing::SENTINEL;

/// DREQ number of PWM slice 0's wrap; slices 1..=7 follow.
const DREQ_PWM_WRAP0: u8 = 24;

/// `GPIOn_CTRL.FUNCSEL` value that hands the pad to SIO.
const FUNCSEL_SIO: u8 = 5;

/// `RING_SIZE` for a ring of two 32-bit words (2^3 bytes).
const RING_SIZE_TWO_WORDS: u8 = 3;

// ============================================================================
// GPIO
// ============================================================================

/// Bank 0 GPIO, addressed by [`PinDescriptor`].
///
/// The RP2040 pads have no open-drain mode. An open-drain line is emulated the
/// way `embassy_rp::gpio::OutputOpenDrain` does it: the output level stays low
/// and "high" releases the line by turning the output driver off.
///
/// # Panics
///
/// [`GpioLine::configure_output`], and so [`set_pin`](super::set_pin) and every
/// transmission, panics for a [`PinDescriptor`] whose port is not 0. Build
/// descriptors for this backend with [`PinDescriptor::bank0`].
#[derive(Debug, Default)]
pub struct RpGpio {
    open_drain: u32,
}

impl RpGpio {
    /// GPIO bank 0 with every line in its reset configuration.
    #[must_use]
    pub const fn new() -> Self {
        Self { open_drain: 0 }
    }

    fn ctrl_word(outover: pac::io::vals::Outover, oeover: pac::io::vals::Oeover) -> u32 {
        let mut ctrl = pac::io::regs::GpioCtrl(0);
        ctrl.set_funcsel(FUNCSEL_SIO);
        ctrl.set_outover(outover);
        ctrl.set_oeover(oeover);
        ctrl.0
    }
}

impl GpioLine for RpGpio {
    fn configure_output(&mut self, pin: &PinDescriptor, drive: Drive) {
        assert_eq!(pin.port(), 0, "RP2040 has only GPIO bank 0");
        let line = usize::from(pin.line());
        let push_pull = drive == Drive::PushPull;

        pac::PADS_BANK0.gpio(line).write(|w| {
            w.set_ie(true);
            w.set_od(false);
            w.set_pue(false);
            w.set_pde(false);
            w.set_schmitt(true);
            w.set_slewfast(push_pull);
            w.set_drive(if push_pull {
                pac::pads::vals::Drive::_12M_A
            } else {
                pac::pads::vals::Drive::_2M_A
            });
        });
        pac::IO_BANK0.gpio(line).ctrl().write_value(pac::io::regs::GpioCtrl(
            Self::ctrl_word(pac::io::vals::Outover::NORMAL, pac::io::vals::Oeover::NORMAL),
        ));

        if push_pull {
            self.open_drain &= !pin.mask();
        } else {
            self.open_drain |= pin.mask();
            pac::SIO.gpio_out(0).value_clr().write_value(pin.mask());
        }
        pac::SIO.gpio_oe(0).value_set().write_value(pin.mask());
    }

    fn write(&mut self, pin: &PinDescriptor, high: bool) {
        if self.open_drain & pin.mask() != 0 {
            if high {
                pac::SIO.gpio_oe(0).value_clr().write_value(pin.mask());
            } else {
                pac::SIO.gpio_oe(0).value_set().write_value(pin.mask());
            }
        } else if high {
            pac::SIO.gpio_out(0).value_set().write_value(pin.mask());
        } else {
            pac::SIO.gpio_out(0).value_clr().write_value(pin.mask());
        }
    }

    fn set_reset_target(&self, pin: &PinDescriptor) -> SetResetTarget {
        let ctrl = pac::IO_BANK0.gpio(usize::from(pin.line())).ctrl();
        SetResetTarget {
            register: ctrl.as_ptr() as usize,
            reset: Self::ctrl_word(pac::io::vals::Outover::LOW, pac::io::vals::Oeover::ENABLE),
            set: Self::ctrl_word(pac::io::vals::Outover::HIGH, pac::io::vals::Oeover::ENABLE),
        }
    }
}

// ============================================================================
// PWM slice as reload timer
// ============================================================================

/// A PWM slice used as the reload timer, clocked from `clk_sys` without division.
pub struct RpPwmTimer<'d> {
    slice: usize,
    _slice: PhantomData<&'d mut ()>,
}

impl<'d> RpPwmTimer<'d> {
    /// Takes PWM slice `slice`.
    pub fn new(slice: Peri<'d, impl Slice>) -> Self {
        Self {
            slice: usize::from(slice.number()),
            _slice: PhantomData,
        }
    }

    /// Frequency the slice counts at, to compare with
    /// [`Ws2812Config::timer_clock_hz`](super::Ws2812Config::timer_clock_hz).
    #[must_use]
    pub fn clock_hz(&self) -> u32 {
        clk_sys_freq()
    }

    fn regs(&self) -> pac::pwm::Channel {
        pac::PWM.ch(self.slice)
    }
}

impl ReloadTimer for RpPwmTimer<'_> {
    fn init(&mut self, initial_reload: u16) {
        let regs = self.regs();
        regs.csr().write(|w| {
            w.set_en(false);
            w.set_ph_correct(false);
            w.set_divmode(pac::pwm::vals::Divmode::DIV);
        });
        regs.div().write(|w| {
            w.set_int(1);
            w.set_frac(0);
        });
        regs.top().write(|w| w.set_top(initial_reload));
        regs.ctr().write(|w| w.set_ctr(0));
    }

    fn reload_register(&self) -> usize {
        self.regs().top().as_ptr() as usize
    }

    fn trigger(&self) -> TriggerSource {
        TriggerSource(DREQ_PWM_WRAP0 + self.slice as u8)
    }

    // The wrap DREQ is always wired to the DMA, so starting the slice is enough.
    fn start(&mut self) {
        self.regs().csr().modify(|w| w.set_en(true));
    }

    // No software update event: park the counter on TOP so it wraps on the next tick.
    fn force_update(&mut self) {
        let regs = self.regs();
        let top = regs.top().read().top();
        regs.ctr().write(|w| w.set_ctr(top));
    }

    fn live_reload(&self) -> u16 {
        self.regs().top().read().top()
    }

    fn stop(&mut self) {
        self.regs().csr().modify(|w| w.set_en(false));
    }

    // Slices share one clock, so a stopped slice is returned to its reset state
    // instead of being gated.
    fn power_down(&mut self) {
        let regs = self.regs();
        regs.ctr().write(|w| w.set_ctr(0));
        regs.top().write(|w| w.set_top(SENTINEL));
    }
}

// ============================================================================
// DMA channels
// ============================================================================

/// One DMA channel.
pub struct RpDmaChannel<'d> {
    number: u8,
    ctrl: pac::dma::regs::CtrlTrig,
    _channel: PhantomData<&'d mut ()>,
}

impl<'d> RpDmaChannel<'d> {
    /// Takes DMA channel `channel`.
    pub fn new(channel: Peri<'d, impl Channel>) -> Self {
        Self {
            number: channel.number(),
            ctrl: pac::dma::regs::CtrlTrig(0),
            _channel: PhantomData,
        }
    }

    fn regs(&self) -> pac::dma::Channel {
        pac::DMA.ch(usize::from(self.number))
    }

    fn bit(&self) -> u32 {
        1 << self.number
    }
}

impl TransferChannel for RpDmaChannel<'_> {
    fn configure(&mut self, descriptor: &TransferDescriptor<'_>) {
        let regs = self.regs();
        regs.read_addr().write_value(descriptor.source as u32);
        regs.write_addr().write_value(descriptor.destination as u32);

        let mut ctrl = pac::dma::regs::CtrlTrig(0);
        ctrl.set_treq_sel(pac::dma::vals::TreqSel::from(descriptor.trigger.0));
        ctrl.set_data_size(match descriptor.width {
            TransferWidth::HalfWord => pac::dma::vals::DataSize::SIZE_HALFWORD,
            TransferWidth::Word => pac::dma::vals::DataSize::SIZE_WORD,
        });
        ctrl.set_incr_read(true);
        ctrl.set_incr_write(false);
        ctrl.set_high_priority(descriptor.priority == ChannelPriority::High);
        ctrl.set_chain_to(self.number);
        ctrl.set_irq_quiet(true);
        match descriptor.mode {
            TransferMode::Once => {
                regs.trans_count().write_value(descriptor.count as u32);
            }
            TransferMode::Circular => {
                // A read ring wraps the source; the count only has to outlast the frame.
                ctrl.set_ring_sel(false);
                ctrl.set_ring_size(RING_SIZE_TWO_WORDS);
                regs.trans_count().write_value(u32::MAX);
            }
        }
        self.ctrl = ctrl;
    }

    fn enable(&mut self) {
        let mut ctrl = self.ctrl;
        ctrl.set_en(true);
        self.regs().ctrl_trig().write_value(ctrl);
    }

    fn disable(&mut self) {
        pac::DMA
            .chan_abort()
            .write(|w| w.set_chan_abort(1 << self.number));
        while self.regs().ctrl_trig().read().busy() {}
        self.regs().ctrl_trig().modify(|w| w.set_en(false));
    }

    fn clear_flags(&mut self) {
        pac::DMA.ints(0).write_value(self.bit());
        self.regs().ctrl_trig().modify(|w| {
            w.set_read_error(true);
            w.set_write_error(true);
        });
    }
}

// ============================================================================
// Clock
// ============================================================================

/// [`DrainClock`] backed by the embassy time driver.
#[derive(Clone, Copy, Debug, Default)]
pub struct RpClock;

impl DrainClock for RpClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}
