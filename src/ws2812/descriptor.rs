//! Transfer descriptors for the two data-transfer channels.
//!
//! Building a [`TransferPair`] only fills in configuration. Nothing moves until
//! the orchestrator hands the descriptors to the channels and arms the timer.

use core::marker::PhantomData;

use super::encoder::TimingBuffer;

/// Hardware request line that paces a transfer, one transfer per request.
///
/// Both descriptors of a pair use the reload timer's "period elapsed" request.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TriggerSource(pub u8);

/// How a channel walks its source.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransferMode {
    /// Walk the source once, then stop.
    Once,
    /// Wrap back to the first source entry forever.
    Circular,
}

/// Size of one transfer.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransferWidth {
    /// 16 bits.
    HalfWord,
    /// 32 bits.
    Word,
}

/// Arbitration priority of a channel.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChannelPriority {
    /// Serviced after high-priority requests.
    Normal,
    /// Serviced first.
    High,
}

/// Register address plus the two words that drive a pin low and high.
///
/// Writing either word to `register` is a single atomic store; no
/// read-modify-write is involved.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SetResetTarget {
    /// Address of the port's set/reset (or control) register.
    pub register: usize,
    /// Word that drives the pin low.
    pub reset: u32,
    /// Word that drives the pin high.
    pub set: u32,
}

/// Source buffer of the GPIO-update channel: `[reset, set]`.
///
/// Aligned to its own size so a channel can wrap on it with an address ring.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(C, align(8))]
pub struct GpioCommands {
    words: [u32; 2],
}

impl GpioCommands {
    /// Reset word first, then set word.
    #[must_use]
    pub const fn new(target: &SetResetTarget) -> Self {
        Self {
            words: [target.reset, target.set],
        }
    }

    /// The two command words in transfer order.
    #[must_use]
    pub const fn words(&self) -> &[u32; 2] {
        &self.words
    }
}

/// Configuration of one channel, borrowed from the buffer it reads.
///
/// The lifetime keeps a descriptor from outliving its source.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TransferDescriptor<'a> {
    /// Address of the first source entry.
    pub source: usize,
    /// Address of the destination register. Never incremented.
    pub destination: usize,
    /// Entries per pass over the source.
    pub count: usize,
    /// Size of each entry.
    pub width: TransferWidth,
    /// Single pass or wraparound.
    pub mode: TransferMode,
    /// Arbitration priority.
    pub priority: ChannelPriority,
    /// Request line that paces the channel.
    pub trigger: TriggerSource,
    source_lifetime: PhantomData<&'a [u8]>,
}

/// The two descriptors of one transmission. Both must be started together.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TransferPair<'a> {
    /// Alternately writes the reset and set commands on every trigger.
    pub gpio_update: TransferDescriptor<'a>,
    /// Streams the timing buffer into the reload register.
    pub timer_reload: TransferDescriptor<'a>,
}

impl<'a> TransferPair<'a> {
    /// Builds both descriptors against the same `trigger`.
    ///
    /// The reload stream runs once over the encoded entries plus the terminating
    /// sentinel, at high priority, so the next pulse width is in place before the
    /// following trigger. The GPIO stream wraps over `[reset, set]` for as long as
    /// triggers arrive.
    #[must_use]
    pub fn build(
        commands: &'a GpioCommands,
        target: &SetResetTarget,
        buffer: &'a TimingBuffer,
        reload_register: usize,
        trigger: TriggerSource,
    ) -> Self {
        let gpio_update = TransferDescriptor {
            source: commands.words().as_ptr() as usize,
            destination: target.register,
            count: commands.words().len(),
            width: TransferWidth::Word,
            mode: TransferMode::Circular,
            priority: ChannelPriority::Normal,
            trigger,
            source_lifetime: PhantomData,
        };
        let timer_reload = TransferDescriptor {
            source: buffer.slots().as_ptr() as usize,
            destination: reload_register,
            count: buffer.transfer_len(),
            width: TransferWidth::HalfWord,
            mode: TransferMode::Once,
            priority: ChannelPriority::High,
            trigger,
            source_lifetime: PhantomData,
        };
        Self {
            gpio_update,
            timer_reload,
        }
    }
}
