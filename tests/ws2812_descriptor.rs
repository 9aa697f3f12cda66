#![allow(missing_docs)]
use ws2812_dma::ws2812::{
    ChannelPriority, GpioCommands, ReloadCounts, Rgb24, SetResetTarget, TimingBuffer,
    TransferMode, TransferPair, TransferWidth, TriggerSource, WS2812B, Ws2812Config,
};

const COUNTS: ReloadCounts = Ws2812Config::new(WS2812B, 125_000_000).reload_counts();
const TARGET: SetResetTarget = SetResetTarget {
    register: 0x4001_4014,
    reset: 0x0000_3205,
    set: 0x0000_3305,
};
const RELOAD_REGISTER: usize = 0x4005_0010;
const TRIGGER: TriggerSource = TriggerSource(25);

#[test]
fn commands_are_reset_then_set() {
    let commands = GpioCommands::new(&TARGET);
    assert_eq!(commands.words(), &[TARGET.reset, TARGET.set]);
}

#[test]
fn commands_are_aligned_for_an_address_ring() {
    let commands = GpioCommands::new(&TARGET);
    assert_eq!(core::mem::align_of::<GpioCommands>(), 8);
    assert_eq!(commands.words().as_ptr() as usize % 8, 0);
}

#[test]
fn pair_describes_both_streams() {
    let commands = GpioCommands::new(&TARGET);
    let mut buffer = TimingBuffer::new();
    buffer.encode_color(Rgb24::new(0x00_FF_00), 2, &COUNTS);

    let pair = TransferPair::build(&commands, &TARGET, &buffer, RELOAD_REGISTER, TRIGGER);

    let gpio = pair.gpio_update;
    assert_eq!(gpio.source, commands.words().as_ptr() as usize);
    assert_eq!(gpio.destination, TARGET.register);
    assert_eq!(gpio.count, 2);
    assert_eq!(gpio.width, TransferWidth::Word);
    assert_eq!(gpio.mode, TransferMode::Circular);
    assert_eq!(gpio.priority, ChannelPriority::Normal);

    let reload = pair.timer_reload;
    assert_eq!(reload.source, buffer.slots().as_ptr() as usize);
    assert_eq!(reload.destination, RELOAD_REGISTER);
    assert_eq!(reload.count, 2 * 48 + 1);
    assert_eq!(reload.width, TransferWidth::HalfWord);
    assert_eq!(reload.mode, TransferMode::Once);
    assert_eq!(reload.priority, ChannelPriority::High);

    assert_eq!(gpio.trigger, TRIGGER);
    assert_eq!(reload.trigger, TRIGGER);
    assert!(reload.priority > gpio.priority);
}
