//! Recording fake of the hardware traits plus a simulated clock.
#![allow(dead_code, reason = "each test file uses a different part of the fake")]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use embassy_time::Instant;
use ws2812_dma::ws2812::{
    ChannelPriority, DrainClock, Drive, GpioLine, PinDescriptor, ReloadTimer, SENTINEL,
    SetResetTarget, TransferChannel, TransferDescriptor, TransferMode, TransferWidth,
    TriggerSource, Ws2812, Ws2812Config,
};

pub const GPIO_CTRL_BASE: usize = 0x4001_4004;
pub const RELOAD_REGISTER: usize = 0x4005_0010;
pub const TRIGGER: TriggerSource = TriggerSource(24);
pub const GPIO_CHANNEL: u8 = 0;
pub const RELOAD_CHANNEL: u8 = 1;

/// What a channel was configured with, minus the source address.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ChannelSetup {
    pub destination: usize,
    pub count: usize,
    pub width: TransferWidth,
    pub mode: TransferMode,
    pub priority: ChannelPriority,
    pub trigger: TriggerSource,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Event {
    Configure { line: u8, drive: Drive },
    Write { line: u8, high: bool },
    TimerInit(u16),
    TimerStart,
    ForceUpdate,
    TimerStop,
    PowerDown,
    ChannelConfigure(u8, ChannelSetup),
    ChannelEnable(u8),
    ChannelDisable(u8),
    ClearFlags(u8),
}

#[derive(Debug, Default)]
pub struct State {
    pub events: Vec<Event>,
    pub now_us: u64,
    pub step_us: u64,
    /// Values `live_reload` returns, one per read; the last one repeats.
    pub live_script: VecDeque<u16>,
    pub live_reads_at_us: Vec<u64>,
    pub armed_at_us: Option<u64>,
}

pub type Shared = Rc<RefCell<State>>;

pub fn shared(step_us: u64, live_script: &[u16]) -> Shared {
    Rc::new(RefCell::new(State {
        step_us,
        live_script: live_script.iter().copied().collect(),
        ..State::default()
    }))
}

pub struct FakeGpio(pub Shared);

impl GpioLine for FakeGpio {
    fn configure_output(&mut self, pin: &PinDescriptor, drive: Drive) {
        self.0.borrow_mut().events.push(Event::Configure {
            line: pin.line(),
            drive,
        });
    }

    fn write(&mut self, pin: &PinDescriptor, high: bool) {
        self.0.borrow_mut().events.push(Event::Write {
            line: pin.line(),
            high,
        });
    }

    fn set_reset_target(&self, pin: &PinDescriptor) -> SetResetTarget {
        SetResetTarget {
            register: GPIO_CTRL_BASE + 8 * usize::from(pin.line()),
            reset: 0x0000_3205,
            set: 0x0000_3305,
        }
    }
}

pub struct FakeTimer(pub Shared);

impl ReloadTimer for FakeTimer {
    fn init(&mut self, initial_reload: u16) {
        self.0
            .borrow_mut()
            .events
            .push(Event::TimerInit(initial_reload));
    }

    fn reload_register(&self) -> usize {
        RELOAD_REGISTER
    }

    fn trigger(&self) -> TriggerSource {
        TRIGGER
    }

    fn start(&mut self) {
        self.0.borrow_mut().events.push(Event::TimerStart);
    }

    fn force_update(&mut self) {
        self.0.borrow_mut().events.push(Event::ForceUpdate);
    }

    fn live_reload(&self) -> u16 {
        let mut state = self.0.borrow_mut();
        let now_us = state.now_us;
        state.live_reads_at_us.push(now_us);
        if state.live_script.len() > 1 {
            state.live_script.pop_front().unwrap_or(SENTINEL)
        } else {
            state.live_script.front().copied().unwrap_or(SENTINEL)
        }
    }

    fn stop(&mut self) {
        self.0.borrow_mut().events.push(Event::TimerStop);
    }

    fn power_down(&mut self) {
        self.0.borrow_mut().events.push(Event::PowerDown);
    }
}

pub struct FakeChannel {
    pub id: u8,
    pub shared: Shared,
}

impl TransferChannel for FakeChannel {
    fn configure(&mut self, descriptor: &TransferDescriptor<'_>) {
        let setup = ChannelSetup {
            destination: descriptor.destination,
            count: descriptor.count,
            width: descriptor.width,
            mode: descriptor.mode,
            priority: descriptor.priority,
            trigger: descriptor.trigger,
        };
        self.shared
            .borrow_mut()
            .events
            .push(Event::ChannelConfigure(self.id, setup));
    }

    fn enable(&mut self) {
        self.shared
            .borrow_mut()
            .events
            .push(Event::ChannelEnable(self.id));
    }

    fn disable(&mut self) {
        self.shared
            .borrow_mut()
            .events
            .push(Event::ChannelDisable(self.id));
    }

    fn clear_flags(&mut self) {
        self.shared
            .borrow_mut()
            .events
            .push(Event::ClearFlags(self.id));
    }
}

/// Advances by `step_us` on every reading.
pub struct FakeClock(pub Shared);

impl DrainClock for FakeClock {
    fn now(&self) -> Instant {
        let mut state = self.0.borrow_mut();
        state.now_us += state.step_us;
        // The force-update event is the last thing logged before arming reads the clock.
        if state.armed_at_us.is_none() && state.events.last() == Some(&Event::ForceUpdate) {
            state.armed_at_us = Some(state.now_us);
        }
        Instant::from_micros(state.now_us)
    }
}

pub type FakeWs2812 = Ws2812<FakeGpio, FakeTimer, FakeChannel, FakeClock>;

pub fn driver(shared: &Shared, config: Ws2812Config) -> FakeWs2812 {
    Ws2812::new(
        FakeGpio(Rc::clone(shared)),
        FakeTimer(Rc::clone(shared)),
        FakeChannel {
            id: GPIO_CHANNEL,
            shared: Rc::clone(shared),
        },
        FakeChannel {
            id: RELOAD_CHANNEL,
            shared: Rc::clone(shared),
        },
        FakeClock(Rc::clone(shared)),
        config,
    )
}

pub fn count(shared: &Shared, event: Event) -> usize {
    shared
        .borrow()
        .events
        .iter()
        .filter(|logged| **logged == event)
        .count()
}
