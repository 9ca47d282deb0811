//! Raspberry Pi Pico wiring
//!
//! ```txt
//! GPIO15  <- encoder push button (to ground, pulled up)
//! GPIO16  -- SPI0 RX (unused by the registers)
//! GPIO17  -> RCK, register latch
//! GPIO18  -> SRCK, SPI0 clock
//! GPIO19  -> SER IN, SPI0 TX
//! GPIO20  <- encoder channel A
//! GPIO21  <- encoder channel B
//! ```

use cortex_m::delay::Delay;
use cortex_m::peripheral::SYST;
use nixie_clock::display::DEFAULT_LATCH_PULSE_US;
use nixie_clock::{NixieDisplay, RotaryEncoder, TickSource};
use rp_pico::hal::{
    self,
    clocks::{init_clocks_and_plls, Clock},
    fugit::{MicrosDurationU64, RateExtU32},
    gpio::{
        bank0::{Gpio15, Gpio16, Gpio17, Gpio18, Gpio19, Gpio20, Gpio21},
        FunctionSio, FunctionSpi, Pin, PullDown, PullUp, SioInput, SioOutput,
    },
    pac,
    sio::Sio,
    spi::Spi,
    timer::{Alarm, Alarm0, Alarm1, Instant, Timer},
    watchdog::Watchdog,
};

pub const XTAL_FREQ_HZ: u32 = 12_000_000;
pub const SPI_BAUD_HZ: u32 = 1_000_000;
pub const TICK_PERIOD_US: u64 = 1_000_000;
/// Time the button is ignored for after a press (µs)
pub const BUTTON_LOCKOUT_US: u32 = 50_000;
pub const LATCH_PULSE_US: u32 = DEFAULT_LATCH_PULSE_US;

const TICK_PERIOD: MicrosDurationU64 = MicrosDurationU64::micros(TICK_PERIOD_US);

pub type Spi0 = Spi<
    hal::spi::Enabled,
    pac::SPI0,
    (
        Pin<Gpio19, FunctionSpi, PullDown>,
        Pin<Gpio16, FunctionSpi, PullDown>,
        Pin<Gpio18, FunctionSpi, PullDown>,
    ),
>;
pub type LatchPin = Pin<Gpio17, FunctionSio<SioOutput>, PullDown>;
pub type ChannelA = Pin<Gpio20, FunctionSio<SioInput>, PullUp>;
pub type ChannelB = Pin<Gpio21, FunctionSio<SioInput>, PullUp>;
pub type ModeButton = Pin<Gpio15, FunctionSio<SioInput>, PullUp>;

pub type Display = NixieDisplay<Spi0, LatchPin, Delay>;
pub type Encoder = RotaryEncoder<ChannelA, ChannelB>;

/// One second tick on timer alarm 0.
///
/// Deadlines are kept as absolute timer values so the time spent in the interrupt handler
/// never stretches a second.
pub struct SecondTimer {
    timer: Timer,
    alarm: Alarm0,
    deadline: Instant,
}

impl SecondTimer {
    pub fn new(timer: Timer, alarm: Alarm0) -> Self {
        let deadline = timer.get_counter();

        Self {
            timer,
            alarm,
            deadline,
        }
    }

    fn schedule(&mut self) {
        if self.alarm.schedule_at(self.deadline).is_err() {
            defmt::warn!("tick deadline {} missed", self.deadline.ticks());
        }
    }
}

impl TickSource for SecondTimer {
    fn arm(&mut self) {
        self.alarm.clear_interrupt();
        self.deadline = self.timer.get_counter() + TICK_PERIOD;
        self.schedule();
        self.alarm.enable_interrupt();
    }

    fn disarm(&mut self) {
        self.alarm.disable_interrupt();
        self.alarm.clear_interrupt();
    }

    fn acknowledge(&mut self) {
        self.alarm.clear_interrupt();
        self.deadline += TICK_PERIOD;
        self.schedule();
    }
}

/// Everything the application needs, configured and idle
pub struct Board {
    pub display: Display,
    pub encoder: Encoder,
    pub button: ModeButton,
    pub tick: SecondTimer,
    pub lockout: Alarm1,
}

/// Bring up clocks, pins and peripherals. The tick is left disarmed.
pub fn setup(mut pac: pac::Peripherals, syst: SYST) -> Board {
    let mut watchdog = Watchdog::new(pac.WATCHDOG);
    let sio = Sio::new(pac.SIO);

    let clocks = defmt::unwrap!(init_clocks_and_plls(
        XTAL_FREQ_HZ,
        pac.XOSC,
        pac.CLOCKS,
        pac.PLL_SYS,
        pac.PLL_USB,
        &mut pac.RESETS,
        &mut watchdog,
    )
    .ok());

    let mut timer = Timer::new(pac.TIMER, &mut pac.RESETS, &clocks);
    let alarm = defmt::unwrap!(timer.alarm_0());
    let mut lockout = defmt::unwrap!(timer.alarm_1());
    lockout.enable_interrupt();

    let pins = rp_pico::Pins::new(
        pac.IO_BANK0,
        pac.PADS_BANK0,
        sio.gpio_bank0,
        &mut pac.RESETS,
    );

    let button = pins.gpio15.into_pull_up_input();
    button.set_interrupt_enabled(hal::gpio::Interrupt::EdgeLow, true);

    let encoder = defmt::unwrap!(RotaryEncoder::new(
        pins.gpio20.into_pull_up_input(),
        pins.gpio21.into_pull_up_input(),
    ));

    let mosi = pins.gpio19.into_function::<FunctionSpi>();
    let miso = pins.gpio16.into_function::<FunctionSpi>();
    let sck = pins.gpio18.into_function::<FunctionSpi>();
    let latch = pins.gpio17.into_push_pull_output();

    let spi = Spi::<_, _, _, 8>::new(pac.SPI0, (mosi, miso, sck));
    let spi = spi.init(
        &mut pac.RESETS,
        clocks.peripheral_clock.freq(),
        SPI_BAUD_HZ.Hz(),
        &embedded_hal::spi::MODE_0,
    );

    let delay = Delay::new(syst, clocks.system_clock.freq().to_Hz());
    let display = defmt::unwrap!(NixieDisplay::new(spi, latch, delay, LATCH_PULSE_US));

    Board {
        display,
        encoder,
        button,
        tick: SecondTimer::new(timer, alarm),
        lockout,
    }
}
