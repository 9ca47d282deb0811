#![no_std]
#![no_main]

use defmt_rtt as _; // global logger
use panic_probe as _; // panic handler

mod board;

#[rtic::app(device = rp_pico::hal::pac, peripherals = true)]
mod app {
    use crate::board::{self, ChannelA, ChannelB, Display, ModeButton, SecondTimer, BUTTON_LOCKOUT_US};
    use embedded_hal::digital::v2::InputPin;
    use nixie_clock::controller::{on_press, on_tick, power_up};
    use nixie_clock::{ClockState, ModeController, TickSource};
    use rp_pico::hal::{
        fugit::ExtU32,
        gpio::Interrupt::EdgeLow,
        timer::{Alarm, Alarm1},
    };

    // Shared resources (accessed by multiple tasks)
    #[shared]
    struct Shared {
        clock: ClockState,
        display: Display,
        tick: SecondTimer,
        button: ModeButton,
        lockout: Alarm1,
    }

    // Local resources (accessed by single tasks)
    #[local]
    struct Local {
        controller: ModeController<ChannelA, ChannelB>,
    }

    #[init]
    fn init(ctx: init::Context) -> (Shared, Local, init::Monotonics) {
        defmt::info!("init");

        let board::Board {
            mut display,
            encoder,
            button,
            mut tick,
            lockout,
        } = board::setup(ctx.device, ctx.core.SYST);

        let clock = ClockState::default();

        // Clear whatever the registers powered up with and show 12:00:00
        if let Err(e) = power_up(&clock, &mut display) {
            defmt::error!("power up display failed: {}", e);
        }

        tick.arm();

        (
            Shared {
                clock,
                display,
                tick,
                button,
                lockout,
            },
            Local {
                controller: ModeController::new(encoder),
            },
            init::Monotonics(),
        )
    }

    // Main loop: keeps the next frame loaded, or applies encoder edits
    #[idle(shared = [clock, display], local = [controller])]
    fn idle(mut ctx: idle::Context) -> ! {
        defmt::info!("idle");

        loop {
            if let Err(e) = ctx
                .local
                .controller
                .service(&mut ctx.shared.clock, &mut ctx.shared.display)
            {
                defmt::error!("display update failed: {}", e);
            }
        }
    }

    // Hardware Task: Timer Interrupt (1Hz)
    #[task(binds = TIMER_IRQ_0, priority = 1, shared = [clock, display, tick])]
    fn timer_tick(mut ctx: timer_tick::Context) {
        if let Err(e) = on_tick(
            &mut ctx.shared.tick,
            &mut ctx.shared.clock,
            &mut ctx.shared.display,
        ) {
            defmt::error!("latch failed: {}", e);
        }
    }

    // Hardware Task: GPIO Interrupt (Button Press)
    #[task(binds = IO_IRQ_BANK0, priority = 1, shared = [clock, tick, button, lockout])]
    fn button_press(mut ctx: button_press::Context) {
        // Ignore the button until it has settled and been released
        ctx.shared.button.lock(|b| {
            b.set_interrupt_enabled(EdgeLow, false);
            b.clear_interrupt(EdgeLow);
        });

        let mode = on_press(&mut ctx.shared.tick, &mut ctx.shared.clock);
        defmt::info!("mode: {}", mode);

        ctx.shared.lockout.lock(|a| {
            a.clear_interrupt();
            if a.schedule(BUTTON_LOCKOUT_US.micros()).is_err() {
                defmt::warn!("button lockout not scheduled");
            }
        });
    }

    // Hardware Task: Button lockout expired (Timer 1)
    #[task(binds = TIMER_IRQ_1, priority = 1, shared = [button, lockout])]
    fn button_release(mut ctx: button_release::Context) {
        ctx.shared.lockout.lock(|a| a.clear_interrupt());

        let is_held = ctx.shared.button.lock(|b| b.is_low().unwrap_or(false));

        if is_held {
            // Still down, check again later
            ctx.shared.lockout.lock(|a| {
                a.schedule(BUTTON_LOCKOUT_US.micros()).ok();
            });
        } else {
            ctx.shared.button.lock(|b| {
                // Clear any edges latched while bouncing
                b.clear_interrupt(EdgeLow);
                b.set_interrupt_enabled(EdgeLow, true);
            });
        }
    }
}
