use embassy_futures::select::{Either3, select3};
use embassy_time::{Duration, Instant, Ticker, Timer};
use timer_core::Input;
use timer_core::haptics::VibrationConfig;
use timer_core::settings::MemoryStore;

use super::INPUT_QUEUE;
use crate::controller::{Controller, Step};
use crate::hw::VibrationMotor;
use crate::instant::FirmwareInstant;

const TICK_PERIOD: Duration = Duration::from_secs(1);

#[embassy_executor::task]
pub async fn run(motor: VibrationMotor<'static>, vibration: VibrationConfig) -> ! {
    // Settings live in RAM; flash storage is not implemented, so they reset on power loss.
    let store = MemoryStore::new();
    let mut controller = Controller::new(motor, store, vibration);
    let receiver = INPUT_QUEUE.receiver();
    let mut ticker = Ticker::every(TICK_PERIOD);
    let mut ticking = false;

    loop {
        if controller.ticking() != ticking {
            ticking = controller.ticking();
            // The first tick lands one full period after the subscription.
            ticker.reset();
        }

        let deadline = next_deadline(&controller);
        let event = select3(
            receiver.receive(),
            async {
                if ticking {
                    ticker.next().await;
                } else {
                    core::future::pending::<()>().await;
                }
            },
            async {
                match deadline {
                    Some(at) => Timer::at(at).await,
                    None => core::future::pending::<()>().await,
                }
            },
        )
        .await;

        let now = FirmwareInstant::from(Instant::now());
        let step = match event {
            Either3::First(input) => controller.handle(input, now),
            Either3::Second(()) => controller.handle(Input::Tick, now),
            Either3::Third(()) => {
                controller.haptics_mut().service(now.into_embassy());
                controller.poll_vibration(now);
                Step::Continue
            }
        };

        if controller.take_redraw() {
            let ctx = controller.context();
            defmt::debug!(
                "redraw {} {}/{}s",
                ctx.state.as_str(),
                ctx.remaining_seconds,
                ctx.total_seconds
            );
        }

        if step == Step::Exit {
            defmt::info!("timer closed; waiting for the next press to reopen");
            // Any button brings the timer back on the selection screen.
            let _ = receiver.receive().await;
            controller.reopen();
        }
    }
}

fn next_deadline(controller: &Controller<VibrationMotor<'static>, MemoryStore>) -> Option<Instant> {
    let pulse = controller.next_pulse_at().map(FirmwareInstant::into_embassy);
    let motor_off = controller.haptics().off_at();
    match (pulse, motor_off) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    }
}
