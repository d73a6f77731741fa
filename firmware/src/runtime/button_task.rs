use embassy_futures::select::{Either, select};
use embassy_stm32::exti::ExtiInput;
use embassy_time::{Instant, Timer};
use timer_core::Button;
use timer_core::input::LongPressConfig;

use super::InputSender;
use crate::instant::core_duration_to_embassy;

/// Watches one active-low button and reports presses to the controller.
///
/// A long press is reported as soon as the threshold passes, while the button
/// is still held; the release that follows is swallowed.
#[embassy_executor::task(pool_size = 4)]
pub async fn run(
    button: Button,
    mut pin: ExtiInput<'static>,
    sender: InputSender,
    config: LongPressConfig,
) -> ! {
    let debounce = core_duration_to_embassy(config.debounce);
    let threshold = core_duration_to_embassy(config.threshold);

    loop {
        pin.wait_for_falling_edge().await;
        let pressed_at = Instant::now();

        Timer::after(debounce).await;
        if pin.is_high() {
            continue;
        }

        let released = pin.wait_for_rising_edge();
        let held = match select(released, Timer::at(pressed_at + threshold)).await {
            Either::First(()) => pressed_at.elapsed(),
            Either::Second(()) => threshold,
        };
        let held = core::time::Duration::from_micros(held.as_micros());

        if let Some(input) = config.input_for(button, held) {
            defmt::debug!("{} held {} ms", button.as_str(), held.as_millis());
            sender.send(input).await;
        }

        if pin.is_low() {
            pin.wait_for_rising_edge().await;
        }
    }
}
