use cortex_m::interrupt;
use cortex_m::register::primask;
use critical_section::{self, RawRestoreState};
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_stm32 as hal;
use embassy_stm32::exti::ExtiInput;
use embassy_stm32::gpio::{Level, Output, Pull, Speed};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, Sender};
use timer_core::haptics::VibrationConfig;
use timer_core::input::LongPressConfig;
use timer_core::{Button, Input};

use crate::hw::VibrationMotor;

mod button_task;
mod controller_task;

critical_section::set_impl!(InterruptCriticalSection);

struct InterruptCriticalSection;

unsafe impl critical_section::Impl for InterruptCriticalSection {
    unsafe fn acquire() -> RawRestoreState {
        let primask = primask::read();
        interrupt::disable();
        primask.is_active()
    }

    unsafe fn release(restore_state: RawRestoreState) {
        if restore_state {
            unsafe {
                interrupt::enable();
            }
        }
    }
}

pub(super) const INPUT_QUEUE_DEPTH: usize = 8;

pub(super) type InputQueue = Channel<CriticalSectionRawMutex, Input, INPUT_QUEUE_DEPTH>;
pub(super) type InputSender = Sender<'static, CriticalSectionRawMutex, Input, INPUT_QUEUE_DEPTH>;

pub(super) static INPUT_QUEUE: InputQueue = Channel::new();

const LONG_PRESS: LongPressConfig = LongPressConfig::new(
    LongPressConfig::DEFAULT_THRESHOLD,
    LongPressConfig::DEFAULT_DEBOUNCE,
);

#[embassy_executor::main]
pub async fn main(spawner: Spawner) {
    let config = hal::Config::default();
    let hal::Peripherals {
        PA0,
        PA1,
        PA6,
        PA7,
        PB3,
        EXTI0,
        EXTI1,
        EXTI6,
        EXTI7,
        ..
    } = hal::init(config);

    let buttons = [
        (Button::Select, ExtiInput::new(PA0, EXTI0, Pull::Up)),
        (Button::Up, ExtiInput::new(PA1, EXTI1, Pull::Up)),
        (Button::Down, ExtiInput::new(PA6, EXTI6, Pull::Up)),
        (Button::Back, ExtiInput::new(PA7, EXTI7, Pull::Up)),
    ];
    for (button, pin) in buttons {
        spawner
            .spawn(button_task::run(button, pin, INPUT_QUEUE.sender(), LONG_PRESS))
            .expect("failed to spawn button task");
    }

    let vibration = VibrationConfig::default();
    let motor = VibrationMotor::new(Output::new(PB3, Level::Low, Speed::Low), vibration);
    spawner
        .spawn(controller_task::run(motor, vibration))
        .expect("failed to spawn controller task");

    defmt::info!("countdown timer ready");
    core::future::pending::<()>().await;
}
