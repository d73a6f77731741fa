use timer_core::{Button, Effects, Input, TimerContext, TimerState};

const NONE: Effects = Effects::none();

const REDRAW: Effects = Effects {
    update_display: true,
    ..Effects::none()
};

const START: Effects = Effects {
    update_display: true,
    subscribe_tick: true,
    init_hourglass: true,
    init_matrix: true,
    ..Effects::none()
};

const RESTART: Effects = Effects {
    update_display: true,
    init_hourglass: true,
    init_matrix: true,
    ..Effects::none()
};

const RESTART_COMPLETED: Effects = Effects {
    stop_vibration: true,
    ..RESTART
};

const FEEDBACK: Effects = Effects {
    update_display: true,
    vibrate_short: true,
    ..Effects::none()
};

const DISMISS: Effects = Effects {
    update_display: true,
    unsubscribe_tick: true,
    stop_vibration: true,
    ..Effects::none()
};

const EXIT: Effects = Effects {
    update_display: true,
    unsubscribe_tick: true,
    pop_window: true,
    ..Effects::none()
};

const POP: Effects = Effects {
    pop_window: true,
    ..Effects::none()
};

fn context_in(state: TimerState) -> TimerContext {
    let mut ctx = TimerContext::new();
    ctx.state = state;
    ctx.total_seconds = 120;
    ctx.remaining_seconds = if state == TimerState::Completed { 0 } else { 60 };
    ctx.custom_hours = 1;
    ctx.custom_minutes = 30;
    ctx
}

struct Row {
    state: TimerState,
    input: Input,
    next: TimerState,
    effects: Effects,
}

const fn row(state: TimerState, input: Input, next: TimerState, effects: Effects) -> Row {
    Row {
        state,
        input,
        next,
        effects,
    }
}

const SELECT: Input = Input::Press(Button::Select);
const SELECT_LONG: Input = Input::LongPress(Button::Select);
const UP: Input = Input::Press(Button::Up);
const UP_LONG: Input = Input::LongPress(Button::Up);
const DOWN: Input = Input::Press(Button::Down);
const BACK: Input = Input::Press(Button::Back);

#[test]
fn every_state_and_button_matches_dispatch_table() {
    use TimerState::{
        Completed, ConfirmExit, Paused, Running, SelectPreset, SetCustomHours, SetCustomMinutes,
    };

    let table = [
        row(SelectPreset, SELECT, Running, START),
        row(SelectPreset, SELECT_LONG, SelectPreset, FEEDBACK),
        row(SelectPreset, UP, SelectPreset, REDRAW),
        row(SelectPreset, UP_LONG, SelectPreset, NONE),
        row(SelectPreset, DOWN, SelectPreset, REDRAW),
        row(SelectPreset, BACK, SelectPreset, POP),
        row(SetCustomHours, SELECT, SetCustomMinutes, REDRAW),
        row(SetCustomHours, SELECT_LONG, SetCustomHours, NONE),
        row(SetCustomHours, UP, SetCustomHours, REDRAW),
        row(SetCustomHours, UP_LONG, SetCustomHours, NONE),
        row(SetCustomHours, DOWN, SetCustomHours, REDRAW),
        row(SetCustomHours, BACK, SelectPreset, REDRAW),
        row(SetCustomMinutes, SELECT, Running, START),
        row(SetCustomMinutes, SELECT_LONG, SetCustomMinutes, NONE),
        row(SetCustomMinutes, UP, SetCustomMinutes, REDRAW),
        row(SetCustomMinutes, UP_LONG, SetCustomMinutes, NONE),
        row(SetCustomMinutes, DOWN, SetCustomMinutes, REDRAW),
        row(SetCustomMinutes, BACK, SelectPreset, REDRAW),
        row(Running, SELECT, Running, NONE),
        row(Running, SELECT_LONG, Running, FEEDBACK),
        row(Running, UP, Running, NONE),
        row(Running, UP_LONG, Running, FEEDBACK),
        row(Running, DOWN, Paused, REDRAW),
        row(Running, BACK, ConfirmExit, REDRAW),
        row(Paused, SELECT, Paused, NONE),
        row(Paused, SELECT_LONG, Paused, FEEDBACK),
        row(Paused, UP, Running, RESTART),
        row(Paused, UP_LONG, Paused, FEEDBACK),
        row(Paused, DOWN, Running, REDRAW),
        row(Paused, BACK, ConfirmExit, REDRAW),
        row(Completed, SELECT, Running, RESTART_COMPLETED),
        row(Completed, SELECT_LONG, Completed, NONE),
        row(Completed, UP, Running, RESTART_COMPLETED),
        row(Completed, UP_LONG, Completed, NONE),
        row(Completed, DOWN, SelectPreset, DISMISS),
        row(Completed, BACK, SelectPreset, DISMISS),
        row(ConfirmExit, SELECT, ConfirmExit, NONE),
        row(ConfirmExit, SELECT_LONG, ConfirmExit, NONE),
        row(ConfirmExit, UP, SelectPreset, EXIT),
        row(ConfirmExit, UP_LONG, ConfirmExit, NONE),
        row(ConfirmExit, DOWN, Paused, REDRAW),
        row(ConfirmExit, BACK, Paused, REDRAW),
    ];
    assert_eq!(table.len(), TimerState::ALL.len() * 6);

    for row in &table {
        let mut ctx = context_in(row.state);
        let before = ctx;
        let effects = ctx.handle(row.input);

        assert_eq!(
            effects, row.effects,
            "{} + {} produced unexpected effects",
            row.state, row.input
        );
        assert_eq!(ctx.state, row.next, "{} + {}", row.state, row.input);
        if effects.is_none() {
            assert_eq!(ctx, before, "{} + {} mutated on no-op", row.state, row.input);
        }
        assert!(ctx.remaining_seconds <= ctx.total_seconds);
    }
}

#[test]
fn long_presses_without_meaning_are_ignored_everywhere() {
    for state in TimerState::ALL {
        for button in [Button::Down, Button::Back] {
            let mut ctx = context_in(state);
            assert!(ctx.handle(Input::LongPress(button)).is_none());
        }
    }
}

#[test]
fn preset_selection_wraps_over_custom_slot() {
    let mut ctx = TimerContext::new();
    let _ = ctx.handle(UP);
    assert_eq!(ctx.selected_preset, 4);
    let _ = ctx.handle(DOWN);
    assert_eq!(ctx.selected_preset, 0);

    for _ in 0..4 {
        let _ = ctx.handle(DOWN);
    }
    let _ = ctx.handle(SELECT);
    assert_eq!(ctx.state, TimerState::SetCustomHours);
}

#[test]
fn custom_entry_wraps_hours_and_minutes() {
    let mut ctx = TimerContext::new();
    ctx.state = TimerState::SetCustomHours;
    let _ = ctx.handle(DOWN);
    assert_eq!(ctx.custom_hours, 23);
    let _ = ctx.handle(UP);
    assert_eq!(ctx.custom_hours, 0);

    ctx.state = TimerState::SetCustomMinutes;
    ctx.custom_minutes = 59;
    let _ = ctx.handle(UP);
    assert_eq!(ctx.custom_minutes, 0);
    let _ = ctx.handle(DOWN);
    assert_eq!(ctx.custom_minutes, 59);
}

#[test]
fn back_from_running_pauses_before_confirming() {
    let mut ctx = TimerContext::new();
    let _ = ctx.handle(SELECT);
    let _ = ctx.handle(Input::Tick);
    let _ = ctx.handle(BACK);
    assert_eq!(ctx.state, TimerState::ConfirmExit);

    // Ticks stay subscribed but do not count down while confirming.
    assert!(ctx.handle(Input::Tick).is_none());
    let _ = ctx.handle(DOWN);
    assert_eq!(ctx.state, TimerState::Paused);
    assert_eq!(ctx.remaining_seconds, 299);
}
