use std::fs::{self, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::ops::Add;
use std::path::Path;
use std::time::Duration;

use timer_core::console::catalog::help_text;
use timer_core::console::{ConsoleCommand, ConsoleError, parse};
use timer_core::executor::EffectExecutor;
use timer_core::haptics::{HapticDriver, Pulse, VibrationConfig};
use timer_core::settings::{PersistError, load_settings, save_settings};
use timer_core::time::format_preset;
use timer_core::{DisplayMode, Input, TimerContext, TimerSettings};

use crate::render::{Renderer, summary};
use crate::store::FileStore;

const TICK: Duration = Duration::from_secs(1);

/// Simulated monotonic clock, advanced only by `tick`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Ord, PartialOrd)]
pub struct SimInstant(Duration);

impl Add<Duration> for SimInstant {
    type Output = SimInstant;

    fn add(self, rhs: Duration) -> Self::Output {
        SimInstant(self.0 + rhs)
    }
}

/// Haptic driver that reports motor activity as console lines.
#[derive(Debug, Default)]
struct ConsoleHaptics {
    events: Vec<String>,
}

impl HapticDriver for ConsoleHaptics {
    fn pulse(&mut self, pulse: Pulse) {
        let length = VibrationConfig::default().pulse_length(pulse);
        self.events
            .push(format!("~ buzz {pulse:?} ({} ms)", length.as_millis()));
    }

    fn cancel(&mut self) {
        self.events.push("~ motor off".to_owned());
    }
}

pub struct Session {
    ctx: TimerContext,
    settings: TimerSettings,
    executor: EffectExecutor<SimInstant>,
    haptics: ConsoleHaptics,
    store: FileStore,
    renderer: Renderer,
    transcript: Option<TranscriptLogger>,
    now: SimInstant,
    closed: bool,
}

impl Session {
    pub fn new(
        mut store: FileStore,
        renderer: Renderer,
        transcript: Option<TranscriptLogger>,
    ) -> io::Result<Self> {
        let settings = load_settings(&mut store).map_err(store_error)?;
        let mut ctx = TimerContext::new();
        settings.apply_to_context(&mut ctx);

        Ok(Self {
            ctx,
            settings,
            executor: EffectExecutor::new(VibrationConfig::default().repeat_interval),
            haptics: ConsoleHaptics::default(),
            store,
            renderer,
            transcript,
            now: SimInstant::default(),
            closed: false,
        })
    }

    /// Whether the timer screen has been closed.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Renders the current frame, consuming any pending redraw.
    pub fn frame(&mut self) -> Vec<String> {
        let _ = self.executor.take_redraw(&self.ctx);
        self.renderer
            .frame(&self.ctx, &self.settings, self.executor.animation())
    }

    pub fn handle_command(&mut self, line: &str) -> io::Result<Vec<String>> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(Vec::new());
        }
        self.record(TranscriptRole::Host, &[trimmed.to_owned()])?;

        let lines = match parse(trimmed) {
            Ok(command) => self.execute(command)?,
            Err(ConsoleError::Empty) => Vec::new(),
            Err(err) => vec![format!("ERR {err}")],
        };
        self.record(TranscriptRole::Emulator, &lines)?;
        Ok(lines)
    }

    fn execute(&mut self, command: ConsoleCommand<'_>) -> io::Result<Vec<String>> {
        match command {
            ConsoleCommand::Input(input) => self.press(input),
            ConsoleCommand::Tick(count) => Ok(self.advance(count)),
            ConsoleCommand::Status => Ok(self.status()),
            ConsoleCommand::Modes => Ok(self.modes()),
            ConsoleCommand::SetMode { mode, enabled } => self.set_mode(mode, enabled),
            ConsoleCommand::Default => {
                self.settings.remember_selection(&self.ctx);
                self.save()?;
                Ok(vec![format!(
                    "default duration: {}",
                    format_preset(self.ctx.selected_preset)
                )])
            }
            ConsoleCommand::Save => {
                self.settings.update_from_context(&self.ctx);
                self.save()?;
                Ok(vec!["settings saved".to_owned()])
            }
            ConsoleCommand::Help { topic } => Ok(help_text(topic)),
        }
    }

    fn press(&mut self, input: Input) -> io::Result<Vec<String>> {
        if self.closed {
            return Ok(vec!["timer closed; restart the emulator".to_owned()]);
        }
        let _ = self
            .executor
            .dispatch(&mut self.ctx, input, self.now, &mut self.haptics);
        self.collect_output()
    }

    fn advance(&mut self, count: u32) -> Vec<String> {
        let mut redrawn = false;
        for _ in 0..count {
            self.now = SimInstant(self.now.0 + TICK);
            let _ = self.executor.poll_vibration(self.now, &mut self.haptics);
            if self.executor.tick_subscribed() {
                let _ = self.executor.dispatch(
                    &mut self.ctx,
                    Input::Tick,
                    self.now,
                    &mut self.haptics,
                );
            }
            // Intermediate frames are not printed but still advance animations.
            redrawn |= self.executor.take_redraw(&self.ctx);
        }

        let mut lines = std::mem::take(&mut self.haptics.events);
        if redrawn {
            lines.extend(
                self.renderer
                    .frame(&self.ctx, &self.settings, self.executor.animation()),
            );
        }
        lines
    }

    fn collect_output(&mut self) -> io::Result<Vec<String>> {
        let mut lines = std::mem::take(&mut self.haptics.events);
        if self.executor.take_exit() {
            self.close()?;
            lines.push("timer closed".to_owned());
            return Ok(lines);
        }
        if self.executor.take_redraw(&self.ctx) {
            lines.extend(
                self.renderer
                    .frame(&self.ctx, &self.settings, self.executor.animation()),
            );
        }
        Ok(lines)
    }

    /// Stops the executor and saves the display preferences.
    pub fn close(&mut self) -> io::Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.executor.shutdown(&mut self.haptics);
        self.settings.update_from_context(&self.ctx);
        self.save()
    }

    fn save(&mut self) -> io::Result<()> {
        save_settings(&mut self.store, &mut self.settings).map_err(store_error)
    }

    fn status(&self) -> Vec<String> {
        let ctx = &self.ctx;
        vec![
            summary(ctx),
            format!(
                "preset={} custom={}h{:02}m",
                format_preset(ctx.selected_preset),
                ctx.custom_hours,
                ctx.custom_minutes
            ),
            format!(
                "ticking={} vibrating={} clock={}s",
                self.executor.tick_subscribed(),
                self.executor.vibrating(),
                self.now.0.as_secs()
            ),
        ]
    }

    fn modes(&self) -> Vec<String> {
        DisplayMode::ALL
            .iter()
            .map(|mode| {
                let enabled = if self.ctx.is_mode_enabled(*mode) { 'x' } else { ' ' };
                let current = if *mode == self.ctx.display_mode { '*' } else { ' ' };
                format!("{:>2} [{enabled}]{current}{}", mode.index(), mode)
            })
            .collect()
    }

    fn set_mode(&mut self, mode: DisplayMode, enabled: bool) -> io::Result<Vec<String>> {
        self.settings.set_mode_enabled(mode, enabled);
        self.settings.validate();
        self.ctx.display_mode_enabled = self.settings.visualization_enabled;
        self.save()?;

        let state = if self.ctx.is_mode_enabled(mode) {
            "enabled"
        } else {
            "disabled"
        };
        Ok(vec![format!("{mode} {state}")])
    }

    fn record(&mut self, role: TranscriptRole, lines: &[String]) -> io::Result<()> {
        let Some(transcript) = self.transcript.as_mut() else {
            return Ok(());
        };
        for line in lines {
            transcript.append_line(self.now.0, role, line)?;
        }
        Ok(())
    }
}

fn store_error(err: PersistError<io::Error>) -> io::Error {
    let PersistError::Store(err) = err;
    err
}

pub struct TranscriptLogger {
    writer: BufWriter<std::fs::File>,
}

impl TranscriptLogger {
    pub fn create(path: &Path) -> io::Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)?;

        let mut logger = Self {
            writer: BufWriter::new(file),
        };
        logger.write_header()?;
        Ok(logger)
    }

    fn write_header(&mut self) -> io::Result<()> {
        writeln!(self.writer, "# Countdown timer emulator transcript")?;
        writeln!(self.writer, "# Timestamps are simulated seconds")?;
        writeln!(self.writer)?;
        self.writer.flush()
    }

    fn append_line(
        &mut self,
        clock: Duration,
        role: TranscriptRole,
        line: &str,
    ) -> io::Result<()> {
        writeln!(
            self.writer,
            "[+{:>6} s] {} {}",
            clock.as_secs(),
            role.prefix(),
            line
        )?;
        self.writer.flush()
    }
}

#[derive(Clone, Copy, Debug)]
enum TranscriptRole {
    Host,
    Emulator,
}

impl TranscriptRole {
    fn prefix(self) -> &'static str {
        match self {
            TranscriptRole::Host => "HOST>",
            TranscriptRole::Emulator => "EMU <",
        }
    }
}
