use crossterm::style::{Color as TermColor, Stylize};
use timer_core::display::animation::{MATRIX_COLS, MATRIX_ROWS};
use timer_core::display::{
    AnimationState, Color, DisplayContext, DisplayMode, ScreenText, TextTone,
};
use timer_core::time::{
    format_adaptive, format_hex, progress_blocks, progress_degrees, progress_ratio_fixed_point,
};
use timer_core::{TimerContext, TimerSettings};

const BLOCK_COLS: i32 = 12;
const BLOCK_ROWS: i32 = 8;
const GAUGE_WIDTH: i32 = 20;
const WATER_ROWS: i32 = 6;
const BINARY_BITS: u32 = 16;

/// Turns a timer frame into terminal lines.
#[derive(Clone, Copy, Debug)]
pub struct Renderer {
    plain: bool,
}

impl Renderer {
    pub fn new(plain: bool) -> Self {
        Self { plain }
    }

    pub fn frame(
        &self,
        ctx: &TimerContext,
        settings: &TimerSettings,
        animation: &AnimationState,
    ) -> Vec<String> {
        let view = DisplayContext::project(ctx, &settings.visualization_colors);
        let screen = ScreenText::for_context(ctx);
        let labels = ScreenText::shows_labels(ctx);
        let mut lines = Vec::new();

        if labels && !screen.title.is_empty() {
            lines.push(self.paint(screen.title, view.palette.secondary, view.palette.background));
        }

        let canvas = ctx.shows_canvas();
        if canvas {
            for line in face(&view, animation) {
                lines.push(self.paint_cells(&line, &view));
            }
        }
        if !canvas || view.shows_time_text() {
            let color = tone_color(screen.tone, &view);
            lines.push(self.paint(&screen.time, color, view.palette.background));
        }

        if labels {
            lines.extend(screen.hint.lines().map(str::to_owned));
        }
        lines
    }

    fn paint(&self, text: &str, fg: Color, bg: Color) -> String {
        if self.plain {
            text.to_owned()
        } else {
            text.with(term_color(fg)).on(term_color(bg)).to_string()
        }
    }

    /// Face lines use `#` for primary cells, `*` for accent, everything else
    /// in the secondary color.
    fn paint_cells(&self, line: &str, view: &DisplayContext) -> String {
        if self.plain {
            return line.to_owned();
        }
        line.chars()
            .map(|cell| {
                let fg = match cell {
                    '#' => view.palette.primary,
                    '*' => view.palette.accent,
                    _ => view.palette.secondary,
                };
                cell.with(term_color(fg))
                    .on(term_color(view.palette.background))
                    .to_string()
            })
            .collect()
    }
}

fn term_color(color: Color) -> TermColor {
    let (r, g, b) = color.rgb();
    TermColor::Rgb { r, g, b }
}

fn tone_color(tone: TextTone, view: &DisplayContext) -> Color {
    match tone {
        TextTone::Normal | TextTone::Running => view.palette.primary,
        TextTone::Low => Color::RED,
        TextTone::Paused => Color::YELLOW,
        TextTone::Completed => Color::GREEN,
    }
}

fn seconds(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

fn face(view: &DisplayContext, animation: &AnimationState) -> Vec<String> {
    let remaining = seconds(view.remaining_seconds);
    let total = seconds(view.total_seconds);

    match view.mode {
        DisplayMode::Text => Vec::new(),
        DisplayMode::Blocks => blocks(remaining, total),
        DisplayMode::VerticalBlocks => vertical_blocks(remaining, total),
        DisplayMode::Clock | DisplayMode::Radial => {
            vec![gauge(remaining, total), format!("{:>3} deg", progress_degrees(remaining, total))]
        }
        DisplayMode::Ring | DisplayMode::SpiralOut => vec![gauge(remaining, total)],
        DisplayMode::SpiralIn => vec![gauge(total.saturating_sub(remaining), total)],
        DisplayMode::Hourglass => hourglass(animation),
        DisplayMode::Binary => vec![binary(view.remaining_seconds)],
        DisplayMode::Hex => vec![format!("0x{}", format_hex(remaining))],
        DisplayMode::Matrix => matrix(animation),
        DisplayMode::WaterLevel => water(remaining, total),
        DisplayMode::PercentElapsed => {
            let elapsed = seconds(view.elapsed_seconds());
            vec![percent(progress_ratio_fixed_point(elapsed, total))]
        }
        DisplayMode::PercentRemaining => {
            vec![percent(progress_ratio_fixed_point(remaining, total))]
        }
    }
}

fn blocks(remaining: i32, total: i32) -> Vec<String> {
    let filled = progress_blocks(remaining, total, BLOCK_COLS * BLOCK_ROWS);
    (0..BLOCK_ROWS)
        .map(|row| {
            (0..BLOCK_COLS)
                .map(|col| {
                    // Empties from the top-left so the last block sits bottom-right.
                    let index = (BLOCK_ROWS - 1 - row) * BLOCK_COLS + (BLOCK_COLS - 1 - col);
                    if index < filled { '#' } else { '.' }
                })
                .collect()
        })
        .collect()
}

fn vertical_blocks(remaining: i32, total: i32) -> Vec<String> {
    let filled = progress_blocks(remaining, total, BLOCK_COLS * BLOCK_ROWS);
    (0..BLOCK_ROWS)
        .map(|row| {
            (0..BLOCK_COLS)
                .map(|col| {
                    let index = (BLOCK_COLS - 1 - col) * BLOCK_ROWS + (BLOCK_ROWS - 1 - row);
                    if index < filled { '#' } else { '.' }
                })
                .collect()
        })
        .collect()
}

fn gauge(remaining: i32, total: i32) -> String {
    let filled = progress_blocks(remaining, total, GAUGE_WIDTH);
    let bar: String = (0..GAUGE_WIDTH)
        .map(|cell| if cell < filled { '#' } else { '-' })
        .collect();
    format!("[{bar}]")
}

fn hourglass(animation: &AnimationState) -> Vec<String> {
    let sand = &animation.hourglass;
    let row = |count: usize| format!("|{:<8}|", "#".repeat(count.min(8)));
    let mut lines: Vec<String> = sand.sand_top[..sand.num_top]
        .chunks(8)
        .map(|chunk| row(chunk.len()))
        .collect();
    lines.push(" \\ * / ".to_owned());
    let rows = sand.num_bottom.div_ceil(8);
    lines.extend((0..rows).rev().map(|index| {
        let in_row = (sand.num_bottom - index * 8).min(8);
        row(in_row)
    }));
    lines
}

fn binary(remaining: u32) -> String {
    (0..BINARY_BITS)
        .rev()
        .map(|bit| if (remaining >> bit) & 1 == 1 { '#' } else { '.' })
        .collect()
}

fn matrix(animation: &AnimationState) -> Vec<String> {
    let rain = &animation.matrix;
    (0..MATRIX_ROWS)
        .map(|row| {
            (0..MATRIX_COLS)
                .map(|col| {
                    let head = usize::from(rain.drops[col]);
                    let digit = char::from(rain.chars[col][row]);
                    if row == head {
                        '*'
                    } else if row < head && head - row < 4 {
                        digit
                    } else {
                        ' '
                    }
                })
                .collect()
        })
        .collect()
}

fn water(remaining: i32, total: i32) -> Vec<String> {
    let level = progress_blocks(remaining, total, WATER_ROWS);
    (0..WATER_ROWS)
        .map(|row| {
            if WATER_ROWS - row <= level {
                "|############|".to_owned()
            } else {
                "|            |".to_owned()
            }
        })
        .collect()
}

fn percent(thousandths: i32) -> String {
    format!("{}.{}%", thousandths / 10, thousandths % 10)
}

/// Plain one-line summary used by `status`.
pub fn summary(ctx: &TimerContext) -> String {
    format!(
        "{} {} / {} mode={} hide={}",
        ctx.state,
        format_adaptive(seconds(ctx.remaining_seconds)),
        format_adaptive(seconds(ctx.total_seconds)),
        ctx.display_mode,
        ctx.hide_time_text
    )
}
