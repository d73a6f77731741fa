//! Animation buffers for the hourglass and matrix faces.
//!
//! Both buffers are reinitialized when a countdown starts or restarts and are
//! advanced once per rendered frame.

/// Sand particles in the hourglass.
pub const SAND_PARTICLES: usize = 48;
/// Particles drawn per row of sand.
pub const SAND_PER_ROW: u8 = 8;

pub const MATRIX_COLS: usize = 12;
pub const MATRIX_ROWS: usize = 10;
/// Drop heads travel a little past the bottom row before wrapping.
pub const MATRIX_DROP_SPAN: u8 = 15;

/// Hourglass sand split between the two bulbs.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct HourglassState {
    /// Row assignment of each particle in the top bulb.
    pub sand_top: [u8; SAND_PARTICLES],
    pub num_top: usize,
    pub num_bottom: usize,
}

impl HourglassState {
    /// All particles resting in the top bulb.
    #[must_use]
    pub fn new() -> Self {
        let mut sand_top = [0; SAND_PARTICLES];
        for (slot, index) in sand_top.iter_mut().zip(0u8..) {
            *slot = index / SAND_PER_ROW;
        }
        Self {
            sand_top,
            num_top: SAND_PARTICLES,
            num_bottom: 0,
        }
    }

    /// Drops sand proportional to elapsed time. Sand never flows back up.
    pub fn update(&mut self, remaining_seconds: u32, total_seconds: u32) {
        if total_seconds == 0 {
            return;
        }

        let elapsed = u64::from(total_seconds.saturating_sub(remaining_seconds));
        let target = elapsed * SAND_PARTICLES as u64 / u64::from(total_seconds);
        let target = usize::try_from(target).unwrap_or(SAND_PARTICLES).min(SAND_PARTICLES);

        if target > self.num_bottom && self.num_top > 0 {
            self.num_bottom = target;
            self.num_top = SAND_PARTICLES - target;
        }
    }
}

impl Default for HourglassState {
    fn default() -> Self {
        Self::new()
    }
}

/// Digit rain columns for the matrix face.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct MatrixState {
    /// Head row of each column's drop, in `0..MATRIX_DROP_SPAN`.
    pub drops: [u8; MATRIX_COLS],
    pub speeds: [u8; MATRIX_COLS],
    /// ASCII digits shown in each cell.
    pub chars: [[u8; MATRIX_ROWS]; MATRIX_COLS],
}

impl MatrixState {
    /// Seeds drop positions; the same seed always yields the same buffer.
    #[must_use]
    pub fn new(seed: u32) -> Self {
        let mut state = Self {
            drops: [0; MATRIX_COLS],
            speeds: [0; MATRIX_COLS],
            chars: [[b'0'; MATRIX_ROWS]; MATRIX_COLS],
        };

        let seed = u8::try_from(seed % 10).unwrap_or(0);
        for (col, c) in (0..MATRIX_COLS).zip(0u8..) {
            state.drops[col] = (c * 3 + seed) % 10;
            state.speeds[col] = 1 + c % 3;
            for (row, r) in (0..MATRIX_ROWS).zip(0u8..) {
                state.chars[col][row] = b'0' + (c + r * 7) % 10;
            }
        }
        state
    }

    /// Advances every drop and rewrites one digit per column.
    pub fn update(&mut self, remaining_seconds: u32) {
        let base = u8::try_from(remaining_seconds % 10).unwrap_or(0);
        for (col, c) in (0..MATRIX_COLS).zip(0u8..) {
            self.drops[col] = (self.drops[col] + self.speeds[col]) % MATRIX_DROP_SPAN;

            let churn = (base + c) % 10;
            self.chars[col][usize::from(churn)] = b'0' + churn;
        }
    }
}

impl Default for MatrixState {
    fn default() -> Self {
        Self::new(0)
    }
}

/// Both animation buffers, owned by the host next to the timer context.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct AnimationState {
    pub hourglass: HourglassState,
    pub matrix: MatrixState,
}

impl AnimationState {
    /// Advances both buffers for one rendered frame.
    pub fn advance(&mut self, remaining_seconds: u32, total_seconds: u32) {
        self.hourglass.update(remaining_seconds, total_seconds);
        self.matrix.update(remaining_seconds);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hourglass_starts_full_on_top() {
        let sand = HourglassState::new();
        assert_eq!(sand.num_top, SAND_PARTICLES);
        assert_eq!(sand.num_bottom, 0);
        assert_eq!(sand.sand_top[0], 0);
        assert_eq!(sand.sand_top[47], 5);
    }

    #[test]
    fn hourglass_moves_proportional_to_elapsed() {
        let mut sand = HourglassState::new();
        sand.update(30, 60);
        assert_eq!(sand.num_bottom, 24);
        assert_eq!(sand.num_top, 24);

        sand.update(0, 60);
        assert_eq!(sand.num_bottom, SAND_PARTICLES);
        assert_eq!(sand.num_top, 0);
    }

    #[test]
    fn hourglass_never_flows_back() {
        let mut sand = HourglassState::new();
        sand.update(10, 60);
        let settled = sand.num_bottom;
        sand.update(60, 60);
        assert_eq!(sand.num_bottom, settled);
        sand.update(10, 0);
        assert_eq!(sand.num_bottom, settled);
    }

    #[test]
    fn matrix_seed_positions_drops() {
        let rain = MatrixState::new(4);
        assert_eq!(rain.drops[0], 4);
        assert_eq!(rain.drops[2], 0);
        assert_eq!(rain.speeds[..4], [1, 2, 3, 1]);
        assert_eq!(rain.chars[1][1], b'8');
    }

    #[test]
    fn matrix_update_wraps_and_rewrites() {
        let mut rain = MatrixState::new(0);
        rain.drops[2] = 14;
        rain.update(25);
        assert_eq!(rain.drops[2], (14 + 3) % MATRIX_DROP_SPAN);
        assert_eq!(rain.drops[0], 1);
        // column 3: (25 + 3) % 10 == 8
        assert_eq!(rain.chars[3][8], b'8');
    }
}
