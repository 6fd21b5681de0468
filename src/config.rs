//! Tracker configuration.

/// How many counts one detent of the knob produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepMode {
    /// Every valid transition counts. Four counts per detent on most knobs.
    Quarter,
    /// One count per detent. Expects the knob to rest in `11`, i.e. pull-ups
    /// and contacts open at the detent.
    Full,
}

impl Default for StepMode {
    fn default() -> Self {
        StepMode::Quarter
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub mode: StepMode,

    /// Flip the sign of every step. Same as swapping the A and B wires.
    pub reversed: bool,
}

impl Config {
    pub fn full() -> Self {
        Config {
            mode: StepMode::Full,
            ..Default::default()
        }
    }

    pub fn reversed(mut self) -> Self {
        self.reversed = !self.reversed;
        self
    }
}
