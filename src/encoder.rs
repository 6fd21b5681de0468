//! A twiddly knob encoder decoder.
//!
//! ```ignore
//!    +----+    +----+
//!    |    |    |    |       A
//!  --+    +----+    +----
//!       +----+    +----+
//!       |    |    |    |    B
//!   ----+    +----+    +--
//!        ^  ^ ^  ^
//!        1  2 3  4
//! ```
//!
//! The states are `AB`:
//!
//! 1. is `11`
//! 2. is `01`
//! 3. is `00`
//! 4. is `10`
//!
//! The only valid transitions clock-wise are:
//!
//! * `11` -> `01`
//! * `01` -> `00`
//! * `00` -> `10`
//! * `10` -> `11`
//!
//! And the reverse counter clock wise.
//!
//! * `01` -> `11`
//! * `00` -> `01`
//! * `10` -> `00`
//! * `11` -> `10`
//!
//! We can make pairs to create a lookup table of valid pairs `1101`, `0100`, and -1 or 1 to denote direction.
//! Everything else is either no change or both pins flipping at once, which only
//! happens with contact bounce, and decodes to 0.

use crate::config::StepMode;

const TABLE: [i8; 16] = [
    0,  // 0000
    -1, // 0001
    1,  // 0010
    0,  // 0011
    1,  // 0100
    0,  // 0101
    0,  // 0110
    -1, // 0111
    -1, // 1000
    0,  // 1001
    0,  // 1010
    1,  // 1011
    0,  // 1100
    1,  // 1101
    -1, // 1110
    0,  // 1111
];

/// A CW rotation out of the `11` detent always passes through these two transitions.
const CW_DETENT: u8 = 0b1101_0100;

/// A CCW rotation out of the `11` detent always passes through these two transitions.
const CCW_DETENT: u8 = 0b1110_1000;

/// Pack pin levels into the 2-bit `AB` state.
pub fn pack(a: bool, b: bool) -> u8 {
    let mut s = 0;
    if a {
        s |= 0b10;
    }
    if b {
        s |= 0b01;
    }
    s
}

/// Direction for a single transition from `prev` to `next` (both 2-bit `AB` states).
pub fn transition(prev: u8, next: u8) -> i8 {
    TABLE[(((prev & 0b11) << 2) | (next & 0b11)) as usize]
}

/// Quadrature state machine, fed one sampled `AB` state per pin edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoder {
    mode: StepMode,
    prev_next: u8,
    state: u8,
}

impl Decoder {
    pub fn new(mode: StepMode) -> Self {
        Decoder {
            mode,
            prev_next: 0,
            state: 0,
        }
    }

    /// Forget history and take `current` as the last known state.
    pub fn reset(&mut self, current: u8) {
        self.prev_next = current & 0b11;
        self.state = 0;
    }

    /// The last sampled `AB` state.
    pub fn last(&self) -> u8 {
        self.prev_next & 0b11
    }

    pub fn mode(&self) -> StepMode {
        self.mode
    }

    pub fn step(&mut self, current: u8) -> i8 {
        // Rotate up last read 2 bits and discard the rest.
        self.prev_next = ((self.prev_next << 2) & 0b1100) | (current & 0b11);

        let direction = TABLE[self.prev_next as usize];

        match self.mode {
            StepMode::Quarter => direction,

            StepMode::Full => {
                if direction != 0 {
                    // Move current state up to make state for new, and put in the new.
                    self.state = (self.state << 4) | self.prev_next;

                    if self.state == CCW_DETENT {
                        return -1;
                    }

                    if self.state == CW_DETENT {
                        return 1;
                    }
                }

                0
            }
        }
    }
}
