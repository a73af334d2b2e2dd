// The BSD `random()` generator: seeding, state installation, state swapping,
// and number production.
//
// Two algorithms share one state machine, chosen by the size of the active
// state buffer (see `state.rs`):
//
// - Linear-congruential mode (buffers of 8..32 bytes): a single word stepped
//   by `x := (1103515245 * x + 12345) & 0x7fffffff`.
// - Lagged-Fibonacci mode (32 bytes and up): a table of 7, 15, 31, or 63
//   words with two cursors. Each draw adds the rear entry into the front
//   entry, returns the sum shifted right by one, and advances both cursors.
//
// Seeding in lagged mode fills the table from a 64-bit LCG
// (`s := 6364136223846793005 * s + 1`, upper 32 bits per slot) and forces the
// first word odd. This differs from the historical BSD seeding (which used a
// Park-Miller generator and degenerates for seed 0) but matches the C library
// this generator is output-compatible with, bit for bit.
//
// Ownership: the generator owns its active buffer. `install_state` and
// `swap_state` move a buffer in and hand the previous one back out as a
// `StateBuffer` with its header packed, so the caller can restore it later.
// The generator never allocates a state buffer other than the built-in
// default it starts with.
//
// **Critical constraint: bit-exact output.** The arithmetic here (wrapping
// widths, masks, and the order of cursor updates) reproduces the reference
// implementation exactly. Do not "improve" it.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{Result, StateError};
use crate::state::{Header, Mode, StateBuffer, TABLE_OFFSET, TableSize};

/// Built-in state a new generator starts from: a 31-word table with cursors
/// at (3, 0). The table is the one `seed(1)` produces, so an unseeded
/// generator yields the same stream as one seeded with 1. Word 0 is the
/// header slot and is only written when the state is packed.
#[rustfmt::skip]
const DEFAULT_STATE: [u32; 32] = [
    0x0000_0000, 0x5851_f42d, 0xc0b1_8ccf, 0xcbb5_f646,
    0xc703_3129, 0x3070_5b04, 0x20fd_5db4, 0x9a8b_7f78,
    0x5029_59d8, 0xab89_4868, 0x6c03_56a7, 0x88cd_b7ff,
    0xb477_d43f, 0x70a3_a52b, 0xa8e4_baf1, 0xfd83_41fc,
    0x8ae1_6fd9, 0x742d_2f7a, 0x0d1f_0796, 0x7603_5e09,
    0x40f7_702c, 0x6fa7_2ca5, 0xaaa8_4157, 0x58a0_df74,
    0xc74a_0364, 0xae53_3cc4, 0x0418_5faf, 0x6de3_b115,
    0x0cab_8628, 0xf043_bfa4, 0x3981_50e9, 0x3752_1657,
];

/// A BSD-compatible `random()` generator.
///
/// Each instance is independent; there is no process-wide state. Share one
/// across threads only behind your own lock.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(from = "StateBuffer", into = "StateBuffer")]
pub struct Generator {
    mode: Mode,
    /// Front cursor `i`: the table entry that receives the sum.
    front: usize,
    /// Rear cursor `j`: the entry added into the front one.
    rear: usize,
    /// Active buffer, header slot first. Always at least
    /// `mode.required_words()` long. The header slot is stale while active.
    words: Vec<u32>,
}

impl Generator {
    /// Create a generator on the built-in default state.
    pub fn new() -> Self {
        Self {
            mode: Mode::LaggedFibonacci(TableSize::Words31),
            front: 3,
            rear: 0,
            words: DEFAULT_STATE.to_vec(),
        }
    }

    /// Create a generator on the default state and seed it.
    pub fn with_seed(seed: u32) -> Self {
        let mut rng = Self::new();
        rng.seed(seed);
        rng
    }

    /// Create a generator that continues from a saved state.
    pub fn from_state(state: StateBuffer) -> Self {
        let (header, words) = state.into_parts();
        Self {
            mode: header.mode,
            front: usize::from(header.front),
            rear: usize::from(header.rear),
            words,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Current `(front, rear)` cursors. Meaningless in LCG mode.
    pub fn cursors(&self) -> (usize, usize) {
        (self.front, self.rear)
    }

    /// Reseed the active state.
    ///
    /// In LCG mode the single word is set to `seed` directly. In lagged mode
    /// the cursors are reset and the table is refilled from a 64-bit LCG
    /// started at `seed`. Leaves the header slot alone.
    pub fn seed(&mut self, seed: u32) {
        trace!(seed, table_len = self.mode.table_len(), "reseeding");
        match self.mode {
            Mode::LinearCongruential => {
                self.words[TABLE_OFFSET] = seed;
            }
            Mode::LaggedFibonacci(size) => {
                self.front = size.initial_front();
                self.rear = 0;
                let table = &mut self.words[TABLE_OFFSET..TABLE_OFFSET + size.word_count()];
                let mut s = u64::from(seed);
                for slot in table.iter_mut() {
                    s = lcg64(s);
                    *slot = (s >> 32) as u32;
                }
                // At least one odd entry, or every sum stays even forever.
                table[0] |= 1;
            }
        }
    }

    /// Make `buffer` the active state, sized for `byte_size` bytes, and seed
    /// it with `seed`. Returns the previously active state.
    ///
    /// The mode is picked from `byte_size` (see `Mode::for_byte_size`), so any
    /// size of 256 or more gets the 63-word table. `buffer` only has to cover
    /// the table that size selects, header word included. Fails if `byte_size`
    /// is under 8 or `buffer` is shorter than that; on failure the generator
    /// is unchanged and keeps its stream.
    pub fn install_state(
        &mut self,
        seed: u32,
        buffer: Vec<u32>,
        byte_size: usize,
    ) -> Result<StateBuffer> {
        let Some(mode) = Mode::for_byte_size(byte_size) else {
            debug!(byte_size, "rejected state buffer below minimum size");
            return Err(StateError::SizeTooSmall { byte_size });
        };
        let required = mode.required_words() * size_of::<u32>();
        let available = buffer.len() * size_of::<u32>();
        if available < required {
            debug!(
                byte_size,
                required,
                available,
                "rejected short state buffer"
            );
            return Err(StateError::BufferTooShort {
                required,
                available,
            });
        }

        let previous = self.replace_active(buffer);
        self.mode = mode;
        self.seed(seed);
        debug!(
            byte_size,
            table_len = mode.table_len(),
            previous_table_len = previous.mode().table_len(),
            "installed state buffer"
        );
        Ok(previous)
    }

    /// Make a previously saved state active and return the current one.
    ///
    /// The current `(n, i, j)` is packed into the returned buffer's header, so
    /// swapping the returned buffer back in resumes exactly where this one
    /// left off.
    pub fn swap_state(&mut self, state: StateBuffer) -> StateBuffer {
        let (header, words) = state.into_parts();
        let previous = self.replace_active(words);
        self.mode = header.mode;
        self.front = usize::from(header.front);
        self.rear = usize::from(header.rear);
        debug!(
            table_len = header.mode.table_len(),
            previous_table_len = previous.mode().table_len(),
            "swapped state buffer"
        );
        previous
    }

    /// A packed copy of the active state. The generator is not affected.
    pub fn snapshot(&self) -> StateBuffer {
        StateBuffer::from_parts(self.header(), self.words.clone())
    }

    /// Produce the next value, in `[0, RANDOM_MAX]`.
    pub fn next_random(&mut self) -> i32 {
        match self.mode {
            Mode::LinearCongruential => {
                let x = lcg31(self.words[TABLE_OFFSET]);
                self.words[TABLE_OFFSET] = x;
                x as i32
            }
            Mode::LaggedFibonacci(size) => {
                let n = size.word_count();
                let table = &mut self.words[TABLE_OFFSET..];
                let sum = table[self.front].wrapping_add(table[self.rear]);
                table[self.front] = sum;
                self.front += 1;
                if self.front == n {
                    self.front = 0;
                }
                self.rear += 1;
                if self.rear == n {
                    self.rear = 0;
                }
                (sum >> 1) as i32
            }
        }
    }

    fn header(&self) -> Header {
        Header {
            mode: self.mode,
            front: self.front as u8,
            rear: self.rear as u8,
        }
    }

    /// Pack the current header into the active buffer, swap in `words`, and
    /// hand the old buffer back. Mode and cursors are left for the caller.
    fn replace_active(&mut self, words: Vec<u32>) -> StateBuffer {
        let header = self.header();
        let old = std::mem::replace(&mut self.words, words);
        StateBuffer::from_parts(header, old)
    }
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}

impl From<StateBuffer> for Generator {
    fn from(state: StateBuffer) -> Self {
        Generator::from_state(state)
    }
}

impl From<Generator> for StateBuffer {
    fn from(rng: Generator) -> Self {
        let header = rng.header();
        StateBuffer::from_parts(header, rng.words)
    }
}

fn lcg31(x: u32) -> u32 {
    x.wrapping_mul(1_103_515_245).wrapping_add(12345) & 0x7fff_ffff
}

fn lcg64(s: u64) -> u64 {
    s.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1)
}
