// State buffer layout, header packing, and table-size selection.
//
// A state buffer is a run of native-endian `u32` words. Word 0 is a packed
// header `(n << 16) | (i << 8) | j` recording the table size and the two
// cursors; words 1..=n are the feedback table. In linear-congruential mode
// (`n == 0`) word 1 is the single LCG word. The layout is byte-compatible
// with buffers produced by the C library `initstate`/`setstate` on the same
// architecture; no endianness normalization is performed.
//
// `StateBuffer` is the owned handle that moves in and out of a `Generator`.
// Its header is always valid and its length always covers the table: the only
// ways to get one are from the generator itself or through the checked
// `StateBuffer::from_words` path. That is what lets `Generator::swap_state`
// be infallible.

use serde::{Deserialize, Serialize};

use crate::error::{Result, StateError};

/// Smallest byte size accepted by `Generator::install_state`.
pub const MIN_STATE_BYTES: usize = 8;

/// Index of the first table word inside a state buffer (word 0 is the header).
pub(crate) const TABLE_OFFSET: usize = 1;

/// Table size of a lagged-Fibonacci state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TableSize {
    Words7,
    Words15,
    Words31,
    Words63,
}

impl TableSize {
    /// Number of words in the feedback table.
    pub fn word_count(self) -> usize {
        match self {
            TableSize::Words7 => 7,
            TableSize::Words15 => 15,
            TableSize::Words31 => 31,
            TableSize::Words63 => 63,
        }
    }

    /// Front cursor position after seeding. The rear cursor always starts at 0,
    /// so this is also the lag between the two.
    pub fn initial_front(self) -> usize {
        match self {
            TableSize::Words7 | TableSize::Words31 => 3,
            TableSize::Words15 | TableSize::Words63 => 1,
        }
    }
}

/// Algorithm selected by the size of the active state buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mode {
    /// `x := (1103515245 * x + 12345) mod 2^31` over a single word.
    LinearCongruential,
    /// Additive feedback over a table of the given size.
    LaggedFibonacci(TableSize),
}

impl Mode {
    /// Pick the mode for a state buffer of `byte_size` bytes.
    ///
    /// Returns `None` below `MIN_STATE_BYTES`. Boundaries are at 8, 32, 64,
    /// 128, and 256 bytes; anything at or above 256 gets the 63-word table.
    pub fn for_byte_size(byte_size: usize) -> Option<Mode> {
        let mode = match byte_size {
            0..8 => return None,
            8..32 => Mode::LinearCongruential,
            32..64 => Mode::LaggedFibonacci(TableSize::Words7),
            64..128 => Mode::LaggedFibonacci(TableSize::Words15),
            128..256 => Mode::LaggedFibonacci(TableSize::Words31),
            _ => Mode::LaggedFibonacci(TableSize::Words63),
        };
        Some(mode)
    }

    /// Decode the `n` field of a packed header.
    pub fn from_table_len(n: u32) -> Option<Mode> {
        match n {
            0 => Some(Mode::LinearCongruential),
            7 => Some(Mode::LaggedFibonacci(TableSize::Words7)),
            15 => Some(Mode::LaggedFibonacci(TableSize::Words15)),
            31 => Some(Mode::LaggedFibonacci(TableSize::Words31)),
            63 => Some(Mode::LaggedFibonacci(TableSize::Words63)),
            _ => None,
        }
    }

    /// The `n` field as stored in a packed header (0 in LCG mode).
    pub fn table_len(self) -> usize {
        match self {
            Mode::LinearCongruential => 0,
            Mode::LaggedFibonacci(size) => size.word_count(),
        }
    }

    /// Total words a buffer needs for this mode, header included.
    pub fn required_words(self) -> usize {
        TABLE_OFFSET + self.table_len().max(1)
    }
}

/// Decoded form of the packed header word.
///
/// In LCG mode the cursors are carried along untouched but never read, the
/// same as the C implementation, so a header may hold any cursor values there.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Header {
    pub mode: Mode,
    pub front: u8,
    pub rear: u8,
}

impl Header {
    /// Pack into `(n << 16) | (front << 8) | rear`.
    pub fn pack(self) -> u32 {
        let n = self.mode.table_len() as u32;
        (n << 16) | (u32::from(self.front) << 8) | u32::from(self.rear)
    }

    /// Unpack a header word, rejecting unknown table sizes and cursors that
    /// point outside a lagged-Fibonacci table.
    pub fn unpack(word: u32) -> Result<Self> {
        let invalid = || StateError::InvalidHeader { header: word };
        let mode = Mode::from_table_len(word >> 16).ok_or_else(invalid)?;
        let front = ((word >> 8) & 0xff) as u8;
        let rear = (word & 0xff) as u8;
        if let Mode::LaggedFibonacci(size) = mode {
            let n = size.word_count();
            if usize::from(front) >= n || usize::from(rear) >= n {
                return Err(invalid());
            }
        }
        Ok(Header { mode, front, rear })
    }
}

/// An owned, self-describing generator state.
///
/// Produced by `Generator::install_state`, `Generator::swap_state`, and
/// `Generator::snapshot`, or loaded from raw words with `from_words`. The
/// header word is always in sync with `header`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<u32>", into = "Vec<u32>")]
pub struct StateBuffer {
    header: Header,
    words: Vec<u32>,
}

impl StateBuffer {
    /// Validate a raw word buffer (header word first) and wrap it.
    ///
    /// Fails if the header is not a valid packed `(n, i, j)` or if the buffer
    /// is too short for the table the header describes. Extra trailing words
    /// are kept and ignored.
    pub fn from_words(words: Vec<u32>) -> Result<Self> {
        let word = *words.first().ok_or(StateError::Truncated {
            required: TABLE_OFFSET,
            words: 0,
        })?;
        let header = Header::unpack(word)?;
        let required = header.mode.required_words();
        if words.len() < required {
            return Err(StateError::Truncated {
                required,
                words: words.len(),
            });
        }
        Ok(StateBuffer { header, words })
    }

    /// Wrap words whose length is already known to cover `header.mode`,
    /// writing the packed header into word 0.
    pub(crate) fn from_parts(header: Header, mut words: Vec<u32>) -> Self {
        debug_assert!(words.len() >= header.mode.required_words());
        words[0] = header.pack();
        StateBuffer { header, words }
    }

    pub fn header(&self) -> Header {
        self.header
    }

    pub fn mode(&self) -> Mode {
        self.header.mode
    }

    /// The working table (the single LCG word in LCG mode).
    pub fn table(&self) -> &[u32] {
        &self.words[TABLE_OFFSET..self.header.mode.required_words()]
    }

    /// The full buffer in its binary layout, header word first.
    pub fn as_words(&self) -> &[u32] {
        &self.words
    }

    pub fn into_words(self) -> Vec<u32> {
        self.words
    }

    /// Size of the buffer in bytes.
    pub fn byte_len(&self) -> usize {
        self.words.len() * size_of::<u32>()
    }

    pub(crate) fn into_parts(self) -> (Header, Vec<u32>) {
        (self.header, self.words)
    }
}

impl TryFrom<Vec<u32>> for StateBuffer {
    type Error = StateError;

    fn try_from(words: Vec<u32>) -> Result<Self> {
        StateBuffer::from_words(words)
    }
}

impl From<StateBuffer> for Vec<u32> {
    fn from(state: StateBuffer) -> Self {
        state.into_words()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_selection_boundaries() {
        let cases = [
            (0, None),
            (7, None),
            (8, Some(0)),
            (16, Some(0)),
            (31, Some(0)),
            (32, Some(7)),
            (48, Some(7)),
            (63, Some(7)),
            (64, Some(15)),
            (127, Some(15)),
            (128, Some(31)),
            (255, Some(31)),
            (256, Some(63)),
            (1 << 20, Some(63)),
        ];
        for (byte_size, expected) in cases {
            let got = Mode::for_byte_size(byte_size).map(Mode::table_len);
            assert_eq!(got, expected, "byte_size {byte_size}");
        }
    }

    #[test]
    fn required_words_fit_in_minimum_byte_size() {
        for byte_size in [8, 32, 64, 128, 256] {
            let mode = Mode::for_byte_size(byte_size).unwrap();
            assert!(mode.required_words() * 4 <= byte_size, "byte_size {byte_size}");
        }
    }

    #[test]
    fn initial_front_cursor() {
        assert_eq!(TableSize::Words7.initial_front(), 3);
        assert_eq!(TableSize::Words15.initial_front(), 1);
        assert_eq!(TableSize::Words31.initial_front(), 3);
        assert_eq!(TableSize::Words63.initial_front(), 1);
    }

    #[test]
    fn header_pack_layout() {
        let header = Header {
            mode: Mode::LaggedFibonacci(TableSize::Words15),
            front: 4,
            rear: 3,
        };
        assert_eq!(header.pack(), 0x000f_0403);
        assert_eq!(Header::unpack(0x000f_0403).unwrap(), header);
    }

    #[test]
    fn header_rejects_unknown_table_size() {
        assert_eq!(
            Header::unpack(0x0020_0000),
            Err(StateError::InvalidHeader { header: 0x0020_0000 })
        );
        assert!(Header::unpack(0xff1f_0000).is_err());
    }

    #[test]
    fn header_rejects_out_of_range_cursors() {
        // n = 7 with front = 7
        assert!(Header::unpack(0x0007_0700).is_err());
        // n = 7 with rear = 9
        assert!(Header::unpack(0x0007_0009).is_err());
        assert!(Header::unpack(0x0007_0606).is_ok());
    }

    #[test]
    fn lcg_header_ignores_cursors() {
        // Stale cursors left over from an earlier lagged state are legal.
        let header = Header::unpack(0x0000_2a05).unwrap();
        assert_eq!(header.mode, Mode::LinearCongruential);
        assert_eq!((header.front, header.rear), (0x2a, 5));
    }

    #[test]
    fn from_words_checks_length() {
        let err = StateBuffer::from_words(vec![0x001f_0300; 10]).unwrap_err();
        assert_eq!(
            err,
            StateError::Truncated {
                required: 32,
                words: 10
            }
        );
        assert!(StateBuffer::from_words(Vec::new()).is_err());
        let lcg = StateBuffer::from_words(vec![0, 12345]).unwrap();
        assert_eq!(lcg.table(), &[12345]);
        assert_eq!(lcg.byte_len(), 8);
    }

    #[test]
    fn from_words_keeps_trailing_words() {
        let mut words = vec![0u32; 12];
        words[0] = 0x0007_0100;
        let state = StateBuffer::from_words(words).unwrap();
        assert_eq!(state.table().len(), 7);
        assert_eq!(state.as_words().len(), 12);
    }

    #[test]
    fn serde_rejects_invalid_header() {
        let bad = serde_json::to_string(&vec![0x0020_0000u32, 1, 2]).unwrap();
        assert!(serde_json::from_str::<StateBuffer>(&bad).is_err());

        let good = serde_json::to_string(&vec![0x0000_0000u32, 99]).unwrap();
        let state: StateBuffer = serde_json::from_str(&good).unwrap();
        assert_eq!(state.table(), &[99]);
    }
}
