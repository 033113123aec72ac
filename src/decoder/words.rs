use byteorder::{ByteOrder, LittleEndian};

/// Second word of a timer marker pair.
pub const TIMER_WORD: u16 = 0x4000;

/// Both words of a sync marker pair.
pub const SYNC_WORD: u16 = 0xFFFF;

/// Size of one word pair on disk.
pub const PAIR_BYTES: usize = 4;

/// Two consecutive little-endian 16-bit words from the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WordPair(pub u16, pub u16);

impl WordPair {
    /// Decode one pair from the first four bytes of `bytes`.
    #[inline]
    pub fn from_le_bytes(bytes: &[u8]) -> Self {
        WordPair(
            LittleEndian::read_u16(&bytes[0..2]),
            LittleEndian::read_u16(&bytes[2..4]),
        )
    }

    /// Timer marker: second word is `0x4000`.
    #[inline]
    pub fn is_timer(&self) -> bool {
        self.1 == TIMER_WORD
    }

    /// Sync marker: both words are `0xFFFF`.
    #[inline]
    pub fn is_sync(&self) -> bool {
        self.0 == SYNC_WORD && self.1 == SYNC_WORD
    }

    /// Word by position within the pair (0 or 1).
    #[inline]
    pub fn word(&self, idx: usize) -> u16 {
        if idx == 0 {
            self.0
        } else {
            self.1
        }
    }
}

/// Whether a raw 4-byte window holds a timer marker.
#[inline]
pub fn is_timer_window(window: &[u8]) -> bool {
    window.len() == PAIR_BYTES && LittleEndian::read_u16(&window[2..4]) == TIMER_WORD
}

/// Reinterpret a byte chunk as word pairs.
///
/// Bytes past the last whole pair are ignored; see [`trailing_bytes`].
pub fn pairs_from_bytes(bytes: &[u8]) -> Vec<WordPair> {
    bytes
        .chunks_exact(PAIR_BYTES)
        .map(WordPair::from_le_bytes)
        .collect()
}

/// Number of bytes that do not form a whole pair.
#[inline]
pub fn trailing_bytes(len: usize) -> usize {
    len % PAIR_BYTES
}
