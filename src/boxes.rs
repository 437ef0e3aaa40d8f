use std::fmt;

/// Four-character box type code (e.g. `moov`, `mdat`).
///
/// Stored as the raw big-endian bytes. Not unique within a parent: siblings
/// may repeat a type code, which is why child retrieval is multiplicity-aware.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct FourCC(pub [u8; 4]);

impl FourCC {
    pub const fn new(bytes: [u8; 4]) -> Self {
        FourCC(bytes)
    }

    pub fn from_str(s: &str) -> Option<Self> {
        let b = s.as_bytes();
        if b.len() == 4 {
            Some(FourCC([b[0], b[1], b[2], b[3]]))
        } else {
            None
        }
    }

    pub fn as_str_lossy(&self) -> String {
        self.0
            .iter()
            .map(|&c| if (32..=126).contains(&c) { c as char } else { '.' })
            .collect()
    }
}

impl fmt::Debug for FourCC {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str_lossy())
    }
}

impl fmt::Display for FourCC {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str_lossy())
    }
}

/// Decoded box header.
///
/// Computed once when a reader is framed over a box, never mutated afterward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoxHeader {
    /// Total size including the header, in bytes.
    pub size: u64,
    /// Box type code.
    pub typ: FourCC,
    /// Size of the header itself: 8, or 16 for the extended form.
    pub header_size: u64,
    /// Size field was 0: the box runs to the end of the enclosing data. The
    /// recorded `size` is the extent of the buffer the header was read from.
    pub unbounded: bool,
}

impl BoxHeader {
    /// Size of the box body, in bytes.
    pub fn body_size(&self) -> u64 {
        self.size - self.header_size
    }
}
