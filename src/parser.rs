use crate::boxes::{BoxHeader, FourCC};
use byteorder::{BigEndian, ByteOrder};

/// Hard parse failures: the bytes present violate the container's framing
/// invariants, or a reader was driven outside its contract.
///
/// "Not enough bytes yet" is not represented here: the incremental entry
/// points report it as `Ok(None)`, and the caller decides whether to wait
/// for more data.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("box size {size} is smaller than its {header_size}-byte header")]
    InvalidSize { size: u64, header_size: u64 },
    #[error("box size {0} exceeds the addressable range")]
    Oversize(u64),
    #[error("unbounded box in a nested context")]
    NestedUnbounded,
    #[error("truncated box inside `{parent}` body")]
    TruncatedChild { parent: FourCC },
    #[error("child `{typ}` ({size} bytes) overruns its parent `{parent}` ({available} bytes left)")]
    ChildOverrun {
        typ: FourCC,
        size: u64,
        parent: FourCC,
        available: u64,
    },
    #[error("read past the end of the box body")]
    UnexpectedEnd,
    #[error("expected exactly one `{typ}` child, found {count}")]
    DuplicateChild { typ: FourCC, count: usize },
    #[error("required `{typ}` child is missing")]
    MissingChild { typ: FourCC },
    #[error("children of `{typ}` already consumed")]
    AlreadyScanned { typ: FourCC },
    #[error("children of `{typ}` have not been scanned")]
    NotScanned { typ: FourCC },
}

pub type Result<T> = std::result::Result<T, ParseError>;

/// Decode one box header from the front of `buf`.
///
/// `buf` is whatever bytes are available from the box's first byte onward; it
/// need not contain the box body. Returns `Ok(None)` while too few bytes are
/// present to resolve the chosen size encoding (8 bytes for the compact form,
/// 16 for the extended form), and `Err` for sizes the format forbids.
///
/// The size field is interpreted in four classes:
/// - `0`: the box extends to the end of the available buffer. Permitted only
///   where the caller allows it (top level); nested occurrences are malformed.
/// - `1`: extended form, the true 64-bit size follows the type code.
/// - `2..=7`: malformed, a box cannot be smaller than its own header.
/// - anything else: the total size, header included.
///
/// Pure decode: no cursor is advanced. Callers commit to the result by
/// skipping `header_size` bytes themselves.
pub fn read_box_header(buf: &[u8], allow_unbounded: bool) -> Result<Option<BoxHeader>> {
    if buf.len() < 8 {
        return Ok(None);
    }
    let size32 = BigEndian::read_u32(&buf[0..4]);
    let typ = FourCC([buf[4], buf[5], buf[6], buf[7]]);

    let (size, header_size, unbounded) = match size32 {
        0 => {
            if !allow_unbounded {
                return Err(ParseError::NestedUnbounded);
            }
            (buf.len() as u64, 8, true)
        }
        1 => {
            if buf.len() < 16 {
                return Ok(None);
            }
            let size64 = BigEndian::read_u64(&buf[8..16]);
            if size64 < 16 {
                return Err(ParseError::InvalidSize {
                    size: size64,
                    header_size: 16,
                });
            }
            (size64, 16, false)
        }
        2..=7 => {
            return Err(ParseError::InvalidSize {
                size: size32 as u64,
                header_size: 8,
            });
        }
        _ => (size32 as u64, 8, false),
    };

    if usize::try_from(size).is_err() {
        return Err(ParseError::Oversize(size));
    }

    Ok(Some(BoxHeader {
        size,
        typ,
        header_size,
        unbounded,
    }))
}
