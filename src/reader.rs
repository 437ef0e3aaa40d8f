use crate::boxes::{BoxHeader, FourCC};
use crate::buffer::BufferReader;
use crate::known_boxes::{self, is_valid_top_level_box};
use crate::parser::{ParseError, Result, read_box_header};

/// Contract implemented by every payload type that can be read out of a box.
///
/// The traversal engine knows nothing about payload layouts; it matches
/// children purely on [`BoxDecode::BOX_TYPE`] and hands each match a reader
/// scoped to that child's body. Decoders read their fixed fields through the
/// reader's primitive methods and may themselves call [`BoxReader::scan_children`]
/// (or [`BoxReader::read_all_children`]) to descend further.
pub trait BoxDecode: Sized {
    /// The type code of the boxes this payload claims.
    const BOX_TYPE: FourCC;

    /// Decode one payload from a reader scoped to its own body.
    fn decode(reader: &mut BoxReader<'_>) -> Result<Self>;
}

/// A reader is either unscanned, indexed child-by-child, or consumed in one
/// pass as a homogeneous sequence. The two populated modes are mutually
/// exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Unscanned,
    Scanned,
    ConsumedAsSequence,
}

/// Reader scoped to exactly one box's framed bytes.
///
/// Borrows the caller's buffer and owns nothing else until
/// [`scan_children`](Self::scan_children) indexes the nested boxes, at which
/// point the child readers are owned here until retrieved (consumed) or the
/// parent is dropped. A reader never outlives the buffer it was built over,
/// and the buffer's already-seen prefix must not be mutated while readers
/// into it are alive.
#[derive(Debug)]
pub struct BoxReader<'a> {
    header: BoxHeader,
    body: BufferReader<'a>,
    children: Vec<BoxReader<'a>>,
    state: ScanState,
}

fn note_top_level_type(typ: FourCC) {
    if !is_valid_top_level_box(typ) {
        tracing::debug!(%typ, "unrecognized top-level box type");
    }
}

impl<'a> BoxReader<'a> {
    fn new(header: BoxHeader, body: &'a [u8]) -> Self {
        BoxReader {
            header,
            body: BufferReader::new(body),
            children: Vec::new(),
            state: ScanState::Unscanned,
        }
    }

    /// Probe the front of a growing buffer for a top-level box header.
    ///
    /// Returns `Ok(None)` until enough bytes are present to resolve the
    /// header, then `Ok(Some((type, total_size)))` even if the body has not
    /// arrived yet. Lets a streaming caller decide how many more bytes to
    /// wait for without re-scanning payload bytes it cannot use. Safe to call
    /// repeatedly as the buffer grows; the answer only becomes more complete.
    pub fn start_top_level_box(buf: &[u8]) -> Result<Option<(FourCC, u64)>> {
        let Some(header) = read_box_header(buf, true)? else {
            return Ok(None);
        };
        note_top_level_type(header.typ);
        Ok(Some((header.typ, header.size)))
    }

    /// Construct a reader over one complete top-level box.
    ///
    /// Returns `Ok(None)` while the buffer does not yet hold the whole box.
    /// `mdat` is the exception: media data may be consumed by a separate
    /// streaming path, so a reader is returned as soon as the header is
    /// present, with the body view capped to the bytes available.
    pub fn read_top_level_box(buf: &'a [u8]) -> Result<Option<BoxReader<'a>>> {
        let Some(header) = read_box_header(buf, true)? else {
            return Ok(None);
        };
        note_top_level_type(header.typ);

        let available = buf.len() as u64;
        let body_end = if header.typ == known_boxes::MDAT || header.unbounded {
            header.size.min(available)
        } else if header.size > available {
            return Ok(None);
        } else {
            header.size
        };
        let body = &buf[header.header_size as usize..body_end as usize];
        Ok(Some(BoxReader::new(header, body)))
    }

    pub fn box_type(&self) -> FourCC {
        self.header.typ
    }

    /// Total size of the box, header included.
    pub fn box_size(&self) -> u64 {
        self.header.size
    }

    pub fn header(&self) -> &BoxHeader {
        &self.header
    }

    /// Index every box nested in the body, starting at the current read
    /// position. One-shot; must be called before the `*_child` retrieval
    /// methods work. Fails if any nested header is malformed, if a child
    /// overruns the body, or if trailing bytes do not form a header, and in
    /// that case leaves no children indexed.
    pub fn scan_children(&mut self) -> Result<()> {
        if self.state != ScanState::Unscanned {
            return Err(ParseError::AlreadyScanned {
                typ: self.header.typ,
            });
        }
        let mut children = Vec::new();
        while self.body.remaining() > 0 {
            children.push(self.next_child()?);
        }
        tracing::trace!(parent = %self.header.typ, count = children.len(), "scanned child boxes");
        self.children = children;
        self.state = ScanState::Scanned;
        Ok(())
    }

    /// Whether at least one indexed child has type `typ`. Requires a prior
    /// successful [`scan_children`](Self::scan_children).
    pub fn child_exists(&self, typ: FourCC) -> Result<bool> {
        if self.state != ScanState::Scanned {
            return Err(ParseError::NotScanned {
                typ: self.header.typ,
            });
        }
        Ok(self.children.iter().any(|c| c.header.typ == typ))
    }

    /// Read exactly one child of type `T::BOX_TYPE`, removing it from the
    /// index. Zero matches is a [`ParseError::MissingChild`]; two or more is
    /// a [`ParseError::DuplicateChild`].
    pub fn read_child<T: BoxDecode>(&mut self) -> Result<T> {
        self.try_read_child::<T>()?
            .ok_or(ParseError::MissingChild { typ: T::BOX_TYPE })
    }

    /// Like [`read_child`](Self::read_child), but zero matches is `Ok(None)`.
    pub fn try_read_child<T: BoxDecode>(&mut self) -> Result<Option<T>> {
        if self.state != ScanState::Scanned {
            return Err(ParseError::NotScanned {
                typ: self.header.typ,
            });
        }
        let mut matched = self.take_children(T::BOX_TYPE);
        match matched.len() {
            0 => Ok(None),
            1 => T::decode(&mut matched[0]).map(Some),
            count => Err(ParseError::DuplicateChild {
                typ: T::BOX_TYPE,
                count,
            }),
        }
    }

    /// Read every child of type `T::BOX_TYPE` in the order they were
    /// encountered while scanning, removing them from the index. Fails if no
    /// child matches or if any decode fails; no partial results are returned.
    pub fn read_children<T: BoxDecode>(&mut self) -> Result<Vec<T>> {
        let out = self.try_read_children::<T>()?;
        if out.is_empty() {
            return Err(ParseError::MissingChild { typ: T::BOX_TYPE });
        }
        Ok(out)
    }

    /// Like [`read_children`](Self::read_children), but zero matches yields
    /// an empty vector.
    pub fn try_read_children<T: BoxDecode>(&mut self) -> Result<Vec<T>> {
        if self.state != ScanState::Scanned {
            return Err(ParseError::NotScanned {
                typ: self.header.typ,
            });
        }
        let matched = self.take_children(T::BOX_TYPE);
        let mut out = Vec::with_capacity(matched.len());
        for mut child in matched {
            out.push(T::decode(&mut child)?);
        }
        tracing::trace!(typ = %T::BOX_TYPE, count = out.len(), "read child boxes");
        Ok(out)
    }

    /// Consume the body as a flat sequence of `T` payloads, in encountered
    /// order. Type tags on the nested headers are not checked against
    /// `T::BOX_TYPE`. Mutually exclusive with
    /// [`scan_children`](Self::scan_children); after this call the reader is
    /// spent either way, even if the walk fails partway.
    pub fn read_all_children<T: BoxDecode>(&mut self) -> Result<Vec<T>> {
        if self.state != ScanState::Unscanned {
            return Err(ParseError::AlreadyScanned {
                typ: self.header.typ,
            });
        }
        self.state = ScanState::ConsumedAsSequence;
        let mut out = Vec::new();
        while self.body.remaining() > 0 {
            let mut child = self.next_child()?;
            out.push(T::decode(&mut child)?);
        }
        Ok(out)
    }

    /// Read the FullBox version byte and 24-bit flags field from the front
    /// of the body.
    pub fn read_full_box_header(&mut self) -> Result<(u8, u32)> {
        let version = self.body.read_u8()?;
        let flags = self.body.read_u24()?;
        Ok((version, flags))
    }

    /// Frame one child box at the current body position and advance past it.
    fn next_child(&mut self) -> Result<BoxReader<'a>> {
        let rest = self.body.remaining_slice();
        let header = match read_box_header(rest, false)? {
            Some(h) => h,
            None => {
                return Err(ParseError::TruncatedChild {
                    parent: self.header.typ,
                });
            }
        };
        if header.size > rest.len() as u64 {
            return Err(ParseError::ChildOverrun {
                typ: header.typ,
                size: header.size,
                parent: self.header.typ,
                available: rest.len() as u64,
            });
        }
        let body = &rest[header.header_size as usize..header.size as usize];
        self.body.skip(header.size as usize)?;
        Ok(BoxReader::new(header, body))
    }

    /// Remove and return every indexed child of type `typ`, preserving
    /// encounter order among both the taken and the kept.
    fn take_children(&mut self, typ: FourCC) -> Vec<BoxReader<'a>> {
        let all = std::mem::take(&mut self.children);
        let (taken, kept): (Vec<_>, Vec<_>) = all.into_iter().partition(|c| c.header.typ == typ);
        self.children = kept;
        taken
    }

    // Primitive reads over the body view, for payload decoders.

    pub fn read_u8(&mut self) -> Result<u8> {
        self.body.read_u8()
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        self.body.read_u16()
    }

    pub fn read_i16(&mut self) -> Result<i16> {
        self.body.read_i16()
    }

    pub fn read_u24(&mut self) -> Result<u32> {
        self.body.read_u24()
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        self.body.read_u32()
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        self.body.read_i32()
    }

    pub fn read_u64(&mut self) -> Result<u64> {
        self.body.read_u64()
    }

    pub fn read_fourcc(&mut self) -> Result<FourCC> {
        self.body.read_fourcc()
    }

    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8]> {
        self.body.read_bytes(count)
    }

    pub fn read_vec(&mut self, count: usize) -> Result<Vec<u8>> {
        self.body.read_vec(count)
    }

    pub fn skip(&mut self, count: usize) -> Result<()> {
        self.body.skip(count)
    }

    /// Bytes of the body not yet consumed.
    pub fn remaining(&self) -> usize {
        self.body.remaining()
    }

    pub fn has_bytes(&self, count: usize) -> bool {
        self.body.has_bytes(count)
    }
}
