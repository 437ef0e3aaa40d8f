use mp4stream::boxes::FourCC;
use mp4stream::parser::{ParseError, read_box_header};

fn compact_box(typ: &[u8; 4], payload: &[u8]) -> Vec<u8> {
    let mut v = Vec::new();
    // size = header + payload
    v.extend_from_slice(&((8 + payload.len()) as u32).to_be_bytes());
    v.extend_from_slice(typ);
    v.extend_from_slice(payload);
    v
}

#[test]
fn compact_form() {
    let data = compact_box(b"free", &[0xAA; 4]);

    let hdr = read_box_header(&data, true)
        .expect("read_box_header failed")
        .expect("header should be resolvable");

    assert_eq!(hdr.typ, FourCC(*b"free"));
    assert_eq!(hdr.size, 12);
    assert_eq!(hdr.header_size, 8);
    assert!(!hdr.unbounded);
    assert_eq!(hdr.body_size(), 4);
}

#[test]
fn extended_form() {
    let mut data = Vec::new();
    // size32 = 1 selects the extended form
    data.extend_from_slice(&1u32.to_be_bytes());
    data.extend_from_slice(b"mdat");
    // size64 = 24: 16-byte header + 8 payload bytes
    data.extend_from_slice(&24u64.to_be_bytes());
    data.extend_from_slice(&[0u8; 8]);

    let hdr = read_box_header(&data, true).unwrap().unwrap();

    assert_eq!(hdr.typ, FourCC(*b"mdat"));
    assert_eq!(hdr.size, 24);
    assert_eq!(hdr.header_size, 16);
    assert!(!hdr.unbounded);
}

#[test]
fn unbounded_form() {
    let mut data = Vec::new();
    // size32 = 0: box runs to the end of the available buffer
    data.extend_from_slice(&0u32.to_be_bytes());
    data.extend_from_slice(b"mdat");
    data.extend_from_slice(&[0u8; 20]);

    let hdr = read_box_header(&data, true).unwrap().unwrap();

    assert_eq!(hdr.typ, FourCC(*b"mdat"));
    assert_eq!(hdr.size, 28);
    assert_eq!(hdr.header_size, 8);
    assert!(hdr.unbounded);
}

#[test]
fn unbounded_rejected_when_not_allowed() {
    let mut data = Vec::new();
    data.extend_from_slice(&0u32.to_be_bytes());
    data.extend_from_slice(b"mdat");
    data.extend_from_slice(&[0u8; 20]);

    assert_eq!(
        read_box_header(&data, false),
        Err(ParseError::NestedUnbounded)
    );
}

#[test]
fn short_buffer_is_not_an_error() {
    let data = compact_box(b"free", &[0xAA; 4]);
    for k in 0..8 {
        assert_eq!(read_box_header(&data[..k], true), Ok(None), "at {k} bytes");
    }
    // from 8 bytes on the header resolves, body presence irrelevant
    for k in 8..data.len() {
        let hdr = read_box_header(&data[..k], true).unwrap().unwrap();
        assert_eq!(hdr.size, 12);
    }
}

#[test]
fn extended_form_needs_sixteen_bytes() {
    let mut data = Vec::new();
    data.extend_from_slice(&1u32.to_be_bytes());
    data.extend_from_slice(b"mdat");
    data.extend_from_slice(&32u64.to_be_bytes());

    for k in 8..16 {
        assert_eq!(read_box_header(&data[..k], true), Ok(None), "at {k} bytes");
    }
    let hdr = read_box_header(&data, true).unwrap().unwrap();
    assert_eq!(hdr.size, 32);
    assert_eq!(hdr.header_size, 16);
}

#[test]
fn size_smaller_than_header_is_malformed() {
    for size32 in 2u32..8 {
        let mut data = Vec::new();
        data.extend_from_slice(&size32.to_be_bytes());
        data.extend_from_slice(b"free");

        assert_eq!(
            read_box_header(&data, true),
            Err(ParseError::InvalidSize {
                size: size32 as u64,
                header_size: 8
            }),
            "size32 = {size32}"
        );
    }
}

#[test]
fn extended_size_smaller_than_header_is_malformed() {
    let mut data = Vec::new();
    data.extend_from_slice(&1u32.to_be_bytes());
    data.extend_from_slice(b"mdat");
    // size64 = 15 < the 16-byte extended header
    data.extend_from_slice(&15u64.to_be_bytes());

    assert_eq!(
        read_box_header(&data, true),
        Err(ParseError::InvalidSize {
            size: 15,
            header_size: 16
        })
    );
}
