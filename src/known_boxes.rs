use crate::boxes::FourCC;

pub const FTYP: FourCC = FourCC::new(*b"ftyp");
pub const STYP: FourCC = FourCC::new(*b"styp");
pub const PDIN: FourCC = FourCC::new(*b"pdin");
pub const BLOC: FourCC = FourCC::new(*b"bloc");
pub const MOOV: FourCC = FourCC::new(*b"moov");
pub const MOOF: FourCC = FourCC::new(*b"moof");
pub const MFRA: FourCC = FourCC::new(*b"mfra");
pub const MDAT: FourCC = FourCC::new(*b"mdat");
pub const FREE: FourCC = FourCC::new(*b"free");
pub const SKIP: FourCC = FourCC::new(*b"skip");
pub const WIDE: FourCC = FourCC::new(*b"wide");
pub const META: FourCC = FourCC::new(*b"meta");
pub const SIDX: FourCC = FourCC::new(*b"sidx");
pub const SSIX: FourCC = FourCC::new(*b"ssix");
pub const PRFT: FourCC = FourCC::new(*b"prft");
pub const EMSG: FourCC = FourCC::new(*b"emsg");
pub const PSSH: FourCC = FourCC::new(*b"pssh");

/// Box types recognized at the root of a file or stream.
const TOP_LEVEL_BOXES: [FourCC; 17] = [
    FTYP, STYP, PDIN, BLOC, MOOV, MOOF, MFRA, MDAT, FREE, SKIP, WIDE, META, SIDX, SSIX, PRFT,
    EMSG, PSSH,
];

/// Whether `typ` is a recognized top-level box type.
///
/// True for some boxes this crate never interprets. Diagnostic only, useful
/// for spotting misaligned appends; parsing never rejects a type for being
/// absent from this list.
pub fn is_valid_top_level_box(typ: FourCC) -> bool {
    TOP_LEVEL_BOXES.contains(&typ)
}
