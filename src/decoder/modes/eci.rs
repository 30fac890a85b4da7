//! Extended Channel Interpretation: character sets selected inside the bitstream

use std::borrow::Cow;

use encoding_rs::Encoding;

use crate::decoder::bit_source::BitSource;
use crate::error::{QrError, Result};

/// Character sets reachable through an ECI designator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharacterSetEci {
    /// IBM code page 437 (ECI 0, 2)
    Cp437,
    /// Latin-1 (ECI 1, 3)
    Iso8859_1,
    /// Latin-2
    Iso8859_2,
    /// Latin-3
    Iso8859_3,
    /// Latin-4
    Iso8859_4,
    /// Latin/Cyrillic
    Iso8859_5,
    /// Latin/Arabic
    Iso8859_6,
    /// Latin/Greek
    Iso8859_7,
    /// Latin/Hebrew
    Iso8859_8,
    /// Latin-5 (Turkish)
    Iso8859_9,
    /// Latin-6 (Nordic)
    Iso8859_10,
    /// Latin/Thai
    Iso8859_11,
    /// Latin-7 (Baltic)
    Iso8859_13,
    /// Latin-8 (Celtic)
    Iso8859_14,
    /// Latin-9
    Iso8859_15,
    /// Latin-10
    Iso8859_16,
    /// Shift JIS
    ShiftJis,
    /// Windows-1250
    Cp1250,
    /// Windows-1251
    Cp1251,
    /// Windows-1252
    Cp1252,
    /// Windows-1256
    Cp1256,
    /// UTF-16 big endian without BOM
    UnicodeBigUnmarked,
    /// UTF-8
    Utf8,
    /// US-ASCII (ECI 27, 170)
    Ascii,
    /// Big5
    Big5,
    /// GB 18030
    Gb18030,
    /// EUC-KR
    EucKr,
}

impl CharacterSetEci {
    /// Character set for an ECI assignment number
    pub fn for_value(value: u32) -> Result<Self> {
        use CharacterSetEci::*;
        Ok(match value {
            0 | 2 => Cp437,
            1 | 3 => Iso8859_1,
            4 => Iso8859_2,
            5 => Iso8859_3,
            6 => Iso8859_4,
            7 => Iso8859_5,
            8 => Iso8859_6,
            9 => Iso8859_7,
            10 => Iso8859_8,
            11 => Iso8859_9,
            12 => Iso8859_10,
            13 => Iso8859_11,
            15 => Iso8859_13,
            16 => Iso8859_14,
            17 => Iso8859_15,
            18 => Iso8859_16,
            20 => ShiftJis,
            21 => Cp1250,
            22 => Cp1251,
            23 => Cp1252,
            24 => Cp1256,
            25 => UnicodeBigUnmarked,
            26 => Utf8,
            27 | 170 => Ascii,
            28 => Big5,
            29 => Gb18030,
            30 => EucKr,
            v if v >= 900 => return Err(QrError::FormatError("ECI value out of range")),
            _ => return Err(QrError::FormatError("unsupported ECI value")),
        })
    }

    /// Read a 1, 2 or 3 byte ECI designator and look it up
    pub fn parse(bits: &mut BitSource<'_>) -> Result<Self> {
        Self::for_value(parse_eci_value(bits)?)
    }

    fn encoding(self) -> Option<&'static Encoding> {
        use CharacterSetEci::*;
        Some(match self {
            Iso8859_2 => encoding_rs::ISO_8859_2,
            Iso8859_3 => encoding_rs::ISO_8859_3,
            Iso8859_4 => encoding_rs::ISO_8859_4,
            Iso8859_5 => encoding_rs::ISO_8859_5,
            Iso8859_6 => encoding_rs::ISO_8859_6,
            Iso8859_7 => encoding_rs::ISO_8859_7,
            Iso8859_8 => encoding_rs::ISO_8859_8,
            // Superset mappings; encoding_rs has no standalone tables for these
            Iso8859_9 => encoding_rs::WINDOWS_1254,
            Iso8859_11 => encoding_rs::WINDOWS_874,
            Iso8859_10 => encoding_rs::ISO_8859_10,
            Iso8859_13 => encoding_rs::ISO_8859_13,
            Iso8859_14 => encoding_rs::ISO_8859_14,
            Iso8859_15 => encoding_rs::ISO_8859_15,
            Iso8859_16 => encoding_rs::ISO_8859_16,
            ShiftJis => encoding_rs::SHIFT_JIS,
            Cp1250 => encoding_rs::WINDOWS_1250,
            Cp1251 => encoding_rs::WINDOWS_1251,
            Cp1252 => encoding_rs::WINDOWS_1252,
            Cp1256 => encoding_rs::WINDOWS_1256,
            UnicodeBigUnmarked => encoding_rs::UTF_16BE,
            Utf8 => encoding_rs::UTF_8,
            Big5 => encoding_rs::BIG5,
            Gb18030 => encoding_rs::GB18030,
            EucKr => encoding_rs::EUC_KR,
            Cp437 | Iso8859_1 | Ascii => return None,
        })
    }

    /// Transcode byte-mode bytes into text
    pub fn decode<'b>(self, bytes: &'b [u8]) -> Cow<'b, str> {
        match self {
            CharacterSetEci::Iso8859_1 | CharacterSetEci::Ascii => latin1(bytes),
            CharacterSetEci::Cp437 => Cow::Owned(
                bytes
                    .iter()
                    .map(|&b| if b < 0x80 { b as char } else { CP437_HIGH[(b - 0x80) as usize] })
                    .collect(),
            ),
            _ => match self.encoding() {
                Some(encoding) => encoding.decode_without_bom_handling(bytes).0,
                None => latin1(bytes),
            },
        }
    }
}

/// Text for byte-mode data outside any ECI: UTF-8 when valid, ISO-8859-1 otherwise
pub fn decode_default(bytes: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text),
        Err(_) => latin1(bytes),
    }
}

fn latin1(bytes: &[u8]) -> Cow<'_, str> {
    if bytes.is_ascii() {
        // ASCII is valid UTF-8
        return Cow::Borrowed(std::str::from_utf8(bytes).unwrap_or_default());
    }
    Cow::Owned(bytes.iter().map(|&b| b as char).collect())
}

fn parse_eci_value(bits: &mut BitSource<'_>) -> Result<u32> {
    let first_byte = bits.read_bits(8)?;
    if first_byte & 0x80 == 0 {
        // just one byte
        return Ok(first_byte & 0x7F);
    }
    if first_byte & 0xC0 == 0x80 {
        // two bytes
        let second_byte = bits.read_bits(8)?;
        return Ok(((first_byte & 0x3F) << 8) | second_byte);
    }
    if first_byte & 0xE0 == 0xC0 {
        // three bytes
        let second_third_bytes = bits.read_bits(16)?;
        return Ok(((first_byte & 0x1F) << 16) | second_third_bytes);
    }
    Err(QrError::FormatError("bad ECI designator"))
}

#[rustfmt::skip]
const CP437_HIGH: [char; 128] = [
    '\u{00C7}', '\u{00FC}', '\u{00E9}', '\u{00E2}', '\u{00E4}', '\u{00E0}', '\u{00E5}', '\u{00E7}',
    '\u{00EA}', '\u{00EB}', '\u{00E8}', '\u{00EF}', '\u{00EE}', '\u{00EC}', '\u{00C4}', '\u{00C5}',
    '\u{00C9}', '\u{00E6}', '\u{00C6}', '\u{00F4}', '\u{00F6}', '\u{00F2}', '\u{00FB}', '\u{00F9}',
    '\u{00FF}', '\u{00D6}', '\u{00DC}', '\u{00A2}', '\u{00A3}', '\u{00A5}', '\u{20A7}', '\u{0192}',
    '\u{00E1}', '\u{00ED}', '\u{00F3}', '\u{00FA}', '\u{00F1}', '\u{00D1}', '\u{00AA}', '\u{00BA}',
    '\u{00BF}', '\u{2310}', '\u{00AC}', '\u{00BD}', '\u{00BC}', '\u{00A1}', '\u{00AB}', '\u{00BB}',
    '\u{2591}', '\u{2592}', '\u{2593}', '\u{2502}', '\u{2524}', '\u{2561}', '\u{2562}', '\u{2556}',
    '\u{2555}', '\u{2563}', '\u{2551}', '\u{2557}', '\u{255D}', '\u{255C}', '\u{255B}', '\u{2510}',
    '\u{2514}', '\u{2534}', '\u{252C}', '\u{251C}', '\u{2500}', '\u{253C}', '\u{255E}', '\u{255F}',
    '\u{255A}', '\u{2554}', '\u{2569}', '\u{2566}', '\u{2560}', '\u{2550}', '\u{256C}', '\u{2567}',
    '\u{2568}', '\u{2564}', '\u{2565}', '\u{2559}', '\u{2558}', '\u{2552}', '\u{2553}', '\u{256B}',
    '\u{256A}', '\u{2518}', '\u{250C}', '\u{2588}', '\u{2584}', '\u{258C}', '\u{2590}', '\u{2580}',
    '\u{03B1}', '\u{00DF}', '\u{0393}', '\u{03C0}', '\u{03A3}', '\u{03C3}', '\u{00B5}', '\u{03C4}',
    '\u{03A6}', '\u{0398}', '\u{03A9}', '\u{03B4}', '\u{221E}', '\u{03C6}', '\u{03B5}', '\u{2229}',
    '\u{2261}', '\u{00B1}', '\u{2265}', '\u{2264}', '\u{2320}', '\u{2321}', '\u{00F7}', '\u{2248}',
    '\u{00B0}', '\u{2219}', '\u{00B7}', '\u{221A}', '\u{207F}', '\u{00B2}', '\u{25A0}', '\u{00A0}',
];
