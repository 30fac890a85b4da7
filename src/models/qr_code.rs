use std::fmt;

use super::Point;

/// Error correction level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ECLevel {
    /// Low (~7% recovery capacity)
    L,
    /// Medium (~15% recovery capacity)
    M,
    /// Quartile (~25% recovery capacity)
    Q,
    /// High (~30% recovery capacity)
    H,
}

impl ECLevel {
    /// Get error correction level from the two format bits (00=M, 01=L, 10=H, 11=Q)
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0x03 {
            0 => ECLevel::M,
            1 => ECLevel::L,
            2 => ECLevel::H,
            _ => ECLevel::Q,
        }
    }

    /// The two format bits encoding this level
    pub fn bits(self) -> u8 {
        match self {
            ECLevel::M => 0,
            ECLevel::L => 1,
            ECLevel::H => 2,
            ECLevel::Q => 3,
        }
    }

    /// Position in L, M, Q, H order (index into per-version EC block tables)
    pub fn ordinal(self) -> usize {
        match self {
            ECLevel::L => 0,
            ECLevel::M => 1,
            ECLevel::Q => 2,
            ECLevel::H => 3,
        }
    }

    /// Single-letter name
    pub fn label(self) -> &'static str {
        match self {
            ECLevel::L => "L",
            ECLevel::M => "M",
            ECLevel::Q => "Q",
            ECLevel::H => "H",
        }
    }
}

impl fmt::Display for ECLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Position of this symbol in a structured-append sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StructuredAppend {
    /// Index (high nibble) and total count minus one (low nibble)
    pub sequence: u8,
    /// XOR parity of the whole message
    pub parity: u8,
}

/// Double-byte character set of a Kanji or Hanzi segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoubleByteCharset {
    /// Kanji mode
    ShiftJis,
    /// Hanzi mode, GB2312 subset
    Gb2312,
}

/// Raw byte pairs unpacked from a Kanji or Hanzi segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoubleByteSegment {
    /// Character set the pairs belong to
    pub charset: DoubleByteCharset,
    /// Big-endian byte pairs, two per character
    pub bytes: Vec<u8>,
}

/// Outcome of decoding one sampled symbol
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecoderResult {
    /// Corrected data codewords
    pub raw_bytes: Vec<u8>,
    /// Decoded text
    pub text: String,
    /// Verbatim bytes of every byte-mode segment
    pub byte_segments: Vec<Vec<u8>>,
    /// Kanji/Hanzi byte pairs, not transcoded into `text`
    pub double_byte_segments: Vec<DoubleByteSegment>,
    /// Error correction level of the symbol
    pub ec_level: ECLevel,
    /// Version number (1-40)
    pub version: u32,
    /// Structured-append header, if present
    pub structured_append: Option<StructuredAppend>,
    /// Number of codewords repaired by Reed-Solomon
    pub errors_corrected: usize,
    /// Decoded from the transposed symbol
    pub mirrored: bool,
}

impl DecoderResult {
    /// Error correction level as "L", "M", "Q" or "H"
    pub fn ec_level_label(&self) -> &'static str {
        self.ec_level.label()
    }
}

/// Detected and decoded QR code
#[derive(Debug, Clone, PartialEq)]
pub struct QRCode {
    /// Decoded payload
    pub result: DecoderResult,
    /// Bottom-left, top-left, top-right finder centers, then the alignment center if found
    pub position: Vec<Point>,
}

impl QRCode {
    /// Decoded text
    pub fn content(&self) -> &str {
        &self.result.text
    }
}
