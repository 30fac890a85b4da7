//! Minimal QR encoder used to build synthetic test symbols
//!
//! Built from the crate's own tables (versions, format codes, masks, GF(256))
//! so the tests exercise the decoder against symbols laid out the standard way.

#![allow(dead_code)]

use image::{GrayImage, Luma};
use qrcore::decoder::data_mask::DataMask;
use qrcore::decoder::format::FormatInformation;
use qrcore::decoder::galois::{GenericGFPoly, qr_code_field_256};
use qrcore::decoder::modes::Mode;
use qrcore::decoder::version::{VERSION_DECODE_INFO, Version};
use qrcore::utils::geometry::PerspectiveTransform;
use qrcore::{BitMatrix, ECLevel, Point};

const ALPHANUMERIC: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ $%*+-./:";

/// Pixels per module used by `symbol_image`
pub const MODULE_PX: usize = 4;
/// Quiet zone width in modules
pub const QUIET_ZONE: usize = 4;

/// One segment of the data stream
#[derive(Debug, Clone, Copy)]
pub enum Segment<'a> {
    Numeric(&'a str),
    Alphanumeric(&'a str),
    Byte(&'a [u8]),
    Eci(u32),
    StructuredAppend { sequence: u8, parity: u8 },
    Fnc1First,
}

/// MSB-first bit accumulator
#[derive(Default)]
pub struct BitWriter {
    bits: Vec<bool>,
}

impl BitWriter {
    pub fn push(&mut self, value: u32, width: usize) {
        for i in (0..width).rev() {
            self.bits.push((value >> i) & 1 == 1);
        }
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.bits
            .chunks(8)
            .map(|chunk| {
                chunk
                    .iter()
                    .enumerate()
                    .fold(0u8, |byte, (i, &bit)| byte | ((bit as u8) << (7 - i)))
            })
            .collect()
    }
}

fn version(number: u32) -> &'static Version {
    Version::for_number(number).unwrap()
}

/// Number of data codewords a version and level can carry
pub fn data_capacity(version_number: u32, ec_level: ECLevel) -> usize {
    version(version_number)
        .ec_blocks_for_level(ec_level)
        .blocks()
        .iter()
        .map(|ecb| ecb.count() * ecb.data_codewords())
        .sum()
}

/// Segments, terminator and padding as data codewords
pub fn data_codewords(version_number: u32, ec_level: ECLevel, segments: &[Segment]) -> Vec<u8> {
    let v = version(version_number);
    let mut w = BitWriter::default();
    for segment in segments {
        match *segment {
            Segment::Numeric(digits) => {
                w.push(0x1, 4);
                w.push(digits.len() as u32, Mode::Numeric.character_count_bits(v));
                for group in digits.as_bytes().chunks(3) {
                    let value = group.iter().fold(0, |acc, d| acc * 10 + u32::from(d - b'0'));
                    w.push(value, [0, 4, 7, 10][group.len()]);
                }
            }
            Segment::Alphanumeric(text) => {
                w.push(0x2, 4);
                w.push(text.len() as u32, Mode::Alphanumeric.character_count_bits(v));
                let values: Vec<u32> = text
                    .chars()
                    .map(|c| ALPHANUMERIC.find(c).unwrap() as u32)
                    .collect();
                for pair in values.chunks(2) {
                    match pair {
                        [a, b] => w.push(a * 45 + b, 11),
                        [a] => w.push(*a, 6),
                        _ => unreachable!(),
                    }
                }
            }
            Segment::Byte(bytes) => {
                w.push(0x4, 4);
                w.push(bytes.len() as u32, Mode::Byte.character_count_bits(v));
                for &b in bytes {
                    w.push(u32::from(b), 8);
                }
            }
            Segment::Eci(value) => {
                w.push(0x7, 4);
                if value < 128 {
                    w.push(value, 8);
                } else if value < 16384 {
                    w.push(0b10 << 14 | value, 16);
                } else {
                    w.push(0b110 << 21 | value, 24);
                }
            }
            Segment::StructuredAppend { sequence, parity } => {
                w.push(0x3, 4);
                w.push(u32::from(sequence), 8);
                w.push(u32::from(parity), 8);
            }
            Segment::Fnc1First => w.push(0x5, 4),
        }
    }

    let capacity = data_capacity(version_number, ec_level);
    assert!(w.len() <= capacity * 8, "payload too long for version");
    // Terminator, then byte alignment
    w.push(0, (capacity * 8 - w.len()).min(4));
    w.push(0, (8 - w.len() % 8) % 8);

    let mut bytes = w.to_bytes();
    for pad in [0xEC, 0x11].into_iter().cycle() {
        if bytes.len() >= capacity {
            break;
        }
        bytes.push(pad);
    }
    bytes
}

/// Reed-Solomon EC codewords for one block
pub fn ec_codewords(data: &[u8], num_ec: usize) -> Vec<u8> {
    let field = qr_code_field_256();
    let mut generator = GenericGFPoly::new(field, &[1]).unwrap();
    for i in 0..num_ec {
        generator = generator.multiply(&GenericGFPoly::new(field, &[1, field.exp(i)]).unwrap());
    }
    let coefficients: Vec<u16> = data.iter().map(|&b| u16::from(b)).collect();
    let info = GenericGFPoly::new(field, &coefficients).unwrap();
    let (_, remainder) = info.multiply_by_monomial(num_ec, 1).divide(&generator).unwrap();
    let remainder = remainder.coefficients();
    let mut ec = vec![0u8; num_ec - remainder.len()];
    ec.extend(remainder.iter().map(|&c| c as u8));
    ec
}

/// Split data into blocks, add EC and interleave into the final codeword order
pub fn encode(version_number: u32, ec_level: ECLevel, segments: &[Segment]) -> Vec<u8> {
    let data = data_codewords(version_number, ec_level, segments);
    let ec_blocks = version(version_number).ec_blocks_for_level(ec_level);
    let num_ec = ec_blocks.ec_codewords_per_block();

    let mut blocks: Vec<(Vec<u8>, Vec<u8>)> = Vec::new();
    let mut offset = 0;
    for ecb in ec_blocks.blocks() {
        for _ in 0..ecb.count() {
            let block = data[offset..offset + ecb.data_codewords()].to_vec();
            offset += ecb.data_codewords();
            let ec = ec_codewords(&block, num_ec);
            blocks.push((block, ec));
        }
    }

    let max_data = blocks.iter().map(|(d, _)| d.len()).max().unwrap();
    let mut result = Vec::with_capacity(version(version_number).total_codewords());
    for i in 0..max_data {
        for (block, _) in &blocks {
            if let Some(&b) = block.get(i) {
                result.push(b);
            }
        }
    }
    for i in 0..num_ec {
        for (_, ec) in &blocks {
            result.push(ec[i]);
        }
    }
    result
}

fn draw_finder(modules: &mut BitMatrix, left: usize, top: usize) {
    for y in 0..7 {
        for x in 0..7 {
            let ring = x.min(y).min(6 - x).min(6 - y);
            modules.set(left + x, top + y, ring != 1);
        }
    }
}

fn draw_alignment(modules: &mut BitMatrix, cx: usize, cy: usize) {
    for dy in 0..5 {
        for dx in 0..5 {
            let ring = dx.min(dy).min(4 - dx).min(4 - dy);
            modules.set(cx - 2 + dx, cy - 2 + dy, ring != 1);
        }
    }
}

/// Lay codewords into a module matrix with function patterns, mask,
/// format and version information
pub fn place(version_number: u32, ec_level: ECLevel, mask: u8, codewords: &[u8]) -> BitMatrix {
    let v = version(version_number);
    let dimension = v.dimension_for_version();
    let function = v.build_function_pattern();
    let mut modules = BitMatrix::square(dimension);

    // Finder patterns; separators stay light
    draw_finder(&mut modules, 0, 0);
    draw_finder(&mut modules, dimension - 7, 0);
    draw_finder(&mut modules, 0, dimension - 7);

    // Timing patterns
    for k in 8..dimension - 8 {
        modules.set(k, 6, k % 2 == 0);
        modules.set(6, k, k % 2 == 0);
    }

    let centers = v.alignment_pattern_centers();
    let last = centers.len().saturating_sub(1);
    for (xi, &cx) in centers.iter().enumerate() {
        for (yi, &cy) in centers.iter().enumerate() {
            let finder_corner = (xi == 0 && (yi == 0 || yi == last)) || (xi == last && yi == 0);
            if !finder_corner {
                draw_alignment(&mut modules, cx, cy);
            }
        }
    }

    // Dark module
    modules.set(8, dimension - 8, true);

    // Data in the zig-zag order the reader walks, masked as it goes
    let data_mask = DataMask::for_reference(mask);
    let total_bits = codewords.len() * 8;
    let bit_at = |n: usize| n < total_bits && (codewords[n / 8] >> (7 - n % 8)) & 1 == 1;
    let mut n = 0;
    let mut reading_up = true;
    let mut j = dimension as isize - 1;
    while j > 0 {
        if j == 6 {
            j -= 1;
        }
        let column = j as usize;
        for count in 0..dimension {
            let i = if reading_up { dimension - 1 - count } else { count };
            for col in 0..2 {
                let x = column - col;
                if !function.is_function(x, i) {
                    modules.set(x, i, bit_at(n) ^ data_mask.is_masked(i, x));
                    n += 1;
                }
            }
        }
        reading_up = !reading_up;
        j -= 2;
    }

    // Format information, both copies, most significant bit first
    let format = FormatInformation::encode(ec_level, mask);
    let mut copy1: Vec<(usize, usize)> = (0..6).map(|i| (i, 8)).collect();
    copy1.extend([(7, 8), (8, 8), (8, 7)]);
    copy1.extend((0..=5).rev().map(|j| (8, j)));
    let mut copy2: Vec<(usize, usize)> = (dimension - 7..dimension).rev().map(|j| (8, j)).collect();
    copy2.extend((dimension - 8..dimension).map(|i| (i, 8)));
    for positions in [&copy1, &copy2] {
        for (k, &(x, y)) in positions.iter().enumerate() {
            modules.set(x, y, (format >> (14 - k)) & 1 == 1);
        }
    }

    // Version information from version 7 up
    if version_number >= 7 {
        let bits = VERSION_DECODE_INFO[version_number as usize - 7];
        let mut k = 0;
        for a in (0..=5).rev() {
            for b in (dimension - 11..dimension - 8).rev() {
                let bit = (bits >> (17 - k)) & 1 == 1;
                // Top right block, then its transpose at the bottom left
                modules.set(b, a, bit);
                modules.set(a, b, bit);
                k += 1;
            }
        }
    }

    modules
}

/// Module matrix for a payload
pub fn symbol(version_number: u32, ec_level: ECLevel, mask: u8, segments: &[Segment]) -> BitMatrix {
    place(version_number, ec_level, mask, &encode(version_number, ec_level, segments))
}

/// Scale a module matrix up into an image with a light quiet zone
pub fn render(modules: &BitMatrix, module_px: usize, quiet_zone: usize) -> BitMatrix {
    let size = (modules.width() + 2 * quiet_zone) * module_px;
    BitMatrix::from_fn(size, size, |x, y| {
        let (mx, my) = (x / module_px, y / module_px);
        mx >= quiet_zone
            && my >= quiet_zone
            && modules.get(mx - quiet_zone, my - quiet_zone)
    })
}

/// Rendered image of a payload at `MODULE_PX` pixels per module
pub fn symbol_image(version_number: u32, ec_level: ECLevel, mask: u8, segments: &[Segment]) -> BitMatrix {
    render(&symbol(version_number, ec_level, mask, segments), MODULE_PX, QUIET_ZONE)
}

/// Black-on-white grayscale copy of a bi-level image
pub fn to_gray(image: &BitMatrix) -> GrayImage {
    GrayImage::from_fn(image.width() as u32, image.height() as u32, |x, y| {
        if image.get(x as usize, y as usize) { Luma([0]) } else { Luma([255]) }
    })
}

/// Threshold a grayscale image back to bi-level
pub fn threshold(gray: &GrayImage) -> BitMatrix {
    BitMatrix::from_fn(gray.width() as usize, gray.height() as usize, |x, y| {
        gray.get_pixel(x as u32, y as u32)[0] < 128
    })
}

/// Reflect about the main diagonal
pub fn transposed(image: &BitMatrix) -> BitMatrix {
    BitMatrix::from_fn(image.height(), image.width(), |x, y| image.get(y, x))
}

/// Project an image onto the quadrilateral `corners` (top-left, top-right,
/// bottom-right, bottom-left) of a `width` x `height` canvas
pub fn warp(image: &BitMatrix, corners: [(f32, f32); 4], width: usize, height: usize) -> BitMatrix {
    let (w, h) = (image.width() as f32, image.height() as f32);
    let source = [
        Point::new(0.0, 0.0),
        Point::new(w, 0.0),
        Point::new(w, h),
        Point::new(0.0, h),
    ];
    let target = corners.map(|(x, y)| Point::new(x, y));
    let transform = PerspectiveTransform::quadrilateral_to_quadrilateral(&target, &source);
    BitMatrix::from_fn(width, height, |x, y| {
        let p = transform.transform(&Point::new(x as f32 + 0.5, y as f32 + 0.5));
        p.x >= 0.0 && p.y >= 0.0 && p.x < w && p.y < h && image.get(p.x as usize, p.y as usize)
    })
}
