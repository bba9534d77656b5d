use super::error::{QRError, QRResult};
use super::mask::MaskPattern;
use super::metadata::{ECLevel, Version};

// BCH codes for format & version info
//------------------------------------------------------------------------------

const FORMAT_GENERATOR: u32 = 0b10100110111;
const FORMAT_MASK: u32 = 0b101010000010010;
const FORMAT_EC_BITS: usize = 10;
const VERSION_GENERATOR: u32 = 0b1111100100101;
const VERSION_EC_BITS: usize = 12;

// Max bit errors within the minimum distance of both codes
pub const FORMAT_ERROR_CAPACITY: u32 = 3;
pub const VERSION_ERROR_CAPACITY: u32 = 3;

// Remainder of data * x^ec_bits divided by generator
fn bch_remainder(data: u32, generator: u32, ec_bits: usize) -> u32 {
    let gen_len = 32 - generator.leading_zeros() as usize;
    let mut rem = data << ec_bits;
    while rem != 0 && 32 - rem.leading_zeros() as usize >= gen_len {
        let shift = (32 - rem.leading_zeros() as usize) - gen_len;
        rem ^= generator << shift;
    }
    rem
}

fn bch_encode(data: u32, generator: u32, ec_bits: usize) -> u32 {
    (data << ec_bits) | bch_remainder(data, generator, ec_bits)
}

// Nearest valid codeword by hamming distance. Ties cannot be resolved.
fn bch_nearest(
    info: u32,
    payloads: impl Iterator<Item = u32>,
    generator: u32,
    ec_bits: usize,
) -> QRResult<(u32, u32)> {
    let mut best: Option<(u32, u32)> = None;
    let mut tied = false;
    for p in payloads {
        let dist = (info ^ bch_encode(p, generator, ec_bits)).count_ones();
        match best {
            Some((_, d)) if dist == d => tied = true,
            Some((_, d)) if dist > d => (),
            _ => {
                best = Some((p, dist));
                tied = false;
            }
        }
    }
    let best = best.ok_or(QRError::InvalidFormatInfo)?;
    if tied {
        return Err(QRError::MetadataAmbiguous);
    }
    Ok(best)
}

// Format info
//------------------------------------------------------------------------------

pub fn format_info(ec_level: ECLevel, mask: MaskPattern) -> u32 {
    let data = (ec_level.format_code() << 3) | *mask as u32;
    bch_encode(data, FORMAT_GENERATOR, FORMAT_EC_BITS) ^ FORMAT_MASK
}

pub fn parse_format_info(info: u32) -> QRResult<(ECLevel, MaskPattern)> {
    let unmasked = info ^ FORMAT_MASK;
    let (data, dist) = bch_nearest(unmasked, 0..32, FORMAT_GENERATOR, FORMAT_EC_BITS)?;
    if dist > FORMAT_ERROR_CAPACITY {
        return Err(QRError::InvalidFormatInfo);
    }
    let ec_level = ECLevel::from_format_code(data >> 3);
    let mask = MaskPattern::new((data & 0b111) as u8);
    Ok((ec_level, mask))
}

// Version info
//------------------------------------------------------------------------------

pub fn version_info(version: Version) -> u32 {
    bch_encode(*version as u32, VERSION_GENERATOR, VERSION_EC_BITS)
}

pub fn parse_version_info(info: u32) -> QRResult<Version> {
    let (data, dist) = bch_nearest(info, 0..64, VERSION_GENERATOR, VERSION_EC_BITS)
        .map_err(|e| match e {
            QRError::MetadataAmbiguous => e,
            _ => QRError::InvalidVersionInfo,
        })?;
    if dist > VERSION_ERROR_CAPACITY || !(7..=40).contains(&data) {
        return Err(QRError::InvalidVersionInfo);
    }
    Ok(Version(data as usize))
}
