use crate::common::error::{QRError, QRResult};

// Mode
//------------------------------------------------------------------------------

// Ordered by how many characters each mode can represent
#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord)]
pub enum Mode {
    Numeric = 0b0001,
    Alphanumeric = 0b0010,
    Byte = 0b0100,
}

impl TryFrom<u8> for Mode {
    type Error = QRError;
    fn try_from(code: u8) -> QRResult<Self> {
        match code {
            0b0001 => Ok(Self::Numeric),
            0b0010 => Ok(Self::Alphanumeric),
            0b0100 => Ok(Self::Byte),
            _ => Err(QRError::UnsupportedMode(code)),
        }
    }
}

impl Mode {
    // Narrowest mode that holds every byte. Empty data is numeric.
    pub fn detect(data: &[u8]) -> Self {
        data.iter()
            .map(|&b| MODES.iter().copied().find(|m| m.contains(b)).unwrap_or(Mode::Byte))
            .max()
            .unwrap_or(Mode::Numeric)
    }

    #[inline]
    fn numeric_digit(char: u8) -> u16 {
        debug_assert!(Mode::Numeric.contains(char), "Invalid numeric data: {char}");
        (char - b'0') as u16
    }

    #[inline]
    fn alphanumeric_digit(char: u8) -> u16 {
        debug_assert!(Mode::Alphanumeric.contains(char), "Invalid alphanumeric data: {char}");
        match char {
            b'0'..=b'9' => (char - b'0') as u16,
            b'A'..=b'Z' => (char - b'A' + 10) as u16,
            b' ' => 36,
            b'$' => 37,
            b'%' => 38,
            b'*' => 39,
            b'+' => 40,
            b'-' => 41,
            b'.' => 42,
            b'/' => 43,
            b':' => 44,
            _ => unreachable!("Invalid alphanumeric {char}"),
        }
    }

    #[inline]
    fn byte(&self, mode_digit: u8) -> QRResult<u8> {
        match self {
            Self::Numeric => match mode_digit {
                md @ 0..=9 => Ok(md + b'0'),
                _ => Err(QRError::CorruptDataSegment),
            },
            Self::Alphanumeric => match mode_digit {
                md @ 0..=9 => Ok(md + b'0'),
                md @ 10..=35 => Ok(md - 10 + b'A'),
                36 => Ok(b' '),
                37 => Ok(b'$'),
                38 => Ok(b'%'),
                39 => Ok(b'*'),
                40 => Ok(b'+'),
                41 => Ok(b'-'),
                42 => Ok(b'.'),
                43 => Ok(b'/'),
                44 => Ok(b':'),
                _ => Err(QRError::CorruptDataSegment),
            },
            Self::Byte => Ok(mode_digit),
        }
    }

    pub fn encode_chunk(&self, data: &[u8]) -> u16 {
        let len = data.len();
        match self {
            Self::Numeric => {
                debug_assert!(len <= 3, "Data is too long for numeric conversion: {len}");
                data.iter().fold(0_u16, |n, b| n * 10 + Self::numeric_digit(*b))
            }
            Self::Alphanumeric => {
                debug_assert!(len <= 2, "Data is too long for alphanumeric conversion: {len}");
                data.iter().fold(0_u16, |n, b| n * 45 + Self::alphanumeric_digit(*b))
            }
            Self::Byte => {
                debug_assert!(len == 1, "Data is too long for byte conversion: {len}");
                data[0] as u16
            }
        }
    }

    pub fn decode_chunk(&self, data: u16, bit_len: usize) -> QRResult<Vec<u8>> {
        match self {
            Self::Numeric => Self::decode_numeric_chunk(data, bit_len),
            Self::Alphanumeric => Self::decode_alphanumeric_chunk(data, bit_len),
            Self::Byte => {
                debug_assert!(bit_len == 8, "Invalid byte encoded length: {bit_len}");

                Ok(vec![data as u8])
            }
        }
    }

    fn decode_numeric_chunk(mut data: u16, bit_len: usize) -> QRResult<Vec<u8>> {
        debug_assert!(
            bit_len == 10 || bit_len == 7 || bit_len == 4,
            "Invalid numeric encoded length: {bit_len}"
        );

        let len = bit_len / 3;
        if data >= 10u16.pow(len as u32) {
            return Err(QRError::CorruptDataSegment);
        }
        let mut res = vec![0; len];
        for i in 0..len {
            res[len - 1 - i] = Mode::Numeric.byte((data % 10) as u8)?;
            data /= 10;
        }
        Ok(res)
    }

    fn decode_alphanumeric_chunk(mut data: u16, bit_len: usize) -> QRResult<Vec<u8>> {
        debug_assert!(
            bit_len == 11 || bit_len == 6,
            "Invalid alphanumeric encoded length: {bit_len}"
        );

        let len = bit_len / 5;
        if data >= 45u16.pow(len as u32) {
            return Err(QRError::CorruptDataSegment);
        }
        let mut res = vec![0; len];
        for i in 0..len {
            res[len - 1 - i] = Mode::Alphanumeric.byte((data % 45) as u8)?;
            data /= 45;
        }
        Ok(res)
    }

    pub fn contains(&self, byte: u8) -> bool {
        match self {
            Self::Numeric => byte.is_ascii_digit(),
            Self::Alphanumeric => {
                matches!(byte, b'0'..=b'9' | b'A'..=b'Z' | b' ' | b'$' | b'%' | b'*' | b'+' | b'-' | b'.' | b'/' | b':')
            }
            Self::Byte => true,
        }
    }

    pub fn encoded_len(&self, len: usize) -> usize {
        match *self {
            Self::Numeric => (len * 10).div_ceil(3),
            Self::Alphanumeric => (len * 11).div_ceil(2),
            Self::Byte => len * 8,
        }
    }
}

#[cfg(test)]
mod mode_tests {
    use test_case::test_case;

    use super::Mode;
    use super::Mode::*;
    use crate::common::error::QRError;

    #[test]
    fn test_comparison() {
        assert!(Numeric == Numeric);
        assert!(Numeric < Alphanumeric);
        assert!(Numeric < Byte);
        assert!(Alphanumeric == Alphanumeric);
        assert!(Alphanumeric < Byte);
        assert!(Byte == Byte);
    }

    #[test]
    fn test_try_from() {
        assert_eq!(Mode::try_from(1), Ok(Numeric));
        assert_eq!(Mode::try_from(2), Ok(Alphanumeric));
        assert_eq!(Mode::try_from(4), Ok(Byte));
        assert_eq!(Mode::try_from(8), Err(QRError::UnsupportedMode(8)));
        assert_eq!(Mode::try_from(0), Err(QRError::UnsupportedMode(0)));
    }

    #[test_case("", Numeric)]
    #[test_case("01234567", Numeric)]
    #[test_case("AC-42", Alphanumeric)]
    #[test_case("HELLO WORLD", Alphanumeric)]
    #[test_case("Hello, world!", Byte)]
    #[test_case("12345a", Byte)]
    fn test_detect(data: &str, exp: Mode) {
        assert_eq!(Mode::detect(data.as_bytes()), exp);
    }

    #[test]
    fn test_numeric_digit() {
        assert_eq!(Mode::numeric_digit(b'0'), 0);
        assert_eq!(Mode::numeric_digit(b'9'), 9);
    }

    #[test]
    #[should_panic]
    fn test_invalid_numeric_digit() {
        Mode::numeric_digit(b'A');
    }

    #[test]
    fn test_alphanumeric_digit() {
        assert_eq!(Mode::alphanumeric_digit(b'0'), 0);
        assert_eq!(Mode::alphanumeric_digit(b'9'), 9);
        assert_eq!(Mode::alphanumeric_digit(b'A'), 10);
        assert_eq!(Mode::alphanumeric_digit(b'Z'), 35);
        assert_eq!(Mode::alphanumeric_digit(b' '), 36);
        assert_eq!(Mode::alphanumeric_digit(b':'), 44);
    }

    #[test]
    #[should_panic]
    fn test_invalid_alphanumeric_digit() {
        Mode::alphanumeric_digit(b'a');
    }

    #[test]
    fn test_alphanumeric_to_byte() {
        assert_eq!(Alphanumeric.byte(0), Ok(b'0'));
        assert_eq!(Alphanumeric.byte(10), Ok(b'A'));
        assert_eq!(Alphanumeric.byte(35), Ok(b'Z'));
        assert_eq!(Alphanumeric.byte(44), Ok(b':'));
        assert_eq!(Alphanumeric.byte(45), Err(QRError::CorruptDataSegment));
        assert_eq!(Numeric.byte(10), Err(QRError::CorruptDataSegment));
    }

    #[test]
    fn test_numeric_encoding() {
        assert_eq!(Numeric.encode_chunk("012".as_bytes()), 0b0000001100);
        assert_eq!(Numeric.encode_chunk("345".as_bytes()), 0b0101011001);
        assert_eq!(Numeric.encode_chunk("901".as_bytes()), 0b1110000101);
        assert_eq!(Numeric.encode_chunk("67".as_bytes()), 0b1000011);
        assert_eq!(Numeric.encode_chunk("8".as_bytes()), 0b1000);
    }

    #[test]
    #[should_panic]
    fn test_invalid_numeric_encoding() {
        Numeric.encode_chunk("1234".as_bytes());
    }

    #[test_case("012", 10)]
    #[test_case("901", 10)]
    #[test_case("67", 7)]
    #[test_case("8", 4)]
    fn test_numeric_decoding(data: &str, bit_len: usize) {
        let encoded = Numeric.encode_chunk(data.as_bytes());
        assert_eq!(Numeric.decode_chunk(encoded, bit_len), Ok(data.as_bytes().to_vec()));
    }

    #[test_case(1000, 10)]
    #[test_case(100, 7)]
    #[test_case(10, 4)]
    fn test_numeric_decoding_out_of_range(data: u16, bit_len: usize) {
        assert_eq!(Numeric.decode_chunk(data, bit_len), Err(QRError::CorruptDataSegment));
    }

    #[test]
    fn test_alphanumeric_encoding() {
        assert_eq!(Alphanumeric.encode_chunk("AC".as_bytes()), 0b00111001110);
        assert_eq!(Alphanumeric.encode_chunk("-4".as_bytes()), 0b11100111001);
        assert_eq!(Alphanumeric.encode_chunk("2".as_bytes()), 0b000010);
    }

    #[test]
    #[should_panic]
    fn test_invalid_alphanumeric_encoding() {
        Alphanumeric.encode_chunk("1234".as_bytes());
    }

    #[test_case("AC", 11)]
    #[test_case("-4", 11)]
    #[test_case("2", 6)]
    fn test_alphanumeric_decoding(data: &str, bit_len: usize) {
        let encoded = Alphanumeric.encode_chunk(data.as_bytes());
        assert_eq!(Alphanumeric.decode_chunk(encoded, bit_len), Ok(data.as_bytes().to_vec()));
    }

    #[test]
    fn test_alphanumeric_decoding_out_of_range() {
        assert_eq!(Alphanumeric.decode_chunk(2025, 11), Err(QRError::CorruptDataSegment));
        assert_eq!(Alphanumeric.decode_chunk(45, 6), Err(QRError::CorruptDataSegment));
    }

    #[test]
    fn test_is_numeric() {
        assert!(Numeric.contains(b'0'));
        assert!(Numeric.contains(b'9'));
        assert!(!Numeric.contains(b'A'));
        assert!(!Numeric.contains(b' '));
    }

    #[test]
    fn test_is_alphanumeric() {
        assert!(Alphanumeric.contains(b'0'));
        assert!(Alphanumeric.contains(b'Z'));
        assert!(Alphanumeric.contains(b' '));
        assert!(Alphanumeric.contains(b':'));
        assert!(!Alphanumeric.contains(b'a'));
        assert!(!Alphanumeric.contains(b'@'));
        assert!(!Alphanumeric.contains(b'('));
    }

    #[test]
    fn test_encoded_len() {
        assert_eq!(Numeric.encoded_len(3), 10);
        assert_eq!(Numeric.encoded_len(2), 7);
        assert_eq!(Numeric.encoded_len(1), 4);
        assert_eq!(Numeric.encoded_len(8), 27);
        assert_eq!(Alphanumeric.encoded_len(2), 11);
        assert_eq!(Alphanumeric.encoded_len(1), 6);
        assert_eq!(Alphanumeric.encoded_len(5), 28);
        assert_eq!(Byte.encoded_len(1), 8);
    }
}

// Segment
//------------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Segment<'a> {
    pub mode: Mode,
    pub mode_bits: usize, // Bit len of mode
    pub len_bits: usize,  // Bit len of char count
    pub data: &'a [u8],   // Reference to raw data
}

impl<'a> Segment<'a> {
    pub fn new(mode: Mode, mode_bits: usize, len_bits: usize, data: &'a [u8]) -> Self {
        Self { mode, mode_bits, len_bits, data }
    }

    pub fn bit_len(&self) -> usize {
        let encoded_bits = self.mode.encoded_len(self.data.len());
        self.mode_bits + self.len_bits + encoded_bits
    }
}


// Global constants
//------------------------------------------------------------------------------

pub static PADDING_CODEWORDS: [u8; 2] = [0b1110_1100, 0b0001_0001];

pub static MODES: [Mode; 3] = [Mode::Numeric, Mode::Alphanumeric, Mode::Byte];
