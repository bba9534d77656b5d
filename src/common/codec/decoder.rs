pub use decode::*;

// Reader for encoded data
//------------------------------------------------------------------------------

mod reader {
    use std::cmp::min;

    use crate::common::bit_utils::BitStream;
    use crate::common::codec::Mode;
    use crate::common::error::{QRError, QRResult};
    use crate::common::metadata::Version;

    // Returns false once the terminator is reached
    pub fn read_segment(inp: &mut BitStream, ver: Version, out: &mut Vec<u8>) -> QRResult<bool> {
        let (mode, char_cnt) = match take_header(inp, ver)? {
            Some(header) => header,
            None => return Ok(false),
        };

        match mode {
            Mode::Numeric => read_numeric(inp, char_cnt, out)?,
            Mode::Alphanumeric => read_alphanumeric(inp, char_cnt, out)?,
            Mode::Byte => read_byte(inp, char_cnt, out)?,
        };

        Ok(true)
    }

    fn take_header(inp: &mut BitStream, ver: Version) -> QRResult<Option<(Mode, usize)>> {
        // Fewer than 4 bits left means the terminator was truncated
        let mode_bits = match inp.take_bits(ver.mode_bits()) {
            Some(0) | None => return Ok(None),
            Some(mb) => mb as u8,
        };

        let mode = Mode::try_from(mode_bits).map_err(|_| QRError::UnknownCharacterSet(mode_bits))?;

        let len_bits = ver.char_cnt_bits(mode);
        let char_cnt = inp.take_bits(len_bits).ok_or(QRError::CorruptDataSegment)?;

        Ok(Some((mode, char_cnt.into())))
    }

    fn read_numeric(inp: &mut BitStream, mut char_cnt: usize, out: &mut Vec<u8>) -> QRResult<()> {
        while char_cnt > 0 {
            let bit_len = Mode::Numeric.encoded_len(min(3, char_cnt));
            let chunk = inp.take_bits(bit_len).ok_or(QRError::CorruptDataSegment)?;
            out.extend(Mode::Numeric.decode_chunk(chunk, bit_len)?);
            char_cnt -= min(3, char_cnt);
        }

        Ok(())
    }

    fn read_alphanumeric(
        inp: &mut BitStream,
        mut char_cnt: usize,
        out: &mut Vec<u8>,
    ) -> QRResult<()> {
        while char_cnt > 0 {
            let bit_len = Mode::Alphanumeric.encoded_len(min(2, char_cnt));
            let chunk = inp.take_bits(bit_len).ok_or(QRError::CorruptDataSegment)?;
            out.extend(Mode::Alphanumeric.decode_chunk(chunk, bit_len)?);
            char_cnt -= min(2, char_cnt);
        }

        Ok(())
    }

    fn read_byte(inp: &mut BitStream, char_cnt: usize, out: &mut Vec<u8>) -> QRResult<()> {
        if inp.remaining() < char_cnt * 8 {
            return Err(QRError::CorruptDataSegment);
        }
        out.reserve(char_cnt);
        for _ in 0..char_cnt {
            let chunk = inp.take_bits(8).ok_or(QRError::CorruptDataSegment)?;
            out.extend(Mode::Byte.decode_chunk(chunk, 8)?);
        }

        Ok(())
    }

    #[cfg(test)]
    mod reader_tests {
        use super::{read_alphanumeric, read_byte, read_numeric, read_segment, take_header};
        use crate::common::bit_utils::BitStream;
        use crate::common::codec::{encode_with_version, Mode};
        use crate::common::error::QRError;
        use crate::common::metadata::{ECLevel, Version};

        #[test]
        fn test_take_header_v1() {
            let data = vec![0b00011111, 0b11111100, 0b10111111, 0b11101001, 0b11111110];
            let ver = Version::new(1).unwrap();
            let mut bs = BitStream::from_bytes(&data);
            let header = take_header(&mut bs, ver).unwrap();
            assert_eq!(header, Some((Mode::Numeric, 0b11_1111_1111)));
            let header = take_header(&mut bs, ver).unwrap();
            assert_eq!(header, Some((Mode::Alphanumeric, 0b1_1111_1111)));
            let header = take_header(&mut bs, ver).unwrap();
            assert_eq!(header, Some((Mode::Byte, 0b11111111)));
        }

        #[test]
        fn test_take_header_v10() {
            let data = vec![
                0b00011111, 0b11111111, 0b00101111, 0b11111110, 0b10011111, 0b11111111, 0b11100000,
            ];
            let ver = Version::new(10).unwrap();
            let mut bs = BitStream::from_bytes(&data);
            let header = take_header(&mut bs, ver).unwrap();
            assert_eq!(header, Some((Mode::Numeric, 0b1111_1111_1111)));
            let header = take_header(&mut bs, ver).unwrap();
            assert_eq!(header, Some((Mode::Alphanumeric, 0b111_1111_1111)));
            let header = take_header(&mut bs, ver).unwrap();
            assert_eq!(header, Some((Mode::Byte, 0b11111111_11111111)));
        }

        #[test]
        fn test_take_header_v27() {
            let data = vec![
                0b00011111, 0b11111111, 0b11001011, 0b11111111, 0b11101001, 0b11111111, 0b11111110,
            ];
            let ver = Version::new(27).unwrap();
            let mut bs = BitStream::from_bytes(&data);
            let header = take_header(&mut bs, ver).unwrap();
            assert_eq!(header, Some((Mode::Numeric, 0b11_1111_1111_1111)));
            let header = take_header(&mut bs, ver).unwrap();
            assert_eq!(header, Some((Mode::Alphanumeric, 0b1_1111_1111_1111)));
            let header = take_header(&mut bs, ver).unwrap();
            assert_eq!(header, Some((Mode::Byte, 0b11111111_11111111)));
        }

        #[test]
        fn test_take_header_terminator() {
            let ver = Version::new(1).unwrap();
            let mut bs = BitStream::from_bytes(&[0b00001110]);
            assert_eq!(take_header(&mut bs, ver), Ok(None));
        }

        #[test]
        fn test_take_header_unknown_mode() {
            let ver = Version::new(1).unwrap();
            // ECI and Kanji indicators are not understood
            let mut bs = BitStream::from_bytes(&[0b01110000, 0]);
            assert_eq!(take_header(&mut bs, ver), Err(QRError::UnknownCharacterSet(0b0111)));
            let mut bs = BitStream::from_bytes(&[0b10000000, 0]);
            assert_eq!(take_header(&mut bs, ver), Err(QRError::UnknownCharacterSet(0b1000)));
        }

        #[test]
        fn test_read_numeric() {
            let ver = Version::new(1).unwrap();
            let mut bs = encode_with_version(b"12345", ver, ECLevel::L, None).unwrap();
            let mut out = Vec::new();

            take_header(&mut bs, ver).unwrap();

            read_numeric(&mut bs, 3, &mut out).unwrap();
            assert_eq!(out, b"123");
            out.clear();

            read_numeric(&mut bs, 2, &mut out).unwrap();
            assert_eq!(out, b"45");
        }

        #[test]
        fn test_read_alphanumeric() {
            let ver = Version::new(1).unwrap();
            let mut bs = encode_with_version(b"AC-", ver, ECLevel::L, None).unwrap();
            let mut out = Vec::new();

            take_header(&mut bs, ver).unwrap();

            read_alphanumeric(&mut bs, 2, &mut out).unwrap();
            assert_eq!(out, b"AC");
            out.clear();

            read_alphanumeric(&mut bs, 1, &mut out).unwrap();
            assert_eq!(out, b"-");
        }

        #[test]
        fn test_read_byte() {
            let ver = Version::new(1).unwrap();
            let mut bs = encode_with_version(b"abc", ver, ECLevel::L, None).unwrap();
            let mut out = Vec::new();

            take_header(&mut bs, ver).unwrap();

            read_byte(&mut bs, 2, &mut out).unwrap();
            assert_eq!(out, b"ab");
            out.clear();

            read_byte(&mut bs, 1, &mut out).unwrap();
            assert_eq!(out, b"c");
        }

        #[test]
        fn test_read_byte_truncated() {
            let mut bs = BitStream::from_bytes(&[b'a', b'b']);
            let mut out = Vec::new();
            assert_eq!(read_byte(&mut bs, 3, &mut out), Err(QRError::CorruptDataSegment));
        }

        #[test]
        fn test_read_segment() {
            let ver = Version::new(1).unwrap();
            let mut bs = encode_with_version(b"HELLO WORLD", ver, ECLevel::Q, None).unwrap();
            let mut out = Vec::new();
            assert_eq!(read_segment(&mut bs, ver, &mut out), Ok(true));
            assert_eq!(out, b"HELLO WORLD");
            assert_eq!(read_segment(&mut bs, ver, &mut out), Ok(false));
        }
    }
}

// Decoder
//------------------------------------------------------------------------------

pub mod decode {
    use encoding_rs::WINDOWS_1252;

    use super::reader::read_segment;
    use crate::common::bit_utils::BitStream;
    use crate::common::error::QRResult;
    use crate::common::metadata::Version;

    // Reads segments until the terminator or the end of the stream
    pub fn decode(encoded: &mut BitStream, ver: Version) -> QRResult<Vec<u8>> {
        let mut res = Vec::with_capacity(encoded.len() >> 3);
        let mut seg_cnt = 0;
        while read_segment(encoded, ver, &mut res)? {
            seg_cnt += 1;
        }
        log::debug!("Decoded {} bytes from {seg_cnt} segment(s)", res.len());
        Ok(res)
    }

    // Byte mode defaults to ISO-8859-1, read here as its Windows-1252 superset
    pub fn decode_text(bytes: &[u8]) -> String {
        match std::str::from_utf8(bytes) {
            Ok(text) => text.to_owned(),
            Err(_) => WINDOWS_1252.decode_without_bom_handling(bytes).0.into_owned(),
        }
    }

}
