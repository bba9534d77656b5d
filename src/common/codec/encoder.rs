pub use encode::*;

// Encoder
//------------------------------------------------------------------------------

pub mod encode {
    use super::writer::{pad_remaining_capacity, push_segment, push_terminator};
    use crate::common::bit_utils::BitStream;
    use crate::common::codec::{Mode, Segment};
    use crate::common::error::{QRError, QRResult};
    use crate::common::metadata::{ECLevel, Version};

    pub fn encode(
        data: &[u8],
        ecl: ECLevel,
        mode: Option<Mode>,
    ) -> QRResult<(BitStream, Version)> {
        let mode = resolve_mode(data, mode)?;
        let ver = find_min_version(data, mode, ecl)?;
        let bs = encode_with_version(data, ver, ecl, Some(mode))?;
        Ok((bs, ver))
    }

    pub fn encode_with_version(
        data: &[u8],
        ver: Version,
        ecl: ECLevel,
        mode: Option<Mode>,
    ) -> QRResult<BitStream> {
        let mode = resolve_mode(data, mode)?;
        let seg = build_segment(data, mode, ver);
        let bcap = ver.data_bit_capacity(ecl);
        if !fits(&seg, bcap) {
            return Err(QRError::CapacityExceeded);
        }

        let mut bs = BitStream::new(bcap);
        push_segment(seg, &mut bs);
        push_terminator(&mut bs);
        pad_remaining_capacity(&mut bs);
        Ok(bs)
    }

    fn resolve_mode(data: &[u8], mode: Option<Mode>) -> QRResult<Mode> {
        match mode {
            Some(m) if data.iter().all(|&b| m.contains(b)) => Ok(m),
            Some(_) => Err(QRError::InvalidChar),
            None => Ok(Mode::detect(data)),
        }
    }

    fn build_segment(data: &[u8], mode: Mode, ver: Version) -> Segment {
        Segment::new(mode, ver.mode_bits(), ver.char_cnt_bits(mode), data)
    }

    // Payload must fit in the data capacity and its count in the char count field
    fn fits(seg: &Segment, bcap: usize) -> bool {
        seg.bit_len() <= bcap && seg.data.len() < (1 << seg.len_bits)
    }

    fn find_min_version(data: &[u8], mode: Mode, ecl: ECLevel) -> QRResult<Version> {
        for v in *Version::MIN..=*Version::MAX {
            let ver = Version(v);
            let seg = build_segment(data, mode, ver);
            if fits(&seg, ver.data_bit_capacity(ecl)) {
                log::debug!("Selected version {v} for {} bytes in {mode:?} mode", data.len());
                return Ok(ver);
            }
        }
        Err(QRError::CapacityExceeded)
    }

}

// Writer for encoded data
//------------------------------------------------------------------------------

pub(super) mod writer {
    use crate::common::bit_utils::BitStream;
    use crate::common::codec::{Mode, Segment, PADDING_CODEWORDS};

    pub fn push_segment(seg: Segment, out: &mut BitStream) {
        push_header(&seg, out);
        match seg.mode {
            Mode::Numeric => push_numeric_data(seg.data, out),
            Mode::Alphanumeric => push_alphanumeric_data(seg.data, out),
            Mode::Byte => push_byte_data(seg.data, out),
        }
    }

    fn push_header(seg: &Segment, out: &mut BitStream) {
        out.push_bits(seg.mode as u8, seg.mode_bits);
        let char_cnt = seg.data.len();
        debug_assert!(
            char_cnt < (1 << seg.len_bits),
            "Char count exceeds bit length: Char count {char_cnt}, Char count bits {}",
            seg.len_bits
        );
        out.push_bits(char_cnt as u16, seg.len_bits);
    }

    fn push_numeric_data(data: &[u8], out: &mut BitStream) {
        for chunk in data.chunks(3) {
            let len = Mode::Numeric.encoded_len(chunk.len());
            let data = Mode::Numeric.encode_chunk(chunk);
            out.push_bits(data, len);
        }
    }

    fn push_alphanumeric_data(data: &[u8], out: &mut BitStream) {
        for chunk in data.chunks(2) {
            let len = Mode::Alphanumeric.encoded_len(chunk.len());
            let data = Mode::Alphanumeric.encode_chunk(chunk);
            out.push_bits(data, len);
        }
    }

    fn push_byte_data(data: &[u8], out: &mut BitStream) {
        for chunk in data.chunks(1) {
            let data = Mode::Byte.encode_chunk(chunk);
            out.push_bits(data, 8);
        }
    }

    pub fn push_terminator(out: &mut BitStream) {
        let bit_len = out.len();
        let bit_capacity = out.capacity();
        if bit_len < bit_capacity {
            let term_len = std::cmp::min(4, bit_capacity - bit_len);
            out.push_bits(0, term_len);
        }
    }

    pub fn pad_remaining_capacity(out: &mut BitStream) {
        push_padding_bits(out);
        push_padding_codewords(out);
    }

    fn push_padding_bits(out: &mut BitStream) {
        let offset = out.len() & 7;
        if offset > 0 {
            let padding_bits_len = 8 - offset;
            out.push_bits(0, padding_bits_len);
        }
    }

    fn push_padding_codewords(out: &mut BitStream) {
        let offset = out.len() & 7;
        debug_assert!(
            offset == 0,
            "Bit offset should be zero before padding codewords: {}",
            offset
        );

        let remain_byte_capacity = (out.capacity() - out.len()) >> 3;
        PADDING_CODEWORDS.iter().copied().cycle().take(remain_byte_capacity).for_each(|pc| {
            out.push_bits(pc, 8);
        });
    }

}
