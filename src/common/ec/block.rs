use super::{ecc, rectify};
use crate::common::error::QRResult;
use crate::common::metadata::{ECLevel, Version};

// Blocks
//------------------------------------------------------------------------------

// Index range of one block within the shared codeword buffer
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub(crate) struct Block {
    start: usize,
    // Block length
    len: usize,
    // Data length
    dlen: usize,
}

impl Block {
    pub fn ec_len(&self) -> usize {
        self.len - self.dlen
    }

    fn range(&self) -> std::ops::Range<usize> {
        self.start..self.start + self.len
    }
}

// Arena of all error correction blocks of a symbol, each stored as data followed
// by its ecc
#[derive(Debug, Clone)]
pub(crate) struct Blocks {
    buf: Vec<u8>,
    blocks: Vec<Block>,
}

impl Blocks {
    fn layout(version: Version, ec_level: ECLevel) -> Vec<Block> {
        let info = version.ec_block_info(ec_level);
        let ec_len = info.ec_per_block;
        let mut start = 0;
        info.data_lens()
            .map(|dlen| {
                let blk = Block { start, len: dlen + ec_len, dlen };
                start += blk.len;
                blk
            })
            .collect()
    }

    pub fn from_data(data: &[u8], version: Version, ec_level: ECLevel) -> Self {
        debug_assert!(
            data.len() == version.data_codewords(ec_level),
            "Data len doesn't match total size of blocks: Data len {}, Total block size {}",
            data.len(),
            version.data_codewords(ec_level)
        );

        let blocks = Self::layout(version, ec_level);
        let mut buf = Vec::with_capacity(version.total_codewords());
        let mut data = data;
        for blk in &blocks {
            let (head, tail) = data.split_at(blk.dlen);
            buf.extend_from_slice(head);
            buf.extend(ecc(head, blk.ec_len()));
            data = tail;
        }
        Self { buf, blocks }
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    #[cfg(test)]
    pub fn block(&self, i: usize) -> &[u8] {
        &self.buf[self.blocks[i].range()]
    }

    #[cfg(test)]
    pub fn block_mut(&mut self, i: usize) -> &mut [u8] {
        let range = self.blocks[i].range();
        &mut self.buf[range]
    }

    pub fn ecc(&self, i: usize) -> &[u8] {
        let blk = self.blocks[i];
        &self.buf[blk.start + blk.dlen..blk.start + blk.len]
    }

    // Data codewords of every block in order
    pub fn data(&self) -> Vec<u8> {
        self.blocks
            .iter()
            .flat_map(|blk| &self.buf[blk.start..blk.start + blk.dlen])
            .copied()
            .collect()
    }
}

// Interleaving
//------------------------------------------------------------------------------

impl Blocks {
    // Position of every codeword in interleaved order. Data codewords are taken
    // round robin across blocks, skipping exhausted ones, followed by the ecc.
    fn interleaved_indices(&self) -> impl Iterator<Item = usize> + '_ {
        let max_dlen = self.blocks.iter().map(|b| b.dlen).max().unwrap_or(0);
        let ec_len = self.blocks.first().map(|b| b.ec_len()).unwrap_or(0);
        let data = (0..max_dlen).flat_map(move |i| {
            self.blocks.iter().filter(move |b| i < b.dlen).map(move |b| b.start + i)
        });
        let ecc = (0..ec_len)
            .flat_map(move |i| self.blocks.iter().map(move |b| b.start + b.dlen + i));
        data.chain(ecc)
    }

    pub fn interleave(&self) -> Vec<u8> {
        self.interleaved_indices().map(|i| self.buf[i]).collect()
    }

    pub fn deinterleave(payload: &[u8], version: Version, ec_level: ECLevel) -> Self {
        debug_assert!(
            payload.len() == version.total_codewords(),
            "Payload len doesn't match total codewords: Payload len {}, Total codewords {}",
            payload.len(),
            version.total_codewords()
        );

        let blocks = Self::layout(version, ec_level);
        let mut res = Self { buf: vec![0; version.total_codewords()], blocks };
        let indices: Vec<usize> = res.interleaved_indices().collect();
        for (i, &b) in indices.into_iter().zip(payload) {
            res.buf[i] = b;
        }
        res
    }
}

// Error correction
//------------------------------------------------------------------------------

impl Blocks {
    pub fn rectify(&mut self) -> QRResult<()> {
        for (i, blk) in self.blocks.iter().enumerate() {
            let ec_len = blk.ec_len();
            if let Err(e) = rectify(&mut self.buf[blk.range()], ec_len) {
                log::warn!("Failed to rectify block {i} of {}: {e}", self.blocks.len());
                return Err(e);
            }
        }
        Ok(())
    }
}
