use std::fmt::Display;

use num_traits::PrimInt;

// Bit stream
//------------------------------------------------------------------------------

// Bits packed MSB first. Writers push up to a fixed bit capacity, readers take
// from a cursor that only moves forward.
#[derive(Debug, Clone)]
pub struct BitStream {
    bytes: Vec<u8>,
    len: usize,
    capacity: usize,
    cursor: usize,
}

impl BitStream {
    pub fn new(capacity: usize) -> Self {
        Self { bytes: Vec::with_capacity((capacity + 7) / 8), len: 0, capacity, cursor: 0 }
    }

    // Full stream ready to be read
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let len = bytes.len() * 8;
        Self { bytes: bytes.to_vec(), len, capacity: len, cursor: 0 }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    // Bits not yet taken
    pub fn remaining(&self) -> usize {
        self.len - self.cursor
    }

    // Trailing bits of the last byte are zero
    pub fn data(&self) -> &[u8] {
        &self.bytes
    }
}

// Writing
//------------------------------------------------------------------------------

impl BitStream {
    // Lowest `size` bits of `bits`, most significant first
    pub fn push_bits<T>(&mut self, bits: T, size: usize)
    where
        T: PrimInt + Display,
    {
        assert!(size <= 16, "Cannot push more than 16 bits at once: Size {size}");
        debug_assert!(
            size == T::zero().count_zeros() as usize || bits >> size == T::zero(),
            "{bits} doesn't fit in {size} bits"
        );
        debug_assert!(
            self.len + size <= self.capacity,
            "Insufficient capacity: Capacity {}, Size {}",
            self.capacity,
            self.len + size
        );

        for shift in (0..size).rev() {
            self.push((bits >> shift) & T::one() == T::one());
        }
    }

    pub fn push(&mut self, bit: bool) {
        debug_assert!(self.len < self.capacity, "Insufficient capacity: Capacity {}", self.capacity);

        if self.len % 8 == 0 {
            self.bytes.push(0);
        }
        if bit {
            if let Some(last) = self.bytes.last_mut() {
                *last |= 0x80 >> (self.len % 8);
            }
        }
        self.len += 1;
    }
}


// Reading
//------------------------------------------------------------------------------

impl BitStream {
    // None when fewer than `n` bits are left, the cursor stays put
    pub fn take_bits(&mut self, n: usize) -> Option<u16> {
        debug_assert!(n <= 16, "Cannot take more than 16 bits: N {n}");

        if self.remaining() < n {
            return None;
        }
        let mut res = 0;
        for _ in 0..n {
            res = (res << 1) | u16::from(self.take()?);
        }
        Some(res)
    }

    pub fn take(&mut self) -> Option<bool> {
        if self.cursor == self.len {
            return None;
        }
        let bit = self.bytes[self.cursor / 8] & (0x80 >> (self.cursor % 8)) != 0;
        self.cursor += 1;
        Some(bit)
    }
}

impl Iterator for BitStream {
    type Item = bool;
    fn next(&mut self) -> Option<Self::Item> {
        self.take()
    }
}
