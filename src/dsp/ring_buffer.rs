use std::ops::Index;

use crate::error::ConfigError;

/// Fixed-capacity circular sample store.
///
/// Samples are only ever written through [`push`](Self::push); reads use
/// signed positions relative to the retained history instead of raw array
/// indices:
///
/// ```text
///  index:   [0]     [1]    ...   [-2]    [-1]
///           oldest  ───────────────────→  newest
/// ```
///
/// Non-negative indices count forward from the oldest retained sample,
/// negative indices count backward from the most recent write. All indices
/// wrap modulo the capacity, so reads can never go out of bounds.
#[derive(Debug, Clone)]
pub struct RingBuffer {
    buffer: Vec<f64>,
    write_pointer: usize,
}

impl RingBuffer {
    pub fn new(length: usize) -> Result<Self, ConfigError> {
        if length == 0 {
            return Err(ConfigError::ZeroLength);
        }

        Ok(Self {
            buffer: vec![0.0; length],
            write_pointer: 0,
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Always false: construction rejects zero capacity.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Slot the next push will overwrite
    #[inline]
    pub fn write_pointer(&self) -> usize {
        self.write_pointer
    }

    /// Slot holding the oldest retained sample
    ///
    /// Once the buffer has wrapped this is the slot about to be overwritten,
    /// i.e. the same slot as the write pointer.
    #[inline]
    pub fn read_pointer(&self) -> usize {
        self.write_pointer
    }

    /// Write one sample and advance.
    #[inline]
    pub fn push(&mut self, sample: f64) {
        self.buffer[self.write_pointer] = sample;
        self.write_pointer += 1;
        if self.write_pointer == self.buffer.len() {
            self.write_pointer = 0;
        }
    }

    /// Overwrite every slot with silence.
    ///
    /// Implemented as `len` pushes of zero so the write pointer ends up where
    /// it started.
    pub fn clear(&mut self) {
        for _ in 0..self.buffer.len() {
            self.push(0.0);
        }
    }

    /// Sample written `age` pushes ago; `age == 1` is the newest.
    ///
    /// An age equal to the capacity addresses the oldest retained sample.
    #[inline]
    pub fn age(&self, age: usize) -> f64 {
        let len = self.buffer.len();
        let slot = (self.write_pointer + len - age % len) % len;
        self.buffer[slot]
    }

    #[inline]
    fn slot(&self, index: isize) -> usize {
        let len = self.buffer.len() as isize;
        (self.write_pointer as isize + index).rem_euclid(len) as usize
    }
}

impl Index<isize> for RingBuffer {
    type Output = f64;

    fn index(&self, index: isize) -> &Self::Output {
        &self.buffer[self.slot(index)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIZES: [usize; 4] = [1, 3, 1024, 48_000];

    /// Deterministic pseudo-noise, distinct per slot.
    fn fill(ring: &mut RingBuffer, seed: u32) -> Vec<f64> {
        let mut state = seed.wrapping_mul(2_654_435_761).max(1);
        let values: Vec<f64> = (0..ring.len())
            .map(|i| {
                state ^= state << 13;
                state ^= state >> 17;
                state ^= state << 5;
                (state as f64 / u32::MAX as f64) + i as f64
            })
            .collect();
        for &value in &values {
            ring.push(value);
        }
        values
    }

    #[test]
    fn zero_capacity_is_rejected() {
        assert_eq!(RingBuffer::new(0).unwrap_err(), ConfigError::ZeroLength);
    }

    #[test]
    fn clear_zeroes_every_slot() {
        for size in SIZES {
            let mut ring = RingBuffer::new(size).unwrap();
            ring.clear();
            fill(&mut ring, 7);
            ring.clear();
            for index in 0..size as isize {
                assert_eq!(ring[index], 0.0);
                assert_eq!(ring[-index - 1], 0.0);
            }
        }
    }

    #[test]
    fn indexes_from_oldest_and_newest() {
        for size in SIZES {
            let mut ring = RingBuffer::new(size).unwrap();
            let input = fill(&mut ring, 11);
            for (offset, &expected) in input.iter().enumerate() {
                assert_eq!(ring[offset as isize], expected);
                assert_eq!(ring[offset as isize - size as isize], expected);
            }
        }
    }

    #[test]
    fn overwrite_keeps_latest_window() {
        for size in SIZES {
            let mut ring = RingBuffer::new(size).unwrap();
            fill(&mut ring, 3);
            let input = fill(&mut ring, 5);
            assert_eq!(ring[0], input[0]);
            assert_eq!(ring[-1], input[size - 1]);
            assert_eq!(ring.age(1), input[size - 1]);
            assert_eq!(ring.age(size), input[0]);
        }
    }

    #[test]
    fn four_slot_scenario() {
        let mut ring = RingBuffer::new(4).unwrap();
        for value in [1.0, 2.0, 3.0, 4.0] {
            ring.push(value);
        }

        assert_eq!(ring[0], 1.0);
        assert_eq!(ring[1], 2.0);
        assert_eq!(ring[2], 3.0);
        assert_eq!(ring[3], 4.0);
        assert_eq!(ring[-1], 4.0);
        assert_eq!(ring[-4], 1.0);
    }

    #[test]
    fn indices_wrap_instead_of_panicking() {
        let mut ring = RingBuffer::new(3).unwrap();
        for value in [1.0, 2.0, 3.0] {
            ring.push(value);
        }

        assert_eq!(ring[3], ring[0]);
        assert_eq!(ring[-4], ring[-1]);
        assert_eq!(ring[301], 2.0);
    }

    #[test]
    fn push_advances_write_pointer() {
        let mut ring = RingBuffer::new(2).unwrap();
        assert_eq!(ring.write_pointer(), 0);
        ring.push(1.0);
        assert_eq!(ring.write_pointer(), 1);
        ring.push(2.0);
        assert_eq!(ring.write_pointer(), 0);
        assert_eq!(ring.read_pointer(), 0);
    }
}
