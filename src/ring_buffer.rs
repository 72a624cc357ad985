use crate::Price;

/// Fixed-capacity FIFO backed by a preallocated arena.
///
/// Pushing into a full buffer overwrites (and returns) the oldest value.
#[derive(Clone, Debug)]
pub(crate) struct RingBuffer {
    buffer: Vec<Price>,
    head: usize,
    len: usize,
    capacity: usize,
}

impl RingBuffer {
    #[must_use]
    pub(crate) fn new(capacity: usize) -> Self {
        debug_assert!(capacity > 0, "ring buffer capacity must be positive");

        Self {
            buffer: vec![0.0; capacity],
            head: 0,
            len: 0,
            capacity,
        }
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub(crate) fn is_ready(&self) -> bool {
        self.len == self.capacity
    }

    #[inline]
    pub(crate) fn push(&mut self, value: Price) -> Option<Price> {
        if self.is_ready() {
            let old = self.buffer[self.head];

            self.buffer[self.head] = value;

            self.head += 1;
            if self.head == self.capacity {
                self.head = 0;
            }

            Some(old)
        } else {
            self.buffer[self.len] = value;
            self.len += 1;

            None
        }
    }

    /// Values from oldest to newest.
    #[inline]
    pub(crate) fn iter(&self) -> impl Iterator<Item = Price> + '_ {
        // head stays at 0 until the buffer fills, so the second slice is
        // empty while filling.
        self.buffer[self.head..self.len]
            .iter()
            .chain(&self.buffer[..self.head])
            .copied()
    }
}
