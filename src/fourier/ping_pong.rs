//! Two-slot buffer with an explicit write index.

/// Double buffer: the engine writes one slot while the other still holds the
/// previous result.
///
/// After [`flip`](PingPong::flip) the slot that was just written becomes the
/// read slot, so readers always see the most recent complete result.
#[derive(Debug, Clone)]
pub struct PingPong<T> {
    slots: [T; 2],
    write: usize,
}

impl<T> PingPong<T> {
    pub fn new(first: T, second: T) -> Self {
        Self {
            slots: [first, second],
            write: 0,
        }
    }

    pub fn write_index(&self) -> usize {
        self.write
    }

    pub fn read_index(&self) -> usize {
        1 - self.write
    }

    pub fn write_slot_mut(&mut self) -> &mut T {
        &mut self.slots[self.write]
    }

    pub fn read_slot(&self) -> &T {
        &self.slots[1 - self.write]
    }

    /// Publish the write slot and start writing the other one.
    pub fn flip(&mut self) {
        self.write = 1 - self.write;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_last_written_slot() {
        let mut buffers = PingPong::new(0, 0);

        *buffers.write_slot_mut() = 1;
        buffers.flip();
        assert_eq!(*buffers.read_slot(), 1);

        *buffers.write_slot_mut() = 2;
        // Not yet published
        assert_eq!(*buffers.read_slot(), 1);
        buffers.flip();
        assert_eq!(*buffers.read_slot(), 2);
    }

    #[test]
    fn test_indices_alternate() {
        let mut buffers = PingPong::new((), ());
        assert_eq!(buffers.write_index(), 0);
        assert_eq!(buffers.read_index(), 1);
        buffers.flip();
        assert_eq!(buffers.write_index(), 1);
        assert_eq!(buffers.read_index(), 0);
    }
}
