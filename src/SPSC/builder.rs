use std::sync::Arc;

use super::{Consumer, Producer};
use crate::error::ConfigError;
use crate::Core::storage::SharedRing;
use crate::SPSC::Buffer::RingBuffer;

pub struct ChannelBuilder {
    capacity: usize,
}

impl Default for ChannelBuilder {
    fn default() -> Self {
        Self {
            capacity: 1024, // 1023 usable slots
        }
    }
}

impl ChannelBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of slots in the ring. One slot is always kept free.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Allocate the ring and its storage and split it into its two ends.
    pub fn build<T: Copy + Default + Send>(self) -> Result<(Producer<T>, Consumer<T>), ConfigError> {
        let ring = RingBuffer::new(self.capacity)?;
        let shared = Arc::new(SharedRing::new(ring));
        Ok((Producer::new(Arc::clone(&shared)), Consumer::new(shared)))
    }
}
