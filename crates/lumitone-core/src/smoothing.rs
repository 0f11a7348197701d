use std::collections::VecDeque;

/// Bounded recency window over sensor samples.
///
/// Pushing beyond `capacity` evicts the oldest sample, so the buffer always
/// holds the most recent readings in arrival order.
#[derive(Clone, Debug)]
pub struct SmoothingBuffer {
    samples: VecDeque<f32>,
    capacity: usize,
}

impl SmoothingBuffer {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    pub fn push(&mut self, sample: f32) -> &mut Self {
        self.samples.push_back(sample);
        if self.samples.len() > self.capacity {
            self.samples.pop_front();
        }
        self
    }

    /// Arithmetic mean of the current contents, `None` when empty.
    pub fn average(&self) -> Option<f32> {
        if self.samples.is_empty() {
            return None;
        }
        let sum: f32 = self.samples.iter().sum();
        Some(sum / self.samples.len() as f32)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = f32> + '_ {
        self.samples.iter().copied()
    }
}
