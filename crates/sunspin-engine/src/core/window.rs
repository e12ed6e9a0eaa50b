use std::collections::VecDeque;

/// Fixed-capacity FIFO of per-tick samples with a running sum.
///
/// Pushing past capacity evicts the oldest sample. The sum is recomputed from
/// the contents on every push so it never drifts from the window.
#[derive(Debug, Clone)]
pub struct SlidingWindow {
    samples: VecDeque<f32>,
    capacity: usize,
    sum: f32,
}

impl SlidingWindow {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity + 1),
            capacity,
            sum: 0.0,
        }
    }

    /// Append a sample, evicting the oldest one on overflow. Returns the new sum.
    pub fn push(&mut self, value: f32) -> f32 {
        self.samples.push_back(value);
        if self.samples.len() > self.capacity {
            self.samples.pop_front();
        }
        debug_assert!(self.samples.len() <= self.capacity);
        self.sum = self.samples.iter().sum();
        self.sum
    }

    pub fn sum(&self) -> f32 {
        self.sum
    }

    /// Mean of the current contents, or `None` when empty.
    pub fn mean(&self) -> Option<f32> {
        if self.samples.is_empty() {
            None
        } else {
            Some(self.sum / self.samples.len() as f32)
        }
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

    pub fn iter(&self) -> impl Iterator<Item = &f32> {
        self.samples.iter()
    }
}
