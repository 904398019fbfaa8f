/// Running sum and count for one bucket of Fahrenheit readings.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BucketAccumulator {
    pub sum: f64,
    pub count: usize,
}

impl BucketAccumulator {
    pub fn add(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    /// Arithmetic mean of the bucket. Returns `None` for an empty bucket.
    pub fn mean(&self) -> Option<f64> {
        if self.count == 0 {
            return None;
        }
        Some(self.sum / self.count as f64)
    }
}
