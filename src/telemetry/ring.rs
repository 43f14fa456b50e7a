//! Bounded latest-wins line buffer shared between the reader thread and the main loop
//!
//! The producer half appends and evicts the oldest line on overflow. The consumer
//! half only ever takes the newest line; whatever was queued behind it stays
//! until it is evicted by newer data.

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;

struct Shared {
    lines: Mutex<VecDeque<String>>,
    capacity: usize,
}

/// Create a buffer holding at most `capacity` lines
pub fn bounded(capacity: usize) -> (LineProducer, LineConsumer) {
    let capacity = capacity.max(1);
    let shared = Arc::new(Shared {
        lines: Mutex::new(VecDeque::with_capacity(capacity)),
        capacity,
    });
    (
        LineProducer {
            shared: Arc::clone(&shared),
        },
        LineConsumer { shared },
    )
}

/// Writing half, owned by the reader thread
pub struct LineProducer {
    shared: Arc<Shared>,
}

impl LineProducer {
    /// Append a line, dropping the oldest one when full
    pub fn push(&self, line: String) {
        let mut lines = self.shared.lines.lock();
        if lines.len() == self.shared.capacity {
            lines.pop_front();
        }
        lines.push_back(line);
    }
}

/// Reading half, owned by the main loop
pub struct LineConsumer {
    shared: Arc<Shared>,
}

impl LineConsumer {
    /// Remove and return the most recently pushed line, if any. Never blocks on data.
    pub fn pop_latest(&self) -> Option<String> {
        self.shared.lines.lock().pop_back()
    }

}

#[cfg(test)]
impl LineConsumer {
    fn len(&self) -> usize {
        self.shared.lines.lock().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn capacity(&self) -> usize {
        self.shared.capacity
    }
}
