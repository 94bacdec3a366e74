//! Bounded collection utilities for metric series

use std::collections::VecDeque;

/// Helper trait for bounded VecDeque operations
pub(super) trait BoundedPush<T> {
    /// Push `value`, evicting and returning the oldest element once `max_size` is reached
    fn push_bounded(&mut self, value: T, max_size: usize) -> Option<T>;
}

impl<T> BoundedPush<T> for VecDeque<T> {
    #[inline]
    fn push_bounded(&mut self, value: T, max_size: usize) -> Option<T> {
        let evicted = if self.len() >= max_size {
            self.pop_front()
        } else {
            None
        };
        self.push_back(value);
        evicted
    }
}
