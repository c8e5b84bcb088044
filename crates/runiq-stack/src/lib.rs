//! A minimal last-in-first-out stack of integers.
//!
//! Deliberately tiny: push, pop, emptiness, length. Popping an empty stack
//! is a routine condition, reported as `None` rather than an error.

#[derive(Debug, Default)]
pub struct Stack {
    items: Vec<i64>,
}

impl Stack {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Append a value. Amortized O(1), never fails.
    pub fn push(&mut self, value: i64) {
        self.items.push(value);
    }

    /// Remove and return the most recently pushed value, or `None` when the
    /// stack holds nothing.
    pub fn pop(&mut self) -> Option<i64> {
        self.items.pop()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}
