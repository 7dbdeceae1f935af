//! Fixed-capacity ring buffer holding the tokens around the word being counted.

use thiserror::Error;

/// Returned by [`ContextWindow::push`] when the window is full and overwriting
/// is disabled. Carries the rejected item back to the caller.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("context window is full (capacity {capacity})")]
pub struct WindowFull<T> {
    pub capacity: usize,
    pub item: T,
}

/// Ring buffer of at most `capacity` items.
///
/// Storage has `capacity + 1` slots so that `head == tail` always means empty
/// and `head + 1 == tail` (modulo the slot count) always means full.
#[derive(Debug, Clone)]
pub struct ContextWindow<T> {
    slots: Vec<Option<T>>,
    head: usize,
    tail: usize,
    overwrite: bool,
}

impl<T> ContextWindow<T> {
    /// Create an empty window that evicts its oldest item on overflow.
    ///
    /// # Panics
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "context window capacity must be positive");
        Self {
            slots: (0..=capacity).map(|_| None).collect(),
            head: 0,
            tail: 0,
            overwrite: true,
        }
    }

    /// Disable eviction: pushing into a full window then fails.
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    pub fn capacity(&self) -> usize {
        self.slots.len() - 1
    }

    /// Index of the current item when the window is full.
    pub fn center(&self) -> usize {
        (self.capacity() + 1) / 2 - 1
    }

    pub fn len(&self) -> usize {
        (self.head + self.slots.len() - self.tail) % self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.head == self.tail
    }

    pub fn is_full(&self) -> bool {
        (self.head + 1) % self.slots.len() == self.tail
    }

    /// Insert at the head, evicting the tail when full and overwriting.
    pub fn push(&mut self, item: T) -> Result<(), WindowFull<T>> {
        if self.is_full() {
            if !self.overwrite {
                return Err(WindowFull {
                    capacity: self.capacity(),
                    item,
                });
            }
            self.slots[self.tail] = None;
            self.tail = self.advance(self.tail);
        }
        self.slots[self.head] = Some(item);
        self.head = self.advance(self.head);
        Ok(())
    }

    /// Remove and return the oldest item.
    pub fn pop(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        let item = self.slots[self.tail].take();
        self.tail = self.advance(self.tail);
        item
    }

    /// Item at position `index` counted from the tail.
    pub fn peek_at(&self, index: usize) -> Option<&T> {
        if index >= self.len() {
            return None;
        }
        self.slots[(self.tail + index) % self.slots.len()].as_ref()
    }

    /// Items from oldest to newest.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            window: self,
            pos: 0,
            len: self.len(),
        }
    }

    fn advance(&self, pointer: usize) -> usize {
        (pointer + 1) % self.slots.len()
    }
}

pub struct Iter<'a, T> {
    window: &'a ContextWindow<T>,
    pos: usize,
    len: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.len {
            return None;
        }
        let item = self.window.peek_at(self.pos);
        self.pos += 1;
        item
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len - self.pos;
        (remaining, Some(remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<'a, T> IntoIterator for &'a ContextWindow<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
