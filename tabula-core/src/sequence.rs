//! Endless forward/backward cursor over a fixed list

use heapless::Vec;

use crate::error::Error;

/// Cyclic sequence of up to `N` items
///
/// The cursor starts before the first item, so the first
/// [`next`](CircularSequence::next) yields index 0 and the first
/// [`prev`](CircularSequence::prev) yields the last item.
#[derive(Debug, Clone)]
pub struct CircularSequence<T, const N: usize> {
    items: Vec<T, N>,
    cursor: Option<usize>,
}

impl<T: Clone, const N: usize> CircularSequence<T, N> {
    pub fn new(items: Vec<T, N>) -> Result<Self, Error> {
        if items.is_empty() {
            return Err(Error::EmptySequence);
        }
        Ok(Self {
            items,
            cursor: None,
        })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn next(&mut self) -> T {
        let index = match self.cursor {
            Some(i) => (i + 1) % self.items.len(),
            None => 0,
        };
        self.cursor = Some(index);
        self.items[index].clone()
    }

    pub fn prev(&mut self) -> T {
        let len = self.items.len();
        let index = match self.cursor {
            Some(i) => (i + len - 1) % len,
            None => len - 1,
        };
        self.cursor = Some(index);
        self.items[index].clone()
    }
}
