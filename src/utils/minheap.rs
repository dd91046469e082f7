use std::cmp::Reverse;
use std::collections::BinaryHeap;

pub struct MinHeap<T: Ord>(BinaryHeap<Reverse<T>>);

impl<T: Ord> MinHeap<T> {
  pub fn new() -> Self {
    MinHeap(BinaryHeap::<Reverse<T>>::new())
  }

  pub fn push(&mut self, item: T) {
    self.0.push(Reverse(item));
  }

  pub fn pop(&mut self) -> Option<T> {
    self.0.pop().map(|v| v.0)
  }
}

impl<T: Ord> Default for MinHeap<T> {
  fn default() -> Self {
    Self::new()
  }
}

impl<T: Ord> FromIterator<T> for MinHeap<T> {
  fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
    MinHeap(iter.into_iter().map(Reverse).collect())
  }
}

impl MinHeap<u32> {
  /// Pop values in ascending order and return the smallest value `>= start`
  /// that was never pushed. Duplicates and values below `start` are ignored.
  /// The heap is left partially drained.
  pub fn find_smallest_absent(&mut self, start: u32) -> u32 {
    let mut i = start;
    while let Some(v) = self.pop() {
      if v < i {
        continue;
      }

      if v != i {
        return i;
      }

      i += 1;
    }
    i
  }
}
