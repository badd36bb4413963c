
//! Accounting for the memory an expression tree occupies.
//!
//! The parser charges every node it builds to a [`NodeAllocator`].
//! Allocation can fail, in which case the parse is abandoned and the
//! allocator is rewound to the checkpoint taken before the parse
//! started.

use thiserror::Error;

use std::fmt::{self, Display, Formatter};

/// A handle to a block handed out by a [`NodeAllocator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Allocation {
  offset: usize,
  size: usize,
}

/// A marked allocator state. Restoring to it releases everything
/// allocated after it was taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Checkpoint(usize);

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("Node pool exhausted: requested {requested} bytes with {available} available")]
pub struct PoolExhausted {
  pub requested: usize,
  pub available: usize,
}

pub trait NodeAllocator {
  fn allocate(&mut self, size: usize) -> Result<Allocation, PoolExhausted>;

  fn checkpoint(&self) -> Checkpoint;

  fn restore_to(&mut self, checkpoint: Checkpoint);
}

/// A bump allocator that only tracks usage. Allocations are released
/// in bulk by restoring a checkpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodePool {
  capacity: Option<usize>,
  used: usize,
}

impl Allocation {
  pub fn offset(&self) -> usize {
    self.offset
  }

  pub fn size(&self) -> usize {
    self.size
  }
}

impl NodePool {
  pub fn bounded(capacity: usize) -> Self {
    Self { capacity: Some(capacity), used: 0 }
  }

  pub fn unbounded() -> Self {
    Self { capacity: None, used: 0 }
  }

  pub fn capacity(&self) -> Option<usize> {
    self.capacity
  }

  pub fn used(&self) -> usize {
    self.used
  }

  /// Bytes left before allocation starts failing. `usize::MAX` for
  /// an unbounded pool.
  pub fn available(&self) -> usize {
    self.capacity.map_or(usize::MAX, |cap| cap - self.used)
  }
}

impl Default for NodePool {
  fn default() -> Self {
    Self::unbounded()
  }
}

impl NodeAllocator for NodePool {
  fn allocate(&mut self, size: usize) -> Result<Allocation, PoolExhausted> {
    let available = self.available();
    if size > available {
      return Err(PoolExhausted { requested: size, available });
    }
    let offset = self.used;
    self.used = self.used.saturating_add(size);
    Ok(Allocation { offset, size })
  }

  fn checkpoint(&self) -> Checkpoint {
    Checkpoint(self.used)
  }

  fn restore_to(&mut self, checkpoint: Checkpoint) {
    if checkpoint.0 <= self.used {
      self.used = checkpoint.0;
    } else {
      log::warn!("Ignoring restore to checkpoint {} beyond current usage {}", checkpoint.0, self.used);
    }
  }
}

impl Display for NodePool {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match self.capacity {
      Some(cap) => write!(f, "{}/{} bytes", self.used, cap),
      None => write!(f, "{} bytes", self.used),
    }
  }
}

impl<A: NodeAllocator + ?Sized> NodeAllocator for &mut A {
  fn allocate(&mut self, size: usize) -> Result<Allocation, PoolExhausted> {
    (**self).allocate(size)
  }

  fn checkpoint(&self) -> Checkpoint {
    (**self).checkpoint()
  }

  fn restore_to(&mut self, checkpoint: Checkpoint) {
    (**self).restore_to(checkpoint)
  }
}
