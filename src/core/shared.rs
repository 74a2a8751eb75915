//! A `SharedWisard` is a cloneable handle that lets several threads train and query one network.
//!
//! `Wisard` itself assumes a quiescent memory while predicting. The handle serializes access
//! through a read/write lock: training takes the write lock, scoring and prediction share the
//! read lock for their whole scan, so a prediction never observes a half-applied sample.

use super::{address::Symbol, wisard::Wisard};
use crate::error::Result;
use parking_lot::RwLock;
use std::sync::Arc;

/// Thread-safe handle to a `Wisard` network.
#[derive(Clone, Debug)]
pub struct SharedWisard {
    inner: Arc<RwLock<Wisard>>,
}

impl SharedWisard {
    pub fn new(wisard: Wisard) -> Self {
        Self {
            inner: Arc::new(RwLock::new(wisard)),
        }
    }

    pub fn train(&self, input: &[Symbol], class: usize) -> Result<()> {
        self.inner.write().train(input, class)
    }

    pub fn scores(&self, input: &[Symbol], bleach: u64) -> Result<Vec<usize>> {
        self.inner.read().scores(input, bleach)
    }

    pub fn predict(&self, input: &[Symbol], bleach: u64) -> Result<usize> {
        self.inner.read().predict(input, bleach)
    }

    /// Runs `f` with shared access to the network, e.g. to inspect its RAM nodes.
    pub fn with_read<T>(&self, f: impl FnOnce(&Wisard) -> T) -> T {
        let guard = self.inner.read();
        f(&*guard)
    }

    /// Returns the network if this is the last handle, or the handle back otherwise.
    pub fn try_into_inner(self) -> std::result::Result<Wisard, Self> {
        Arc::try_unwrap(self.inner)
            .map(|lock| lock.into_inner())
            .map_err(|inner| Self { inner })
    }
}

impl From<Wisard> for SharedWisard {
    fn from(wisard: Wisard) -> Self {
        Self::new(wisard)
    }
}
