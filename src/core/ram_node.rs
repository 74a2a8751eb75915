//! A `RamNode` is the pattern memory of WiSARD: one frequency table per (class, partition) pair.
//!
//! During training the node counts how often each sub-pattern address was observed for its class.
//! During prediction the node "fires" when the count for the current address reaches the bleaching
//! threshold. Counts only grow; nothing is evicted or decayed.

use super::address::Address;
use fxhash::FxHashMap;

/// Threshold that asks "has this address been seen at all".
pub const DEFAULT_THRESHOLD: u64 = 1;

/// Frequency table from sub-pattern address to occurrence count.
#[derive(Clone, Debug, Default)]
pub struct RamNode {
    memory: FxHashMap<Address, u64>,
}

impl RamNode {
    /// Creates an empty RAM node.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one more occurrence of `address`.
    #[inline]
    pub fn train(&mut self, address: Address) {
        let count = self.memory.entry(address).or_insert(0);
        *count = count.saturating_add(1);
    }

    /// Returns true if `address` was observed at least `threshold` times.
    /// Unseen addresses count as zero.
    #[inline]
    pub fn predict(&self, address: &Address, threshold: u64) -> bool {
        self.count(address) >= threshold
    }

    /// `predict` with the default threshold of one.
    #[inline]
    pub fn predict_seen(&self, address: &Address) -> bool {
        self.predict(address, DEFAULT_THRESHOLD)
    }

    /// Number of times `address` was trained.
    #[inline]
    pub fn count(&self, address: &Address) -> u64 {
        self.memory.get(address).copied().unwrap_or(0)
    }

    /// Number of distinct addresses stored.
    pub fn len(&self) -> usize {
        self.memory.len()
    }

    pub fn is_empty(&self) -> bool {
        self.memory.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unseen_address_never_fires() {
        let node = RamNode::new();
        let address = Address::encode(&[1, 0, 1]);
        assert_eq!(node.count(&address), 0);
        assert!(!node.predict_seen(&address));
        assert!(!node.predict(&address, 3));
        assert!(node.is_empty());
    }

    #[test]
    fn train_accumulates_counts() {
        let mut node = RamNode::new();
        let address = Address::encode(&[1, 1, 0]);
        for _ in 0..3 {
            node.train(address.clone());
        }
        assert_eq!(node.count(&address), 3);
        assert_eq!(node.len(), 1);
        assert!(node.predict(&address, 3));
        assert!(!node.predict(&address, 4));
    }

    #[test]
    fn zero_threshold_fires_for_anything() {
        let node = RamNode::new();
        assert!(node.predict(&Address::encode(&[0, 1]), 0));
    }

    #[test]
    fn addresses_are_counted_independently() {
        let mut node = RamNode::new();
        let a = Address::encode(&[0, 1]);
        let b = Address::encode(&[1, 0]);
        node.train(a.clone());
        node.train(a.clone());
        node.train(b.clone());
        assert_eq!(node.count(&a), 2);
        assert_eq!(node.count(&b), 1);
        assert_eq!(node.len(), 2);
    }
}
