//! An `Address` identifies one sub-pattern seen by a RAM node.
//!
//! Each RAM node watches a fixed-size window of the input vector. The symbols inside that window
//! are turned into an address, which is the key of the node's counter table.
//!
//! Encoding:
//! - Binary windows of up to 64 symbols are packed into a single `u64`, symbol `i` at bit `i`.
//! - Anything else (wider windows or symbols above 1) keeps the symbols verbatim.
//!
//! The variant is chosen purely from the window content, so equal windows always map to equal
//! addresses and two different windows of the same length never share one.

/// A single discrete input symbol. Usually 0 or 1.
pub type Symbol = u32;

/// Widest binary window that still fits the packed representation.
pub const MAX_PACKED_BITS: usize = u64::BITS as usize;

/// Key of a RAM node's memory, derived from one input window.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Address {
    /// Binary window packed into the low bits of a word.
    Packed(u64),

    /// Non-binary or wide window, stored symbol by symbol.
    Symbols(Box<[Symbol]>),
}

impl Address {
    /// Encodes the symbols of one window.
    #[inline]
    pub fn encode(window: &[Symbol]) -> Self {
        Self::encode_iter(window.len(), window.iter().copied())
    }

    /// Encodes a window whose symbols are produced lazily, e.g. gathered through an input mapping.
    /// `len` must equal the number of symbols `symbols` yields.
    #[inline]
    pub fn encode_iter<I>(len: usize, symbols: I) -> Self
    where
        I: Iterator<Item = Symbol> + Clone,
    {
        if len <= MAX_PACKED_BITS && symbols.clone().all(|s| s <= 1) {
            let packed = symbols
                .enumerate()
                .fold(0u64, |acc, (i, s)| acc | (u64::from(s) << i));
            Address::Packed(packed)
        } else {
            Address::Symbols(symbols.collect())
        }
    }

    /// Returns true if the address uses the packed binary form.
    pub fn is_packed(&self) -> bool {
        matches!(self, Address::Packed(_))
    }
}
