//! WiSARD weightless neural network classifier.
//!
//! A `Wisard` network memorizes, per class, how often each sub-pattern of a discrete input vector
//! was seen, and classifies new inputs by counting which of those sub-pattern memories fire.

pub mod core;
pub mod error;

pub use crate::core::{
    address::{Address, Symbol},
    ram_node::RamNode,
    shared::SharedWisard,
    wisard::{Wisard, WisardParams},
};
pub use error::{Result, WisardError};
