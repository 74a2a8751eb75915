pub mod address;
pub mod ram_node;
pub mod shared;
pub mod wisard;
