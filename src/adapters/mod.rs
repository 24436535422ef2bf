//! Concrete implementations of the ports.

pub mod ai;
pub mod memory;
pub mod outbound;
