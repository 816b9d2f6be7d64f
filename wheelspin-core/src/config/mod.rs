//! Configuration types
//!
//! Spin and settle policies plus the default segment input. The whole
//! configuration can be loaded from TOML or stored as a postcard blob.

#[cfg(feature = "serde")]
pub mod storage;
pub mod types;

pub use types::*;
