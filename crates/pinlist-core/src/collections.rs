//! Hash collections used across the list crates.
//!
//! `FxHashMap` is the default; the `std-hash` feature swaps in the standard
//! SipHash maps when keys may come from untrusted input.

#[cfg(feature = "std-hash")]
pub mod map {
    pub use std::collections::{HashMap, HashSet};
}

#[cfg(not(feature = "std-hash"))]
pub mod map {
    pub use rustc_hash::{FxHashMap as HashMap, FxHashSet as HashSet};
}
