//! Pointer input for the map view
//!
//! `router` holds the platform-free gesture and hit-region logic;
//! `pointer` feeds it from macroquad's mouse state.

mod pointer;
mod router;

pub use pointer::PointerPoller;
pub use router::*;
