//! Group index: each key files an ordered collection of opaque references
//! into an externally owned record list.

mod map;
mod types;
mod util;

pub use map::GroupIndex;
pub use types::GroupNode;
