//! Report module - presenting selection results

pub mod sink;
pub mod summary;

pub use sink::*;
pub use summary::*;
