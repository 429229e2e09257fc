//! Pipeline module - loading, feature engineering and selection steps

pub mod correlation;
pub mod error;
pub mod lags;
pub mod loader;
pub mod selection;

pub use correlation::*;
pub use error::*;
pub use lags::*;
pub use loader::*;
pub use selection::*;
