// region:       -- Modules
pub mod ais;
mod clinic;
mod error;
pub mod knowledge;
pub mod openfda;
pub mod presenter;

pub use self::error::{Error, Result};

pub use crate::clinic::*;
// endregion:    -- Modules
