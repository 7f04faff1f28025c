pub mod error;
pub mod rounding;
pub mod types;

#[cfg(feature = "amortization")]
pub mod amortization;

#[cfg(feature = "growth")]
pub mod growth;

#[cfg(feature = "scenarios")]
pub mod scenarios;

pub use error::FinProjError;
pub use rounding::{checked_round2_add, checked_round2_mul, checked_round2_sub, round2, round2_add};
pub use types::*;

/// Standard result type for all validated finproj operations
pub type FinProjResult<T> = Result<T, FinProjError>;
