//! bf-core: numeric foundation for the block registration form.
//!
//! Contains:
//! - units (uom SI area/length types + constructors)
//! - numeric (Real, decimal parsing, fixed-point formatting)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;

pub use error::{CoreError, CoreResult};
pub use numeric::*;
pub use units::*;
