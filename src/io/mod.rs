//! Input/output helpers.
//!
//! - append-only dump log of raw responses (`dump`)
//! - CSV export of report rows (`export`)

pub mod dump;
pub mod export;

pub use dump::*;
pub use export::*;
