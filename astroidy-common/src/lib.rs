//! Types and helpers shared by the Astroidy feed proxy and list viewer.

pub mod collate;
pub mod logging;
pub mod types;

pub use collate::compare_names;
pub use types::*;
