//! Safeguard layer — restricted-term catalog, the message transformer,
//! and the emphasis markup it emits.
//!
//! All user text passes through `transform` before it is shown or copied.
//! `markup` is the only place that knows the marker format.

pub mod catalog;
pub mod markup;
pub mod transform;

pub use catalog::{Catalog, RESTRICTED_KEYWORDS};
pub use transform::{apply_safeguard, SafeguardResult};
