//! Settings adapters.

mod bundled;

pub use bundled::{BundledSettings, DocumentSource};
