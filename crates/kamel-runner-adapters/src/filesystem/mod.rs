//! Filesystem adapters.

mod memory;
mod walk;

pub use memory::MemoryScanner;
pub use walk::WalkDirScanner;
