//! Host implementations.

pub mod memory_host;

pub use memory_host::MemoryHost;
