//! Database layer (in-process store with JSON snapshots).

pub mod memory;

pub use memory::MemoryDb;
