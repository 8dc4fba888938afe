//! Session store implementations - in-memory and file-backed.

mod file;
mod memory;

pub use file::FileSessionStore;
pub use memory::InMemorySessionStore;
