//! Token and proxy store implementations

pub mod file;
pub mod memory;
pub mod proxy;

pub use file::FileTokenStore;
pub use memory::MemoryTokenStore;
pub use proxy::StaticProxyStore;
