pub mod memory;
pub mod repositories;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_support;

pub use memory::MemoryDocumentStore;
pub use repositories::*;
