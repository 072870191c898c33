//! In-process repository implementations.
//!
//! Each repository keeps its records in a `RwLock`-guarded map behind
//! an `Arc`; clones share the same data. Suitable for single-node
//! deployments and tests.

mod account;
mod comment;
mod post;

pub use account::MemoryAccountRepository;
pub use comment::MemoryCommentRepository;
pub use post::MemoryPostRepository;
