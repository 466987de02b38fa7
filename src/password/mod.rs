//! Password generation and unique allocation.

pub mod allocator;
pub mod generator;

pub use allocator::UniquePasswordAllocator;
pub use generator::{Alphabet, PasswordGenerator};
