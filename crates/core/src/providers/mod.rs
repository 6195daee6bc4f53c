pub mod registry;
pub mod traits;

// Provider implementations
pub mod in_memory;
