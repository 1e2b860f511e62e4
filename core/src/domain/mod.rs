//! Domain layer containing the verification record and the value objects
//! exchanged with the record store.

pub mod entities;
pub mod value_objects;

// Re-export commonly used domain types
pub use entities::*;
pub use value_objects::*;
