//! FILENAME: core/dataset/src/lib.rs
//! PURPOSE: Shared entity types and dataset plumbing for the e-commerce dashboard.
//! CONTEXT: Re-exports the entity rows, the deterministic generator, CSV file
//! helpers and timestamp normalisation used by the store and pipeline crates.

pub mod entities;
pub mod error;
pub mod files;
pub mod generator;
pub mod integrity;
pub mod timestamp;
mod words;

// Re-export commonly used types at the crate root
pub use entities::{
    Customer, Dataset, EntityId, EntityKind, EntityRow, Order, OrderItem, Product, Review,
};
pub use error::DatasetError;
pub use files::{read_dataset, read_table, write_dataset, write_table};
pub use generator::{generate, GeneratorConfig, CATEGORIES};
pub use integrity::{check_integrity, IntegrityViolation};
pub use timestamp::{format_timestamp, parse_timestamp};
